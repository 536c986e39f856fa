mod topocentric;

use crate::core::error::ComputationError;
use crate::core::models::{Observation, Observer, Satellite};
use chrono::{DateTime, Utc};

use topocentric::{gmst, look_angles};

/// Computes where a satellite appears to an observer at a given instant.
pub trait Propagator {
    fn observe(
        &self,
        satellite: &Satellite,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<Observation, ComputationError>;
}

/// SGP4 propagation in the TEME frame, rotated into the observer's horizon frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Sgp4Propagator {
    pub fn new() -> Self {
        Self
    }

    fn minutes_since_epoch(
        satellite: &Satellite,
        at: DateTime<Utc>,
    ) -> Result<sgp4::MinutesSinceEpoch, ComputationError> {
        satellite
            .elements()
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| ComputationError::Epoch {
                name: satellite.name().to_string(),
                message: e.to_string(),
            })
    }
}

impl Propagator for Sgp4Propagator {
    fn observe(
        &self,
        satellite: &Satellite,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<Observation, ComputationError> {
        let minutes = Self::minutes_since_epoch(satellite, at)?;

        let prediction = satellite
            .constants()
            .propagate(minutes)
            .map_err(|e| ComputationError::Propagation {
                name: satellite.name().to_string(),
                message: e.to_string(),
            })?;

        let observation = look_angles(prediction.position, observer, gmst(at));

        if !(observation.altitude_deg.is_finite()
            && observation.azimuth_deg.is_finite()
            && observation.distance_km.is_finite())
        {
            return Err(ComputationError::Propagation {
                name: satellite.name().to_string(),
                message: "non-finite position".to_string(),
            });
        }

        Ok(observation)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    /// Returns a fixed altitude/azimuth per satellite name; unknown names fail.
    #[derive(Default)]
    pub struct FixedPropagator {
        observations: HashMap<String, Observation>,
    }

    impl FixedPropagator {
        pub fn with(mut self, name: &str, altitude_deg: f64, azimuth_deg: f64) -> Self {
            self.observations.insert(
                name.to_string(),
                Observation {
                    altitude_deg,
                    azimuth_deg,
                    distance_km: 20_200.0,
                },
            );
            self
        }
    }

    impl Propagator for FixedPropagator {
        fn observe(
            &self,
            satellite: &Satellite,
            _observer: &Observer,
            _at: DateTime<Utc>,
        ) -> Result<Observation, ComputationError> {
            self.observations
                .get(satellite.name())
                .copied()
                .ok_or_else(|| ComputationError::Propagation {
                    name: satellite.name().to_string(),
                    message: "no fixed observation".to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures;
    use chrono::TimeZone;

    #[test]
    fn test_minutes_since_epoch() {
        let sat = fixtures::satellite("ISS (ZARYA)");
        let epoch = Utc.from_utc_datetime(&sat.elements().datetime);
        let later = epoch + chrono::Duration::minutes(90);

        let minutes = Sgp4Propagator::minutes_since_epoch(&sat, later).unwrap();
        assert!((minutes.0 - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_sgp4_observation_is_physical() {
        let sat = fixtures::satellite("ISS (ZARYA)");
        let observer = Observer::new(38.478752, -107.877739);
        let at = Utc.from_utc_datetime(&sat.elements().datetime) + chrono::Duration::minutes(30);

        let obs = Sgp4Propagator::new().observe(&sat, &observer, at).unwrap();

        assert!((-90.0..=90.0).contains(&obs.altitude_deg));
        assert!((0.0..360.0).contains(&obs.azimuth_deg));
        // low earth orbit: never farther than the far side of the planet plus altitude
        assert!(obs.distance_km > 300.0 && obs.distance_km < 14_000.0);
    }
}
