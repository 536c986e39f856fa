use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named satellite with its SGP4 elements and precomputed propagation constants.
pub struct Satellite {
    name: String,
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Satellite {
    pub fn from_elements(name: String, elements: sgp4::Elements) -> Result<Self, sgp4::ElementsError> {
        let constants = sgp4::Constants::from_elements(&elements)?;
        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &sgp4::Elements {
        &self.elements
    }

    pub fn constants(&self) -> &sgp4::Constants {
        &self.constants
    }
}

impl std::fmt::Debug for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_m: 0.0,
        }
    }
}

/// Look angles of one satellite from the observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSatellite {
    pub name: String,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub best: Option<BestSatellite>,
    pub evaluated_at: DateTime<Utc>,
    pub evaluated: usize,
    pub skipped: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Satellite;

    pub const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    pub const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    // medium earth orbit, negligible drag: propagates cleanly years past its epoch
    pub const GPS_LINE1: &str =
        "1 24876U 97035A   24150.50000000  .00000040  00000-0  00000+0 0  9991";
    pub const GPS_LINE2: &str =
        "2 24876  55.5000 100.0000 0050000  50.0000 310.0000  2.00560000196008";

    /// Builds a satellite from a fixed element set under an arbitrary name.
    pub fn satellite(name: &str) -> Satellite {
        let elements = sgp4::Elements::from_tle(
            Some(name.to_string()),
            ISS_LINE1.as_bytes(),
            ISS_LINE2.as_bytes(),
        )
        .unwrap();
        Satellite::from_elements(name.to_string(), elements).unwrap()
    }
}
