mod display;

pub use display::{render, Display};

use crate::core::models::{BestSatellite, Observer, Satellite, TickReport};
use crate::orbit::Propagator;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;

/// Below any physically possible altitude, so the first observed satellite always wins.
const ALTITUDE_FLOOR_DEG: f64 = -90.0;

/// Finds the satellite with the highest altitude at `at`.
///
/// Only a strictly greater altitude replaces the running best, so ties keep the
/// earlier satellite. Satellites that fail to propagate are skipped and counted.
pub fn select_best(
    satellites: &[Satellite],
    propagator: &dyn Propagator,
    observer: &Observer,
    at: DateTime<Utc>,
) -> TickReport {
    let mut best: Option<BestSatellite> = None;
    let mut max_altitude = ALTITUDE_FLOOR_DEG;
    let mut skipped = 0;

    for satellite in satellites {
        let observation = match propagator.observe(satellite, observer, at) {
            Ok(observation) => observation,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping satellite");
                skipped += 1;
                continue;
            }
        };

        if best.is_none() || observation.altitude_deg > max_altitude {
            max_altitude = observation.altitude_deg;
            best = Some(BestSatellite {
                name: satellite.name().to_string(),
                altitude_deg: observation.altitude_deg,
                azimuth_deg: observation.azimuth_deg,
                distance_km: observation.distance_km,
            });
        }
    }

    TickReport {
        best,
        evaluated_at: at,
        evaluated: satellites.len() - skipped,
        skipped,
    }
}

pub struct Tracker<P: Propagator> {
    satellites: Vec<Satellite>,
    propagator: P,
    observer: Observer,
    interval: Duration,
}

impl<P: Propagator> Tracker<P> {
    pub fn new(satellites: Vec<Satellite>, propagator: P, observer: Observer, interval: Duration) -> Self {
        Self {
            satellites,
            propagator,
            observer,
            interval,
        }
    }

    pub fn satellite_count(&self) -> usize {
        self.satellites.len()
    }

    pub fn tick(&self, at: DateTime<Utc>) -> TickReport {
        select_best(&self.satellites, &self.propagator, &self.observer, at)
    }

    /// Ticks and redraws until `shutdown` flips to true (or its sender is dropped).
    pub async fn run<W: Write>(
        &self,
        display: &mut Display<W>,
        mut shutdown: watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        tracing::info!(
            satellites = self.satellites.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Tracking started"
        );

        let mut ticks: u64 = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let report = self.tick(Utc::now());
            if report.skipped > 0 {
                tracing::debug!(skipped = report.skipped, "Some satellites could not be propagated");
            }
            display.update(report.best.as_ref())?;
            ticks += 1;

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Shutdown sender dropped");
                    }
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!(ticks, "Tracking stopped");
        display.stopped()
    }
}
