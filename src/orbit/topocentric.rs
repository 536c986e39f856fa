use crate::core::models::{Observation, Observer};
use chrono::{DateTime, Utc};
use std::f64::consts::{PI, TAU};

// WGS84 flattening; the equatorial radius comes from sgp4::WGS84
const FLATTENING: f64 = 1.0 / 298.257223563;

/// Greenwich mean sidereal time in radians, in `[0, 2π)`.
pub fn gmst(at: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc())).rem_euclid(TAU)
}

/// Observer position in the TEME frame (km) for the given sidereal angle.
pub fn observer_position(observer: &Observer, gmst: f64) -> [f64; 3] {
    let lat = observer.latitude.to_radians();
    let theta = (gmst + observer.longitude.to_radians()).rem_euclid(TAU);
    let alt_km = observer.altitude_m / 1000.0;

    let c = 1.0 / (1.0 + FLATTENING * (FLATTENING - 2.0) * lat.sin().powi(2)).sqrt();
    let s = (1.0 - FLATTENING).powi(2) * c;
    let achcp = (sgp4::WGS84.ae * c + alt_km) * lat.cos();

    [
        achcp * theta.cos(),
        achcp * theta.sin(),
        (sgp4::WGS84.ae * s + alt_km) * lat.sin(),
    ]
}

/// Altitude, azimuth (clockwise from north) and range of a TEME position as seen by `observer`.
pub fn look_angles(satellite: [f64; 3], observer: &Observer, gmst: f64) -> Observation {
    let site = observer_position(observer, gmst);
    let range = [
        satellite[0] - site[0],
        satellite[1] - site[1],
        satellite[2] - site[2],
    ];
    let distance = (range[0].powi(2) + range[1].powi(2) + range[2].powi(2)).sqrt();

    let lat = observer.latitude.to_radians();
    let theta = (gmst + observer.longitude.to_radians()).rem_euclid(TAU);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    let top_s = sin_lat * cos_theta * range[0] + sin_lat * sin_theta * range[1] - cos_lat * range[2];
    let top_e = -sin_theta * range[0] + cos_theta * range[1];
    let top_z = cos_lat * cos_theta * range[0] + cos_lat * sin_theta * range[1] + sin_lat * range[2];

    let mut azimuth = top_e.atan2(-top_s);
    if azimuth < 0.0 {
        azimuth += 2.0 * PI;
    }
    let elevation = (top_z / distance).clamp(-1.0, 1.0).asin();

    Observation {
        altitude_deg: elevation.to_degrees(),
        azimuth_deg: azimuth.to_degrees() % 360.0,
        distance_km: distance,
    }
}
