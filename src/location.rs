// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location.
//!
//! [`Location`] is an immutable value: coordinates, elevation above sea
//! level, and the IANA zone used for every instant computed for it.  Derived
//! quantities (local mean time offset, antimeridian day shift) depend on the
//! date because the zone's standard offset may change over history.
//!
//! Geodesic helpers ([`Location::geodesic_to`], [`Location::rhumb_line_to`])
//! measure the distance and bearing between two locations on the WGS-84
//! ellipsoid.

use crate::error::{Result, ZmanimError};
use chrono::{NaiveDate, TimeDelta, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use std::f64::consts::PI;
use std::fmt;

/// Milliseconds in an hour.
const HOUR_MILLIS: f64 = 3_600_000.0;

/// Milliseconds of local mean time per degree of longitude (4 minutes).
const MILLIS_PER_DEGREE: f64 = 240_000.0;

// WGS-84 ellipsoid.
const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;
const WGS84_SEMI_MINOR: f64 = 6_356_752.3142;
const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Mean Earth radius used by the rhumb-line formulas, in meters.
const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

/// An observer's position and timezone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    timezone: Tz,
}

impl Location {
    /// Create a validated location.
    ///
    /// # Errors
    ///
    /// [`ZmanimError::InvalidLocation`] when latitude is outside `[-90, 90]`,
    /// longitude outside `[-180, 180]`, or elevation is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: Tz,
    ) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ZmanimError::InvalidLocation {
                field: "latitude",
                value: latitude,
                reason: "must be within [-90, 90]",
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ZmanimError::InvalidLocation {
                field: "longitude",
                value: longitude,
                reason: "must be within [-180, 180]",
            });
        }
        if !elevation.is_finite() || elevation < 0.0 {
            return Err(ZmanimError::InvalidLocation {
                field: "elevation",
                value: elevation,
                reason: "must be a finite, non-negative number of meters",
            });
        }
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    /// Create a location from an IANA zone name such as `"America/New_York"`.
    pub fn with_timezone_name(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: &str,
    ) -> Result<Self> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| ZmanimError::UnknownTimezone(timezone.to_string()))?;
        Self::new(name, latitude, longitude, elevation, tz)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation above sea level in meters.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// The zone every computed instant is expressed in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The zone's standard (non-DST) offset from UTC on `date`.
    pub fn raw_offset(&self, date: NaiveDate) -> TimeDelta {
        self.timezone.offset_from_utc_date(&date).base_utc_offset()
    }

    /// Difference between local mean time at this longitude and the zone's
    /// standard time on `date`.
    ///
    /// A location exactly on its zone's meridian returns zero; Lakewood, NJ
    /// (−74.222°) in `America/New_York` (−5 h) is about +3 min 07 s.
    pub fn local_mean_time_offset(&self, date: NaiveDate) -> TimeDelta {
        let longitude_millis = (self.longitude * MILLIS_PER_DEGREE).round() as i64;
        TimeDelta::milliseconds(longitude_millis) - self.raw_offset(date)
    }

    /// Day shift needed when the assigned zone is on the far side of the
    /// antimeridian from the true solar position.
    ///
    /// Returns `1` when local mean time runs 20 h or more ahead of the zone,
    /// `-1` when it runs 20 h or more behind, and `0` otherwise.
    pub fn antimeridian_adjustment(&self, date: NaiveDate) -> i64 {
        let offset = self.local_mean_time_offset(date);
        let hours = offset.num_milliseconds() as f64 / HOUR_MILLIS;
        if hours >= 20.0 {
            1
        } else if hours <= -20.0 {
            -1
        } else {
            0
        }
    }

    /// Geodesic distance and bearings to `destination` (Vincenty inverse).
    ///
    /// Returns `None` when the iteration fails to converge, which only happens
    /// for nearly antipodal points.
    pub fn geodesic_to(&self, destination: &Location) -> Option<Geodesic> {
        vincenty_inverse(
            self.latitude,
            self.longitude,
            destination.latitude,
            destination.longitude,
        )
    }

    /// Constant-bearing (loxodrome) course to `destination`.
    pub fn rhumb_line_to(&self, destination: &Location) -> RhumbLine {
        let lat1 = self.latitude.to_radians();
        let lat2 = destination.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_phi = ((lat2 / 2.0 + PI / 4.0).tan() / (lat1 / 2.0 + PI / 4.0).tan()).ln();

        let mut d_lon = (destination.longitude - self.longitude).to_radians();
        if d_lon.abs() > PI {
            d_lon = if d_lon > 0.0 {
                -(2.0 * PI - d_lon)
            } else {
                2.0 * PI + d_lon
            };
        }
        let bearing = d_lon.atan2(d_phi).to_degrees();

        let q = if d_lat.abs() > 1e-10 {
            d_lat / d_phi
        } else {
            lat1.cos()
        };
        let distance = (d_lat * d_lat + q * q * d_lon * d_lon).sqrt() * MEAN_EARTH_RADIUS;

        RhumbLine { distance, bearing }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4}, {} m, {})",
            self.name,
            self.latitude,
            self.longitude,
            self.elevation,
            self.timezone.name()
        )
    }
}

/// Result of the Vincenty inverse problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodesic {
    /// Ellipsoidal distance in meters.
    pub distance: f64,
    /// Forward azimuth at the origin, degrees clockwise from north.
    pub initial_bearing: f64,
    /// Forward azimuth on arrival, degrees clockwise from north.
    pub final_bearing: f64,
}

/// A loxodrome between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhumbLine {
    /// Distance along the rhumb line in meters.
    pub distance: f64,
    /// Constant bearing in degrees, `(-180, 180]`.
    pub bearing: f64,
}

fn vincenty_inverse(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<Geodesic> {
    let a = WGS84_SEMI_MAJOR;
    let b = WGS84_SEMI_MINOR;
    let f = WGS84_FLATTENING;

    let l = (lon2 - lon1).to_radians();
    let u1 = ((1.0 - f) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut lambda_prev = 2.0 * PI;
    let mut iterations_left = 20;

    let mut sin_lambda;
    let mut cos_lambda;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 0.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 0.0;
    let mut cos_2sigma_m = 0.0;

    loop {
        if (lambda - lambda_prev).abs() <= 1e-12 {
            break;
        }
        iterations_left -= 1;
        if iterations_left == 0 {
            return None;
        }

        sin_lambda = lambda.sin();
        cos_lambda = lambda.cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(Geodesic {
                distance: 0.0,
                initial_bearing: 0.0,
                final_bearing: 0.0,
            });
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha;
        if cos_2sigma_m.is_nan() {
            // equatorial line
            cos_2sigma_m = 0.0;
        }
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));
    }

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a =
        1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let initial_bearing = (cos_u2 * sin_lambda)
        .atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda)
        .to_degrees();
    let final_bearing = (cos_u1 * sin_lambda)
        .atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda)
        .to_degrees();

    Some(Geodesic {
        distance: b * big_a * (sigma - delta_sigma),
        initial_bearing,
        final_bearing,
    })
}
