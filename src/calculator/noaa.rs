// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! NOAA solar calculator.
//!
//! Implements the algorithm of the NOAA Solar Calculator spreadsheet, itself
//! based on Jean Meeus, *Astronomical Algorithms* (2nd ed.).  Event times are
//! refined in two passes: the first evaluates the sun's declination and the
//! equation of time at solar noon, the second re-evaluates them at the
//! approximate event time.
//!
//! Longitudes inside the formulas are **west positive**, as in the original
//! spreadsheet; the public API takes east-positive [`Location`] values and
//! flips the sign once at the boundary.

use super::{adjust_zenith, normalize_hours, SolarCalculator};
use crate::julian::JulianDay;
use crate::location::Location;
use chrono::NaiveDate;

/// NOAA / Meeus calculator.  Stateless.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoaaCalculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Sunrise,
    Sunset,
}

impl SolarCalculator for NoaaCalculator {
    fn name(&self) -> &'static str {
        "US National Oceanic and Atmospheric Administration Algorithm"
    }

    fn utc_sunrise(
        &self,
        date: NaiveDate,
        location: &Location,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> Option<f64> {
        let elevation = if adjust_for_elevation {
            location.elevation()
        } else {
            0.0
        };
        let zenith = adjust_zenith(zenith, elevation);
        let minutes = sun_rise_set_utc(
            JulianDay::from_date(date),
            location.latitude(),
            -location.longitude(),
            zenith,
            Event::Sunrise,
        )?;
        normalize_hours(minutes / 60.0)
    }

    fn utc_sunset(
        &self,
        date: NaiveDate,
        location: &Location,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> Option<f64> {
        let elevation = if adjust_for_elevation {
            location.elevation()
        } else {
            0.0
        };
        let zenith = adjust_zenith(zenith, elevation);
        let minutes = sun_rise_set_utc(
            JulianDay::from_date(date),
            location.latitude(),
            -location.longitude(),
            zenith,
            Event::Sunset,
        )?;
        normalize_hours(minutes / 60.0)
    }

    fn utc_noon(&self, date: NaiveDate, location: &Location) -> Option<f64> {
        let minutes = solar_noon_utc(JulianDay::from_date(date), -location.longitude());
        normalize_hours(minutes / 60.0)
    }

    fn utc_midnight(&self, date: NaiveDate, location: &Location) -> Option<f64> {
        let minutes = solar_midnight_utc(JulianDay::from_date(date), -location.longitude());
        normalize_hours(minutes / 60.0)
    }
}

/// Minutes after 0h UTC of the solar event, or `None` if the sun never
/// reaches `zenith`.
fn sun_rise_set_utc(
    julian_day: JulianDay,
    latitude: f64,
    longitude: f64,
    zenith: f64,
    event: Event,
) -> Option<f64> {
    // first pass at solar noon
    let noon_minutes = solar_noon_utc(julian_day, longitude);
    let t_noon = julian_day.plus_minutes(noon_minutes).julian_centuries();
    let time_utc = event_minutes(t_noon, latitude, longitude, zenith, event)?;

    // second pass at the approximate event time
    let t_event = julian_day.plus_minutes(time_utc).julian_centuries();
    event_minutes(t_event, latitude, longitude, zenith, event)
}

fn event_minutes(t: f64, latitude: f64, longitude: f64, zenith: f64, event: Event) -> Option<f64> {
    let equation_of_time = equation_of_time(t);
    let declination = sun_declination(t);
    let hour_angle = sun_hour_angle(latitude, declination, zenith, event)?;
    let delta = longitude - hour_angle.to_degrees();
    Some(720.0 + 4.0 * delta - equation_of_time)
}

/// Minutes after 0h UTC of the sun's upper transit.
fn solar_noon_utc(julian_day: JulianDay, longitude: f64) -> f64 {
    transit_utc(julian_day, longitude, 720.0)
}

/// Minutes after 0h UTC of the lower transit following noon (may exceed 1440).
fn solar_midnight_utc(julian_day: JulianDay, longitude: f64) -> f64 {
    transit_utc(julian_day + qtty::Days::new(0.5), longitude, 1_440.0)
}

fn transit_utc(julian_day: JulianDay, longitude: f64, base_minutes: f64) -> f64 {
    let t = julian_day.plus_minutes(longitude * 4.0).julian_centuries();
    let first_guess = longitude * 4.0 - equation_of_time(t);
    let t = julian_day.plus_minutes(first_guess).julian_centuries();
    base_minutes + longitude * 4.0 - equation_of_time(t)
}

/// Hour angle of the sun at `zenith`, in radians; negative for sunset.
fn sun_hour_angle(latitude: f64, declination: f64, zenith: f64, event: Event) -> Option<f64> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let cos_hour_angle =
        zenith.to_radians().cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan();
    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return None;
    }
    let hour_angle = cos_hour_angle.acos();
    Some(match event {
        Event::Sunrise => hour_angle,
        Event::Sunset => -hour_angle,
    })
}

fn geometric_mean_longitude(t: f64) -> f64 {
    (280.46646 + t * (36_000.76983 + 0.000_3032 * t)).rem_euclid(360.0)
}

fn geometric_mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35_999.05029 - 0.000_1537 * t)
}

fn earth_orbit_eccentricity(t: f64) -> f64 {
    0.016_708_634 - t * (0.000_042_037 + 0.000_000_1267 * t)
}

fn equation_of_center(t: f64) -> f64 {
    let m = geometric_mean_anomaly(t).to_radians();
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = geometric_mean_longitude(t) + equation_of_center(t);
    let omega = 125.04 - 1934.136 * t;
    true_longitude - 0.00569 - 0.00478 * omega.to_radians().sin()
}

fn mean_obliquity_of_ecliptic(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

fn obliquity_correction(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    mean_obliquity_of_ecliptic(t) + 0.00256 * omega.to_radians().cos()
}

fn sun_declination(t: f64) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in minutes.
fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let l0 = geometric_mean_longitude(t).to_radians();
    let e = earth_orbit_eccentricity(t);
    let m = geometric_mean_anomaly(t).to_radians();

    let y = (epsilon / 2.0).tan().powi(2);
    let equation = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    equation.to_degrees() * 4.0
}
