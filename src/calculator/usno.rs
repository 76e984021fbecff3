// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! USNO solar calculator.
//!
//! Implementation of the sunrise/sunset algorithm published in the
//! *Almanac for Computers* (1990) by the Nautical Almanac Office of the
//! United States Naval Observatory.  It works from the day of the year and
//! an approximate event time and does not compute a true transit, so
//! [`SolarCalculator::utc_noon`] returns `None`.

use super::{adjust_zenith, normalize_hours, SolarCalculator};
use crate::location::Location;
use chrono::{Datelike, NaiveDate};

/// USNO *Almanac for Computers* calculator.  Stateless.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UsnoCalculator;

const DEG_PER_HOUR: f64 = 360.0 / 24.0;

impl SolarCalculator for UsnoCalculator {
    fn name(&self) -> &'static str {
        "US Naval Almanac Algorithm"
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
        time_utc(date, location, zenith, true)
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
        time_utc(date, location, zenith, false)
    }

    fn utc_noon(&self, _date: NaiveDate, _location: &Location) -> Option<f64> {
        None
    }
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

fn time_utc(date: NaiveDate, location: &Location, zenith: f64, is_sunrise: bool) -> Option<f64> {
    let day_of_year = f64::from(date.ordinal());
    let longitude_hour = location.longitude() / DEG_PER_HOUR;

    // approximate time of the event, in days
    let t = if is_sunrise {
        day_of_year + (6.0 - longitude_hour) / 24.0
    } else {
        day_of_year + (18.0 - longitude_hour) / 24.0
    };

    let mean_anomaly = 0.9856 * t - 3.289;
    let true_longitude = (mean_anomaly
        + 1.916 * sin_deg(mean_anomaly)
        + 0.020 * sin_deg(2.0 * mean_anomaly)
        + 282.634)
        .rem_euclid(360.0);

    // right ascension in the same quadrant as the true longitude, in hours
    let mut right_ascension = (0.91764 * true_longitude.to_radians().tan())
        .atan()
        .to_degrees()
        .rem_euclid(360.0);
    let longitude_quadrant = (true_longitude / 90.0).floor() * 90.0;
    let ascension_quadrant = (right_ascension / 90.0).floor() * 90.0;
    right_ascension += longitude_quadrant - ascension_quadrant;
    let right_ascension = right_ascension / DEG_PER_HOUR;

    let sin_declination = 0.39782 * sin_deg(true_longitude);
    let cos_declination = sin_declination.asin().cos();

    let cos_local_hour_angle = (cos_deg(zenith) - sin_declination * sin_deg(location.latitude()))
        / (cos_declination * cos_deg(location.latitude()));
    if !(-1.0..=1.0).contains(&cos_local_hour_angle) {
        return None;
    }
    let hour_angle = cos_local_hour_angle.acos().to_degrees();
    let hour_angle = if is_sunrise {
        360.0 - hour_angle
    } else {
        hour_angle
    } / DEG_PER_HOUR;

    let local_mean_time = hour_angle + right_ascension - 0.06571 * t - 6.622;
    normalize_hours(local_mean_time - longitude_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{NoaaCalculator, GEOMETRIC_ZENITH};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minutes_apart(a: f64, b: f64) -> f64 {
        let diff = (a - b).rem_euclid(24.0);
        diff.min(24.0 - diff) * 60.0
    }

    #[test]
    fn agrees_with_noaa_within_a_couple_of_minutes() {
        let places = [
            Location::new("Lakewood", 40.096, -74.222, 0.0, chrono_tz::America::New_York),
            Location::new("Jerusalem", 31.778, 35.2354, 0.0, chrono_tz::Asia::Jerusalem),
            Location::new("Tokyo", 35.6895, 139.6917, 0.0, chrono_tz::Asia::Tokyo),
            Location::new("Sydney", -33.8688, 151.2093, 0.0, chrono_tz::Australia::Sydney),
        ];
        let dates = [date(2024, 3, 1), date(2024, 6, 21), date(2024, 12, 21)];
        for location in places.iter().map(|l| l.as_ref().unwrap()) {
            for &d in &dates {
                for zenith in [GEOMETRIC_ZENITH, 96.0, 106.1] {
                    let usno = UsnoCalculator.utc_sunrise(d, location, zenith, false).unwrap();
                    let noaa = NoaaCalculator.utc_sunrise(d, location, zenith, false).unwrap();
                    assert!(
                        minutes_apart(usno, noaa) < 2.0,
                        "{} {d} sunrise@{zenith}: {usno} vs {noaa}",
                        location.name()
                    );
                    let usno = UsnoCalculator.utc_sunset(d, location, zenith, false).unwrap();
                    let noaa = NoaaCalculator.utc_sunset(d, location, zenith, false).unwrap();
                    assert!(
                        minutes_apart(usno, noaa) < 2.0,
                        "{} {d} sunset@{zenith}: {usno} vs {noaa}",
                        location.name()
                    );
                }
            }
        }
    }

    #[test]
    fn no_true_transit() {
        let location = Location::new("Lakewood", 40.096, -74.222, 0.0, chrono_tz::UTC).unwrap();
        assert_eq!(UsnoCalculator.utc_noon(date(2024, 3, 1), &location), None);
        assert_eq!(UsnoCalculator.utc_midnight(date(2024, 3, 1), &location), None);
    }

    #[test]
    fn polar_night_is_undefined() {
        let location = Location::new("Alert", 81.74, -64.0, 0.0, chrono_tz::UTC).unwrap();
        assert_eq!(
            UsnoCalculator.utc_sunrise(date(2024, 12, 21), &location, GEOMETRIC_ZENITH, false),
            None
        );
    }
}
