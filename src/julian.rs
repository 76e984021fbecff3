// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day numbers for the solar-position formulas.
//!
//! [`JulianDay`] stores a single [`Days`] quantity counted from the Julian
//! Period epoch.  The NOAA formulas work in Julian centuries since J2000.0 and
//! add fractional days (minutes after midnight) to a date's 0h Julian Day, so
//! those are the only conversions provided here.

use chrono::{Datelike, NaiveDate};
use qtty::*;
use std::ops::{Add, Sub};

/// A Julian Day number (days since −4712-01-01 12:00, proleptic Julian).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Minutes in a day, for converting minute offsets into day fractions.
    pub const MINUTES_PER_DAY: f64 = 1_440.0;

    /// Create from a raw Julian Day value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Julian Day at 0h UT of a proleptic Gregorian date (Meeus, ch. 7).
    pub fn from_date(date: NaiveDate) -> Self {
        let mut year = date.year();
        let mut month = date.month() as i32;
        let day = date.day() as f64;
        if month <= 2 {
            year -= 1;
            month += 12;
        }
        let a = year.div_euclid(100);
        let b = 2 - a + a.div_euclid(4);
        Self::new(
            (365.25 * f64::from(year + 4716)).floor()
                + (30.6001 * f64::from(month + 1)).floor()
                + day
                + f64::from(b)
                - 1524.5,
        )
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        ((*self - Self::J2000) / Self::JULIAN_CENTURY)
            .simplify()
            .value()
    }

    /// This day shifted by a number of minutes.
    #[inline]
    pub fn plus_minutes(self, minutes: f64) -> Self {
        self + Days::new(minutes / Self::MINUTES_PER_DAY)
    }
}

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self {
            quantity: self.quantity + rhs,
        }
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Julian Day: {}", self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn j2000_midnight() {
        let jd = JulianDay::from_date(date(2000, 1, 1));
        assert_eq!(jd.value(), 2_451_544.5);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957-10-04 0h -> 2436115.5 (Sputnik 1 was 19:26 on that date)
        assert_eq!(JulianDay::from_date(date(1957, 10, 4)).value(), 2_436_115.5);
    }

    #[test]
    fn january_and_february_use_previous_year() {
        assert_eq!(JulianDay::from_date(date(2024, 2, 29)).value(), 2_460_369.5);
        assert_eq!(JulianDay::from_date(date(2024, 3, 1)).value(), 2_460_370.5);
    }

    #[test]
    fn centuries_since_j2000() {
        assert_eq!(JulianDay::J2000.julian_centuries(), 0.0);
        let jd = JulianDay::new(2_451_545.0 + 36_525.0 * 2.0);
        assert!((jd.julian_centuries() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn plus_minutes_adds_day_fractions() {
        let jd = JulianDay::new(2_451_545.0).plus_minutes(720.0);
        assert!((jd.value() - 2_451_545.5).abs() < 1e-12);
        let back: Days = jd - JulianDay::J2000;
        assert!((back.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn display_mentions_julian_day() {
        assert!(JulianDay::J2000.to_string().contains("Julian Day"));
    }
}
