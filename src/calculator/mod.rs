// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar position calculators.
//!
//! A [`SolarCalculator`] answers one question: at what UTC hour on a given
//! date does the sun's centre cross a given zenith angle at a given location?
//! Two strategies are provided:
//!
//! | Strategy | Algorithm | True transit |
//! |----------|-----------|--------------|
//! | [`NoaaCalculator`] | NOAA spreadsheet / Meeus, two-pass equation of time | yes |
//! | [`UsnoCalculator`] | USNO *Almanac for Computers* (1990) | no |
//!
//! The strategy is chosen by configuration through [`CalculatorKind`], never
//! by inspecting the calculator at runtime.
//!
//! All results are fractional hours in `[0, 24)`.  `None` means the sun never
//! reaches the requested zenith on that date (polar day or night).

mod noaa;
mod usno;

pub use noaa::NoaaCalculator;
pub use usno::UsnoCalculator;

use crate::location::Location;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// Zenith of the geometric horizon.
pub const GEOMETRIC_ZENITH: f64 = 90.0;

/// Sun 6° below the horizon.
pub const CIVIL_ZENITH: f64 = 96.0;

/// Sun 12° below the horizon.
pub const NAUTICAL_ZENITH: f64 = 102.0;

/// Sun 18° below the horizon.
pub const ASTRONOMICAL_ZENITH: f64 = 108.0;

/// Average apparent solar radius, in degrees (16 arc-minutes).
pub const SOLAR_RADIUS: f64 = 16.0 / 60.0;

/// Standard atmospheric refraction at the horizon, in degrees (34 arc-minutes).
pub const REFRACTION: f64 = 34.0 / 60.0;

/// Polar radius of the Earth in kilometers, used for the horizon dip.
const EARTH_RADIUS_KM: f64 = 6_356.9;

/// Capability computing UTC sun-crossing times.
///
/// Implementors must return `None` rather than panicking or yielding `NaN`
/// when the sun does not reach the zenith on the requested date.
pub trait SolarCalculator: fmt::Debug + Send + Sync {
    /// Descriptive name of the algorithm.
    fn name(&self) -> &'static str;

    /// UTC hour at which the sun rises through `zenith` on `date`.
    fn utc_sunrise(
        &self,
        date: NaiveDate,
        location: &Location,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> Option<f64>;

    /// UTC hour at which the sun sets through `zenith` on `date`.
    fn utc_sunset(
        &self,
        date: NaiveDate,
        location: &Location,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> Option<f64>;

    /// UTC hour of the sun's upper transit, when the algorithm can compute it.
    fn utc_noon(&self, date: NaiveDate, location: &Location) -> Option<f64>;

    /// UTC hour of the lower transit following `date`'s noon.
    fn utc_midnight(&self, _date: NaiveDate, _location: &Location) -> Option<f64> {
        None
    }
}

/// Which calculator strategy to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CalculatorKind {
    /// [`NoaaCalculator`].
    #[default]
    Noaa,
    /// [`UsnoCalculator`].
    Usno,
}

impl CalculatorKind {
    /// Instantiate the selected strategy.
    pub fn calculator(self) -> Arc<dyn SolarCalculator> {
        match self {
            CalculatorKind::Noaa => Arc::new(NoaaCalculator),
            CalculatorKind::Usno => Arc::new(UsnoCalculator),
        }
    }
}

/// Dip of the visible horizon for an observer `elevation` meters up, in degrees.
pub fn elevation_adjustment(elevation: f64) -> f64 {
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + elevation / 1000.0))
        .acos()
        .to_degrees()
}

/// Zenith actually used for a sunrise/sunset computation.
///
/// Only the geometric zenith is corrected (solar radius, refraction, horizon
/// dip).  Twilight zeniths describe a sky brightness, not the visible
/// horizon, and are returned unchanged.
pub fn adjust_zenith(zenith: f64, elevation: f64) -> f64 {
    if zenith == GEOMETRIC_ZENITH {
        zenith + SOLAR_RADIUS + REFRACTION + elevation_adjustment(elevation)
    } else {
        zenith
    }
}

/// Fold an hour value into `[0, 24)`, mapping `NaN` to `None`.
pub(crate) fn normalize_hours(hours: f64) -> Option<f64> {
    if !hours.is_finite() {
        return None;
    }
    Some(hours.rem_euclid(24.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_adds_radius_and_refraction() {
        let z = adjust_zenith(GEOMETRIC_ZENITH, 0.0);
        assert!((z - 90.833_333).abs() < 1e-6);
    }

    #[test]
    fn elevation_raises_zenith() {
        let sea = adjust_zenith(GEOMETRIC_ZENITH, 0.0);
        let high = adjust_zenith(GEOMETRIC_ZENITH, 800.0);
        // ~0.9 degrees of dip at 800 m
        assert!(high - sea > 0.85 && high - sea < 0.95, "{}", high - sea);
    }

    #[test]
    fn twilight_zeniths_are_not_adjusted() {
        for z in [CIVIL_ZENITH, NAUTICAL_ZENITH, ASTRONOMICAL_ZENITH, 106.1] {
            assert_eq!(adjust_zenith(z, 1_000.0), z);
        }
    }

    #[test]
    fn normalize_hours_wraps() {
        assert_eq!(normalize_hours(25.5), Some(1.5));
        assert_eq!(normalize_hours(-1.0), Some(23.0));
        assert_eq!(normalize_hours(f64::NAN), None);
    }

    #[test]
    fn kinds_build_named_calculators() {
        assert_eq!(CalculatorKind::default(), CalculatorKind::Noaa);
        assert_eq!(CalculatorKind::Noaa.calculator().name(), NoaaCalculator.name());
        assert_eq!(CalculatorKind::Usno.calculator().name(), UsnoCalculator.name());
    }
}
