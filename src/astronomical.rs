// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomical calendar.
//!
//! [`AstronomicalCalendar`] binds a [`Location`], a [`SolarCalculator`] and a
//! mutable current date, and turns the calculator's fractional UTC hours into
//! instants in the location's zone.
//!
//! ## Day boundaries
//!
//! A UTC hour alone does not say on which civil day an event falls.  Events
//! are anchored on the *working date*: the current date shifted by the
//! location's antimeridian adjustment.  A sunrise whose longitude-derived
//! local hour would be past 18:00 belongs to the previous UTC day, and a
//! sunset before 06:00 to the next.  Callers never see the adjustment.
//!
//! ## Elevation
//!
//! Only the geometric horizon (zenith 90°) is corrected for elevation.
//! Twilight zeniths model ambient light and are never adjusted.

use crate::calculator::{
    CalculatorKind, SolarCalculator, ASTRONOMICAL_ZENITH, CIVIL_ZENITH, GEOMETRIC_ZENITH,
    NAUTICAL_ZENITH,
};
use crate::location::Location;
use crate::span::{self, DaySpan};
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{trace, warn};

const HOUR_MILLIS: f64 = 3_600_000.0;

/// Solar event an instant is attached to; drives the day-rollover rule of
/// [`AstronomicalCalendar::date_from_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolarEvent {
    /// Morning side of the day: dawn, sunrise.
    Sunrise,
    /// Upper transit.
    Noon,
    /// Evening side of the day: sunset, nightfall.
    Sunset,
    /// Lower transit following the date's noon.
    Midnight,
}

/// Sun-relative instants for one location on a mutable date.
///
/// Every getter recomputes from scratch.  Clone the calendar to evaluate
/// several dates in parallel.
#[derive(Debug, Clone)]
pub struct AstronomicalCalendar {
    location: Location,
    calculator: Arc<dyn SolarCalculator>,
    date: NaiveDate,
    use_elevation: bool,
}

impl AstronomicalCalendar {
    /// Calendar using the default (NOAA) calculator, at sea level.
    pub fn new(location: Location, date: NaiveDate) -> Self {
        Self::with_calculator(location, date, CalculatorKind::default().calculator())
    }

    /// Calendar using an explicit calculator strategy.
    pub fn with_calculator(
        location: Location,
        date: NaiveDate,
        calculator: Arc<dyn SolarCalculator>,
    ) -> Self {
        Self {
            location,
            calculator,
            date,
            use_elevation: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // State
    // ═══════════════════════════════════════════════════════════════════

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn calculator(&self) -> &dyn SolarCalculator {
        self.calculator.as_ref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn use_elevation(&self) -> bool {
        self.use_elevation
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_use_elevation(&mut self, use_elevation: bool) {
        self.use_elevation = use_elevation;
    }

    pub fn set_calculator(&mut self, calculator: Arc<dyn SolarCalculator>) {
        self.calculator = calculator;
    }

    /// The current date shifted across the antimeridian when the zone
    /// disagrees with the longitude by 20 hours or more.
    fn working_date(&self) -> Option<NaiveDate> {
        let adjustment = self.location.antimeridian_adjustment(self.date);
        self.date.checked_add_signed(TimeDelta::days(adjustment))
    }

    // ═══════════════════════════════════════════════════════════════════
    // UTC hours
    // ═══════════════════════════════════════════════════════════════════

    /// UTC hour of sunrise at `zenith`, elevation-adjusted when the flag is set.
    pub fn utc_sunrise(&self, zenith: f64) -> Option<f64> {
        self.utc_sunrise_at(zenith, self.use_elevation)
    }

    /// UTC hour of sunrise at `zenith`, ignoring elevation.
    pub fn utc_sea_level_sunrise(&self, zenith: f64) -> Option<f64> {
        self.utc_sunrise_at(zenith, false)
    }

    /// UTC hour of sunset at `zenith`, elevation-adjusted when the flag is set.
    pub fn utc_sunset(&self, zenith: f64) -> Option<f64> {
        self.utc_sunset_at(zenith, self.use_elevation)
    }

    /// UTC hour of sunset at `zenith`, ignoring elevation.
    pub fn utc_sea_level_sunset(&self, zenith: f64) -> Option<f64> {
        self.utc_sunset_at(zenith, false)
    }

    fn utc_sunrise_at(&self, zenith: f64, use_elevation: bool) -> Option<f64> {
        self.calculator
            .utc_sunrise(self.working_date()?, &self.location, zenith, use_elevation)
    }

    fn utc_sunset_at(&self, zenith: f64, use_elevation: bool) -> Option<f64> {
        self.calculator
            .utc_sunset(self.working_date()?, &self.location, zenith, use_elevation)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Instants
    // ═══════════════════════════════════════════════════════════════════

    /// Convert a UTC hour on the working date into an instant in the
    /// location's zone.
    ///
    /// `hours` may lie outside `[0, 24)`; the excess carries into the
    /// neighbouring day.  The day then rolls back for a morning event whose
    /// longitude-derived local hour is past 18, and forward for an evening
    /// event before 6 (or a midnight before 12).
    pub fn date_from_time(&self, hours: f64, event: SolarEvent) -> Option<DateTime<Tz>> {
        if !hours.is_finite() {
            return None;
        }
        let whole_hours = hours.trunc() as i64;
        let local_time_hours = (self.location.longitude() / 15.0).trunc() as i64;
        let local_hour = local_time_hours.saturating_add(whole_hours);
        let day_shift = match event {
            SolarEvent::Sunrise if local_hour > 18 => -1,
            SolarEvent::Sunset | SolarEvent::Noon if local_hour < 6 => 1,
            SolarEvent::Midnight if local_hour < 12 => 1,
            _ => 0,
        };

        let date = self
            .working_date()?
            .checked_add_signed(TimeDelta::days(day_shift))?;
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
        let instant = midnight.checked_add_signed(span::minutes(hours * 60.0)?)?;
        Some(instant.with_timezone(&self.location.timezone()))
    }

    /// Sunrise, elevation-adjusted when the flag is set.
    pub fn sunrise(&self) -> Option<DateTime<Tz>> {
        self.sunrise_with_elevation(self.use_elevation)
    }

    /// Sunrise with an explicit elevation choice, regardless of the flag.
    pub fn sunrise_with_elevation(&self, use_elevation: bool) -> Option<DateTime<Tz>> {
        let hours = self.utc_sunrise_at(GEOMETRIC_ZENITH, use_elevation)?;
        self.date_from_time(hours, SolarEvent::Sunrise)
    }

    pub fn sea_level_sunrise(&self) -> Option<DateTime<Tz>> {
        self.sunrise_with_elevation(false)
    }

    /// Sunset, elevation-adjusted when the flag is set.
    pub fn sunset(&self) -> Option<DateTime<Tz>> {
        self.sunset_with_elevation(self.use_elevation)
    }

    /// Sunset with an explicit elevation choice, regardless of the flag.
    pub fn sunset_with_elevation(&self, use_elevation: bool) -> Option<DateTime<Tz>> {
        let hours = self.utc_sunset_at(GEOMETRIC_ZENITH, use_elevation)?;
        self.date_from_time(hours, SolarEvent::Sunset)
    }

    pub fn sea_level_sunset(&self) -> Option<DateTime<Tz>> {
        self.sunset_with_elevation(false)
    }

    /// Morning instant when the sun's centre is at `zenith`.
    pub fn sunrise_offset_by_degrees(&self, zenith: f64) -> Option<DateTime<Tz>> {
        let hours = self.utc_sunrise(zenith)?;
        self.date_from_time(hours, SolarEvent::Sunrise)
    }

    /// Evening instant when the sun's centre is at `zenith`.
    pub fn sunset_offset_by_degrees(&self, zenith: f64) -> Option<DateTime<Tz>> {
        let hours = self.utc_sunset(zenith)?;
        self.date_from_time(hours, SolarEvent::Sunset)
    }

    pub fn begin_civil_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(CIVIL_ZENITH)
    }

    pub fn begin_nautical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(NAUTICAL_ZENITH)
    }

    pub fn begin_astronomical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }

    pub fn end_civil_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(CIVIL_ZENITH)
    }

    pub fn end_nautical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(NAUTICAL_ZENITH)
    }

    pub fn end_astronomical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Proportional hours and transits
    // ═══════════════════════════════════════════════════════════════════

    /// A twelfth of the sea-level day.
    pub fn temporal_hour(&self) -> Option<TimeDelta> {
        Self::temporal_hour_between(self.sea_level_sunrise(), self.sea_level_sunset())
    }

    /// `(end - start) / 12`, or `None` if either boundary is undefined.
    pub fn temporal_hour_between(
        start: Option<DateTime<Tz>>,
        end: Option<DateTime<Tz>>,
    ) -> Option<TimeDelta> {
        DaySpan::from_bounds(start, end).map(|span| span.temporal_hour())
    }

    /// Astronomical noon.
    ///
    /// Calculators without a true transit fall back on the midpoint of
    /// sea-level sunrise and sunset.
    pub fn sun_transit(&self) -> Option<DateTime<Tz>> {
        match self
            .working_date()
            .and_then(|date| self.calculator.utc_noon(date, &self.location))
        {
            Some(hours) => self.date_from_time(hours, SolarEvent::Noon),
            None => Self::sun_transit_between(self.sea_level_sunrise(), self.sea_level_sunset()),
        }
    }

    /// Six proportional hours after `start`.
    pub fn sun_transit_between(
        start: Option<DateTime<Tz>>,
        end: Option<DateTime<Tz>>,
    ) -> Option<DateTime<Tz>> {
        DaySpan::from_bounds(start, end).map(|span| span.midpoint())
    }

    /// Lower transit following the current date's noon.
    ///
    /// Falls back on transit + 12 h when the calculator cannot compute it.
    pub fn solar_midnight(&self) -> Option<DateTime<Tz>> {
        match self
            .working_date()
            .and_then(|date| self.calculator.utc_midnight(date, &self.location))
        {
            Some(hours) => self.date_from_time(hours, SolarEvent::Midnight),
            None => Self::time_offset(self.sun_transit(), TimeDelta::hours(12)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Local mean time
    // ═══════════════════════════════════════════════════════════════════

    /// The instant on the current date when local mean time at the
    /// location's longitude reads `hours`.
    ///
    /// Returns `None` when `hours` is outside `[0, 24)`.
    pub fn local_mean_time(&self, hours: f64) -> Option<DateTime<Tz>> {
        if !(0.0..24.0).contains(&hours) {
            return None;
        }
        let raw_offset_hours =
            self.location.raw_offset(self.date).num_milliseconds() as f64 / HOUR_MILLIS;
        let zone_time = self.date_from_time(hours - raw_offset_hours, SolarEvent::Sunrise);
        Self::time_offset(zone_time, -self.location.local_mean_time_offset(self.date))
    }

    /// Local mean noon: 12:00 local mean time.
    ///
    /// Ignores the equation of time and daylight saving, so it varies only
    /// with longitude.
    pub fn fixed_local_chatzos(&self) -> Option<DateTime<Tz>> {
        self.local_mean_time(12.0)
    }

    /// `instant + offset`, propagating `None`.
    pub fn time_offset(instant: Option<DateTime<Tz>>, offset: TimeDelta) -> Option<DateTime<Tz>> {
        instant?.checked_add_signed(offset)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Solar dip search
    // ═══════════════════════════════════════════════════════════════════

    /// Degrees below the geometric horizon at which the sun stands `minutes`
    /// before sea-level sunrise.
    ///
    /// This is a linear search in steps of 0.0001° and is **not suitable for
    /// hot loops**.  Negative `minutes` search above the horizon.  Returns
    /// `None` when sea-level sunrise is undefined or the search runs past 90°.
    pub fn sunrise_solar_dip_from_offset(&self, minutes: f64) -> Option<f64> {
        let sea_level = self.sea_level_sunrise()?;
        let target = Self::time_offset(Some(sea_level), -span::minutes(minutes)?)?;
        self.solar_dip_search(minutes, 0.0001, |zenith| {
            self.sunrise_offset_by_degrees(zenith)
                .is_some_and(|instant| {
                    !((minutes < 0.0 && instant < target) || (minutes > 0.0 && instant > target))
                })
        })
    }

    /// Degrees below the geometric horizon at which the sun stands `minutes`
    /// after sea-level sunset.
    ///
    /// Linear search in steps of 0.001°; **not suitable for hot loops**.
    pub fn sunset_solar_dip_from_offset(&self, minutes: f64) -> Option<f64> {
        let sea_level = self.sea_level_sunset()?;
        let target = Self::time_offset(Some(sea_level), span::minutes(minutes)?)?;
        self.solar_dip_search(minutes, 0.001, |zenith| {
            self.sunset_offset_by_degrees(zenith)
                .is_some_and(|instant| {
                    !((minutes > 0.0 && instant < target) || (minutes < 0.0 && instant > target))
                })
        })
    }

    /// Step away from the geometric horizon until `crossed(zenith)` holds.
    fn solar_dip_search(
        &self,
        minutes: f64,
        increment: f64,
        crossed: impl Fn(f64) -> bool,
    ) -> Option<f64> {
        if minutes == 0.0 {
            return Some(0.0);
        }
        let direction = minutes.signum();
        let max_steps = (GEOMETRIC_ZENITH / increment).round() as u64;
        for step in 1..=max_steps {
            let degrees = direction * step as f64 * increment;
            if crossed(GEOMETRIC_ZENITH + degrees) {
                trace!(minutes, degrees, step, "solar dip search converged");
                return Some(degrees);
            }
        }
        warn!(
            minutes,
            date = %self.date,
            location = self.location.name(),
            "solar dip search exhausted without crossing the offset"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::UsnoCalculator;
    use chrono::Timelike;

    fn lakewood() -> Location {
        Location::new(
            "Lakewood, NJ",
            40.096,
            -74.222,
            29.02,
            chrono_tz::America::New_York,
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> AstronomicalCalendar {
        AstronomicalCalendar::new(lakewood(), date(2024, 3, 1))
    }

    fn hms(instant: DateTime<Tz>) -> (u32, u32, u32) {
        (instant.hour(), instant.minute(), instant.second())
    }

    #[test]
    fn lakewood_sunrise_and_sunset_local() {
        let cal = calendar();
        // 11:29:27 / 22:49:17 UTC in EST
        assert_eq!(hms(cal.sea_level_sunrise().unwrap()), (6, 29, 27));
        assert_eq!(hms(cal.sea_level_sunset().unwrap()), (17, 49, 17));
        assert_eq!(cal.sunrise().unwrap().date_naive(), date(2024, 3, 1));
    }

    #[test]
    fn elevation_flag_changes_only_the_horizon() {
        let mut cal = calendar();
        let sea = cal.sunrise().unwrap();
        let civil = cal.begin_civil_twilight().unwrap();
        cal.set_use_elevation(true);
        assert!(cal.sunrise().unwrap() < sea);
        assert_eq!(cal.sea_level_sunrise().unwrap(), sea);
        assert_eq!(cal.begin_civil_twilight().unwrap(), civil);
    }

    #[test]
    fn twilight_brackets_sunrise() {
        let cal = calendar();
        let sunrise = cal.sea_level_sunrise().unwrap();
        let civil = cal.begin_civil_twilight().unwrap();
        let nautical = cal.begin_nautical_twilight().unwrap();
        let astronomical = cal.begin_astronomical_twilight().unwrap();
        assert!(astronomical < nautical && nautical < civil && civil < sunrise);

        let sunset = cal.sea_level_sunset().unwrap();
        assert!(sunset < cal.end_civil_twilight().unwrap());
        assert!(cal.end_nautical_twilight().unwrap() < cal.end_astronomical_twilight().unwrap());
    }

    #[test]
    fn temporal_hour_is_a_twelfth_of_the_day() {
        let cal = calendar();
        let day = cal.sea_level_sunset().unwrap() - cal.sea_level_sunrise().unwrap();
        assert_eq!(cal.temporal_hour().unwrap(), day / 12);
        assert_eq!(
            AstronomicalCalendar::temporal_hour_between(None, cal.sea_level_sunset()),
            None
        );
    }

    #[test]
    fn transit_and_midnight() {
        let cal = calendar();
        assert_eq!(hms(cal.sun_transit().unwrap()), (12, 9, 9));
        let midnight = cal.solar_midnight().unwrap();
        assert_eq!(midnight.date_naive(), date(2024, 3, 2));
        assert_eq!(hms(midnight), (0, 9, 3));
    }

    #[test]
    fn transit_falls_back_to_day_midpoint() {
        let mut cal = calendar();
        cal.set_calculator(Arc::new(UsnoCalculator));
        let transit = cal.sun_transit().unwrap();
        let expected = AstronomicalCalendar::sun_transit_between(
            cal.sea_level_sunrise(),
            cal.sea_level_sunset(),
        )
        .unwrap();
        assert_eq!(transit, expected);
        assert_eq!(
            cal.solar_midnight().unwrap(),
            transit + TimeDelta::hours(12)
        );
    }

    #[test]
    fn fixed_local_chatzos_is_local_mean_noon() {
        let cal = calendar();
        // 12:00 - (-74.222 * 4 min) = 16:56:53.28 UTC
        let chatzos = cal.fixed_local_chatzos().unwrap();
        assert_eq!(hms(chatzos), (11, 56, 53));
        assert_eq!(chatzos.date_naive(), date(2024, 3, 1));
        assert_eq!(cal.local_mean_time(24.0), None);

        // daylight saving does not move it in UTC
        let mut summer = cal.clone();
        summer.set_date(date(2024, 7, 1));
        let summer_chatzos = summer.fixed_local_chatzos().unwrap();
        assert_eq!(hms(summer_chatzos), (12, 56, 53));
    }

    #[test]
    fn polar_night_is_undefined_not_a_panic() {
        let alert = Location::new("Alert", 81.74, -64.0, 0.0, chrono_tz::America::Toronto).unwrap();
        let cal = AstronomicalCalendar::new(alert, date(2024, 12, 20));
        assert!(cal.sunrise().is_none());
        assert!(cal.sunset().is_none());
        assert!(cal.temporal_hour().is_none());
        assert!(cal.sun_transit().is_some());
    }

    #[test]
    fn solar_dip_search_inverts_the_offset() {
        let cal = calendar();
        let degrees = cal.sunrise_solar_dip_from_offset(72.0).unwrap();
        assert!(degrees > 14.0 && degrees < 15.0, "{degrees}");
        // the degree-based dawn must land within a minute of the fixed offset
        let dawn = cal.sunrise_offset_by_degrees(GEOMETRIC_ZENITH + degrees).unwrap();
        let fixed = cal.sea_level_sunrise().unwrap() - TimeDelta::minutes(72);
        assert!((dawn - fixed).num_seconds().abs() < 60);

        let dusk = cal.sunset_solar_dip_from_offset(50.0).unwrap();
        assert!(dusk > 8.0 && dusk < 12.0, "{dusk}");
        assert_eq!(cal.sunrise_solar_dip_from_offset(0.0), Some(0.0));
    }

    #[test]
    fn negative_offsets_search_above_the_horizon() {
        let cal = calendar();
        let morning = cal.sunrise_solar_dip_from_offset(-20.0).unwrap();
        assert!(morning < -1.0 && morning > -5.0, "{morning}");
        let found = cal.sunrise_offset_by_degrees(GEOMETRIC_ZENITH + morning).unwrap();
        let fixed = cal.sea_level_sunrise().unwrap() + TimeDelta::minutes(20);
        assert!((found - fixed).num_seconds().abs() < 60);

        let evening = cal.sunset_solar_dip_from_offset(-20.0).unwrap();
        assert!(evening < -1.0 && evening > -5.0, "{evening}");
        let found = cal.sunset_offset_by_degrees(GEOMETRIC_ZENITH + evening).unwrap();
        let fixed = cal.sea_level_sunset().unwrap() - TimeDelta::minutes(20);
        assert!((found - fixed).num_seconds().abs() < 60);
    }

    #[test]
    fn solar_dip_search_is_undefined_without_sunrise() {
        let alert = Location::new("Alert", 81.74, -64.0, 0.0, chrono_tz::America::Toronto).unwrap();
        let cal = AstronomicalCalendar::new(alert, date(2024, 12, 20));
        assert_eq!(cal.sunrise_solar_dip_from_offset(72.0), None);
    }

    #[test]
    fn date_from_time_rejects_nan() {
        assert!(calendar().date_from_time(f64::NAN, SolarEvent::Sunrise).is_none());
        assert!(calendar().date_from_time(1e300, SolarEvent::Sunset).is_none());
    }

    #[test]
    fn antimeridian_zones_share_the_utc_instant() {
        // Samoa's coordinates in its own zone (UTC+13) and in the zone
        // matching its longitude (UTC-11)
        let apia = Location::new("Apia", -13.8, -171.75, 0.0, chrono_tz::Pacific::Apia).unwrap();
        let solar = Location::new("Apia", -13.8, -171.75, 0.0, chrono_tz::Etc::GMTPlus11).unwrap();
        let d = date(2024, 3, 1);
        let next = date(2024, 3, 2);

        let apia_sunrise = AstronomicalCalendar::new(apia, next)
            .sea_level_sunrise()
            .unwrap();
        let solar_sunrise = AstronomicalCalendar::new(solar, d)
            .sea_level_sunrise()
            .unwrap();
        assert_eq!(
            apia_sunrise.with_timezone(&Utc),
            solar_sunrise.with_timezone(&Utc)
        );
        assert_eq!(apia_sunrise.date_naive(), next);
        assert_eq!(solar_sunrise.date_naive(), d);
    }
}
