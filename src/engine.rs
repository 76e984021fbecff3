// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zman resolution engine.
//!
//! [`ZmanimEngine`] evaluates definitions from a [`Catalog`] against an
//! [`AstronomicalCalendar`].  Each call is a fresh pass: nothing is cached
//! between calls, and within one pass every definition is resolved at most
//! once per elevation choice.
//!
//! ## Anchors
//!
//! A definition with a relationship is measured from its resolved
//! reference.  Without one, a forward offset is measured from the start of
//! its day and a backward offset from the end.
//!
//! ## Undefined values
//!
//! An undefined anchor, day bound or operand makes the dependent undefined.
//! No substitute is ever computed.
//!
//! ## Elevation
//!
//! | Policy | Effective choice |
//! |--------|------------------|
//! | `Always` | elevated |
//! | `Never` | sea level |
//! | `IfSet` | the engine flag |
//! | `Unspecified` | the dependent's choice, else the reference's policy, else the flag |
//!
//! The effective choice is handed down to everything a definition depends on.

use crate::astronomical::{AstronomicalCalendar, SolarEvent};
use crate::calculator::GEOMETRIC_ZENITH;
use crate::config::ZmanimConfig;
use crate::error::Result;
use crate::location::Location;
use crate::span::{self, DaySpan};
use crate::zman::{
    Catalog, UsesElevation, ZmanCalculationMethod, ZmanDefinition, ZmanRelationship, ZmanType,
};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A definition paired with its value on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBased {
    /// The catalog entry this value was resolved from.
    pub definition: Arc<ZmanDefinition>,
    /// The instant, or `None` when the zman does not occur on this date.
    pub moment: Option<DateTime<Tz>>,
    /// Set instead of `moment` for definitions describing a length of time.
    pub duration: Option<TimeDelta>,
}

impl DateBased {
    pub fn key(&self) -> &'static str {
        self.definition.key()
    }

    pub fn zman_type(&self) -> ZmanType {
        self.definition.zman_type()
    }

    /// Whether the zman has a value on this date.
    pub fn is_defined(&self) -> bool {
        self.moment.is_some() || self.duration.is_some()
    }
}

impl fmt::Display for DateBased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.moment, &self.duration) {
            (Some(moment), _) => write!(f, "{}: {moment}", self.key()),
            (None, Some(duration)) => write!(f, "{}: {duration}", self.key()),
            (None, None) => write!(f, "{}: undefined", self.key()),
        }
    }
}

/// Evaluates zman definitions for one location on a mutable date.
#[derive(Debug, Clone)]
pub struct ZmanimEngine {
    calendar: AstronomicalCalendar,
    catalog: Arc<Catalog>,
    config: ZmanimConfig,
    molad: Option<DateTime<Utc>>,
}

impl ZmanimEngine {
    /// Engine over the standard catalog with default settings.
    pub fn new(location: Location, date: NaiveDate) -> Self {
        Self::from_parts(location, date, ZmanimConfig::default())
    }

    /// Engine over the standard catalog.
    ///
    /// # Errors
    ///
    /// [`ZmanimError::InvalidConfig`](crate::ZmanimError::InvalidConfig) when
    /// `config` does not validate.
    pub fn with_config(location: Location, date: NaiveDate, config: ZmanimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(location, date, config))
    }

    fn from_parts(location: Location, date: NaiveDate, config: ZmanimConfig) -> Self {
        let mut calendar =
            AstronomicalCalendar::with_calculator(location, date, config.calculator().calculator());
        calendar.set_use_elevation(config.use_elevation());
        Self {
            calendar,
            catalog: Catalog::standard(),
            config,
            molad: None,
        }
    }

    /// Replace the catalog.
    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn calendar(&self) -> &AstronomicalCalendar {
        &self.calendar
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &ZmanimConfig {
        &self.config
    }

    pub fn date(&self) -> NaiveDate {
        self.calendar.date()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.calendar.set_date(date);
    }

    pub fn set_use_elevation(&mut self, use_elevation: bool) {
        self.calendar.set_use_elevation(use_elevation);
    }

    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
    }

    /// The molad nearest the current date.  Molad-based zmanim are
    /// undefined without one.
    pub fn set_molad(&mut self, molad: Option<DateTime<Utc>>) {
        self.molad = molad;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Resolution
    // ═══════════════════════════════════════════════════════════════════

    /// Resolve one definition on the current date.
    pub fn resolve(&self, definition: &Arc<ZmanDefinition>) -> DateBased {
        Resolver::new(self).date_based(definition)
    }

    /// Resolve the catalog entry named `key`.
    pub fn zman(&self, key: &str) -> Option<DateBased> {
        self.catalog.get(key).map(|definition| self.resolve(definition))
    }

    /// Every catalog entry, in declaration order.
    #[tracing::instrument(skip_all, fields(date = %self.calendar.date(), location = self.calendar.location().name()))]
    pub fn all_zmanim(&self) -> Vec<DateBased> {
        let mut resolver = Resolver::new(self);
        let zmanim: Vec<_> = self
            .catalog
            .iter()
            .map(|definition| resolver.date_based(definition))
            .collect();
        debug!(
            total = zmanim.len(),
            undefined = zmanim.iter().filter(|z| !z.is_defined()).count(),
            "resolved catalog"
        );
        zmanim
    }

    /// Every catalog entry ordered by instant.  Ties keep declaration order;
    /// entries without an instant come last.
    pub fn sorted_zmanim(&self) -> Vec<DateBased> {
        let mut zmanim = self.all_zmanim();
        zmanim.sort_by(|a, b| {
            (a.moment.is_none(), &a.moment).cmp(&(b.moment.is_none(), &b.moment))
        });
        zmanim
    }
}

#[derive(Debug, Clone, Default)]
struct Resolved {
    moment: Option<DateTime<Tz>>,
    duration: Option<TimeDelta>,
}

/// One resolution pass, memoized by key and elevation.
struct Resolver<'a> {
    engine: &'a ZmanimEngine,
    memo: HashMap<(&'static str, bool), Resolved>,
}

impl<'a> Resolver<'a> {
    fn new(engine: &'a ZmanimEngine) -> Self {
        Self {
            engine,
            memo: HashMap::new(),
        }
    }

    fn calendar(&self) -> &'a AstronomicalCalendar {
        &self.engine.calendar
    }

    fn date_based(&mut self, definition: &Arc<ZmanDefinition>) -> DateBased {
        let resolved = self.resolve(definition, None);
        let moment = if definition.zman_type().is_molad_based() {
            resolved.moment.filter(|m| m.date_naive() == self.calendar().date())
        } else {
            resolved.moment
        };
        DateBased {
            definition: Arc::clone(definition),
            moment,
            duration: resolved.duration,
        }
    }

    fn resolve(&mut self, definition: &ZmanDefinition, inherited: Option<bool>) -> Resolved {
        let elevation = self.effective_elevation(definition, inherited);
        let key = (definition.key(), elevation);
        if let Some(hit) = self.memo.get(&key) {
            return hit.clone();
        }
        let resolved = self.compute(definition, elevation);
        trace!(
            key = definition.key(),
            elevation,
            moment = ?resolved.moment,
            duration = ?resolved.duration,
            "resolved"
        );
        self.memo.insert(key, resolved.clone());
        resolved
    }

    fn moment(&mut self, definition: &ZmanDefinition, elevation: bool) -> Option<DateTime<Tz>> {
        self.resolve(definition, Some(elevation)).moment
    }

    fn effective_elevation(&self, definition: &ZmanDefinition, inherited: Option<bool>) -> bool {
        let flag = self.calendar().use_elevation();
        match definition.uses_elevation() {
            UsesElevation::Always => true,
            UsesElevation::Never => false,
            UsesElevation::IfSet => flag,
            UsesElevation::Unspecified => inherited
                .or_else(|| self.referenced_elevation(definition))
                .unwrap_or(flag),
        }
    }

    /// Elevation policy of whatever `definition` is measured from.
    fn referenced_elevation(&self, definition: &ZmanDefinition) -> Option<bool> {
        let target = match definition.reference() {
            Some(reference) => self.engine.catalog.resolve_reference(reference)?,
            None => Arc::clone(definition.day_bounds()?.0),
        };
        match target.uses_elevation() {
            UsesElevation::Always => Some(true),
            UsesElevation::Never => Some(false),
            UsesElevation::IfSet => Some(self.calendar().use_elevation()),
            UsesElevation::Unspecified => self.referenced_elevation(&target),
        }
    }

    fn compute(&mut self, definition: &ZmanDefinition, elevation: bool) -> Resolved {
        if let ZmanCalculationMethod::DayDefinition(..) = definition.method() {
            return Resolved {
                moment: None,
                duration: self.day(definition, elevation).map(|day| day.temporal_hour()),
            };
        }
        let moment = match definition.relationship() {
            Some(relationship) => self.relative(definition, relationship, elevation),
            None => self.standalone(definition, elevation),
        };
        Resolved {
            moment,
            duration: None,
        }
    }

    /// The day proportional hours are taken from: the definition's bounds,
    /// else sunrise to sunset.
    fn day(&mut self, definition: &ZmanDefinition, elevation: bool) -> Option<DaySpan<Tz>> {
        match definition.day_bounds() {
            Some((start, end)) => {
                let start = self.moment(start, elevation);
                let end = self.moment(end, elevation);
                DaySpan::from_bounds(start, end)
            }
            None => DaySpan::from_bounds(
                self.calendar().sunrise_with_elevation(elevation),
                self.calendar().sunset_with_elevation(elevation),
            ),
        }
    }

    fn relative(
        &mut self,
        definition: &ZmanDefinition,
        relationship: &ZmanRelationship,
        elevation: bool,
    ) -> Option<DateTime<Tz>> {
        let reference = self
            .engine
            .catalog
            .resolve_reference(&relationship.reference)?;
        let anchor = self.moment(&reference, elevation)?;
        let side = relationship.reference.zman_type().solar_event();
        self.apply(definition, &relationship.method, anchor, side, elevation)
    }

    fn standalone(&mut self, definition: &ZmanDefinition, elevation: bool) -> Option<DateTime<Tz>> {
        let method = definition.method();
        match method {
            ZmanCalculationMethod::Unspecified => self.intrinsic(definition.zman_type(), elevation),
            ZmanCalculationMethod::FixedLocalChatzos => self.calendar().fixed_local_chatzos(),
            ZmanCalculationMethod::LaterOf(a, b) => {
                let a = self.moment(a, elevation);
                let b = self.moment(b, elevation);
                a.max(b)
            }
            ZmanCalculationMethod::Degrees(depression) => {
                self.degrees(*depression, definition.zman_type().solar_event())
            }
            _ => {
                let day = self.day(definition, elevation)?;
                let anchor = if method.is_negative() { day.end } else { day.start };
                self.apply(
                    definition,
                    method,
                    anchor,
                    definition.zman_type().solar_event(),
                    elevation,
                )
            }
        }
    }

    /// Offset `anchor` by `method`.
    fn apply(
        &mut self,
        definition: &ZmanDefinition,
        method: &ZmanCalculationMethod,
        anchor: DateTime<Tz>,
        side: Option<SolarEvent>,
        elevation: bool,
    ) -> Option<DateTime<Tz>> {
        match method {
            ZmanCalculationMethod::Degrees(degrees) => {
                // before sunrise and after sunset are below the horizon
                let depression = match side? {
                    SolarEvent::Sunrise => -degrees,
                    _ => *degrees,
                };
                self.degrees(depression, side)
            }
            ZmanCalculationMethod::FixedDuration(offset) => anchor.checked_add_signed(*offset),
            ZmanCalculationMethod::FixedMinutesFloat(minutes) => {
                anchor.checked_add_signed(span::minutes(*minutes)?)
            }
            ZmanCalculationMethod::ConfiguredDuration {
                parameter,
                negative,
            } => {
                let offset = self.engine.config.duration(*parameter)?;
                anchor.checked_add_signed(if *negative { -offset } else { offset })
            }
            ZmanCalculationMethod::ZmaniyosDuration(offset) => {
                let minutes = offset.num_milliseconds() as f64 / 60_000.0;
                let scaled = self.day(definition, elevation)?.zmaniyos_minutes(minutes)?;
                anchor.checked_add_signed(scaled)
            }
            ZmanCalculationMethod::FixedLocalChatzos => self.calendar().fixed_local_chatzos(),
            ZmanCalculationMethod::LaterOf(a, b) => {
                let a = self.moment(a, elevation);
                let b = self.moment(b, elevation);
                a.max(b)
            }
            ZmanCalculationMethod::Unspecified => Some(anchor),
            ZmanCalculationMethod::DayDefinition(..) => None,
        }
    }

    /// The instant on the given side of the day when the sun is `depression`
    /// degrees below the geometric horizon.  Negative values are above it.
    fn degrees(&self, depression: f64, side: Option<SolarEvent>) -> Option<DateTime<Tz>> {
        let calendar = self.calendar();
        let zenith = GEOMETRIC_ZENITH + depression;
        match side? {
            SolarEvent::Sunrise => {
                let hours = calendar.utc_sea_level_sunrise(zenith)?;
                calendar.date_from_time(hours, SolarEvent::Sunrise)
            }
            SolarEvent::Sunset => {
                let hours = calendar.utc_sea_level_sunset(zenith)?;
                calendar.date_from_time(hours, SolarEvent::Sunset)
            }
            SolarEvent::Noon | SolarEvent::Midnight => None,
        }
    }

    fn intrinsic(&self, zman_type: ZmanType, elevation: bool) -> Option<DateTime<Tz>> {
        let calendar = self.calendar();
        match zman_type {
            ZmanType::Hanaitz => calendar.sunrise_with_elevation(elevation),
            ZmanType::Shkia => calendar.sunset_with_elevation(elevation),
            ZmanType::Chatzos => calendar.sun_transit(),
            ZmanType::ChatzosLayla => calendar.solar_midnight(),
            ZmanType::Molad => self
                .engine
                .molad
                .map(|molad| molad.with_timezone(&calendar.location().timezone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zman::ZmanType::*;
    use chrono::{TimeZone, Timelike};

    type M = ZmanCalculationMethod;

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

    fn engine() -> ZmanimEngine {
        ZmanimEngine::new(lakewood(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn moment(engine: &ZmanimEngine, key: &str) -> DateTime<Tz> {
        engine.zman(key).unwrap().moment.unwrap()
    }

    fn def(key: &'static str, zman_type: ZmanType, method: M) -> Arc<ZmanDefinition> {
        Arc::new(ZmanDefinition::new(key, zman_type, method))
    }

    #[test]
    fn canonical_sunrise_and_sunset_follow_the_flag() {
        let mut engine = engine();
        let sea = moment(&engine, "sunrise");
        assert_eq!(sea, engine.calendar().sea_level_sunrise().unwrap());
        engine.set_use_elevation(true);
        let elevated = moment(&engine, "sunrise");
        assert!(elevated < sea);
        assert_eq!(moment(&engine, "sea_level_sunrise"), sea);
        assert_eq!(moment(&engine, "elevated_sunrise"), elevated);
    }

    #[test]
    fn fixed_duration_after_sunset() {
        let engine = engine();
        assert_eq!(
            moment(&engine, "tzais_72") - moment(&engine, "sunset"),
            TimeDelta::minutes(72)
        );
        assert_eq!(
            moment(&engine, "sunrise") - moment(&engine, "alos_72"),
            TimeDelta::minutes(72)
        );
    }

    #[test]
    fn degrees_use_sea_level_zeniths() {
        let engine = engine();
        let alos = moment(&engine, "alos_16_1_degrees");
        let expected = engine
            .calendar()
            .sunrise_offset_by_degrees(GEOMETRIC_ZENITH + 16.1)
            .unwrap();
        assert_eq!(alos, expected);
        let tzais = moment(&engine, "tzais_geonim_8_5_degrees");
        assert_eq!(
            tzais,
            engine
                .calendar()
                .sunset_offset_by_degrees(GEOMETRIC_ZENITH + 8.5)
                .unwrap()
        );
    }

    #[test]
    fn gra_zmanim_split_the_day() {
        let engine = engine();
        let sunrise = moment(&engine, "sunrise");
        let sunset = moment(&engine, "sunset");
        let hour = (sunset - sunrise).num_milliseconds() as f64 / 12.0;
        let shma = moment(&engine, "sof_zman_shma_gra");
        let expected = (3.0 * hour).round() as i64;
        assert!(((shma - sunrise).num_milliseconds() - expected).abs() <= 15);
        let plag = moment(&engine, "plag_hamincha");
        let expected = (10.75 * hour).round() as i64;
        assert!(((plag - sunrise).num_milliseconds() - expected).abs() <= 15);
    }

    #[test]
    fn shaah_zmanis_is_a_duration() {
        let engine = engine();
        let hour = engine.zman("shaah_zmanis_gra").unwrap();
        assert!(hour.moment.is_none());
        assert_eq!(hour.duration, engine.calendar().temporal_hour());

        let mga = engine.zman("shaah_zmanis_mga").unwrap().duration.unwrap();
        assert_eq!(mga - hour.duration.unwrap(), TimeDelta::minutes(12));
    }

    #[test]
    fn zmaniyos_offsets_use_the_day_length() {
        let engine = engine();
        let hour = engine.calendar().temporal_hour().unwrap();
        let offset = moment(&engine, "sunrise") - moment(&engine, "alos_72_zmanis");
        let day = DaySpan::new(moment(&engine, "sunrise"), moment(&engine, "sunset"));
        assert_eq!(day.temporal_hour(), hour);
        let expected = day.zmaniyos_minutes(72.0).unwrap();
        assert!((offset - expected).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn standalone_degrees_are_depressions() {
        let engine = engine();
        let sunrise = moment(&engine, "sunrise");
        let alos = engine.resolve(&def("alos", Alos, M::degrees(16.1))).moment.unwrap();
        assert!(alos < sunrise);
        assert_eq!(alos, moment(&engine, "alos_16_1_degrees"));

        let tzais = engine.resolve(&def("tzais", Tzais, M::degrees(8.5))).moment.unwrap();
        assert!(tzais > moment(&engine, "sunset"));
        assert_eq!(tzais, moment(&engine, "tzais_geonim_8_5_degrees"));

        // negative depressions sit above the horizon
        let risen = engine.resolve(&def("risen", Hanaitz, M::degrees(-5.0))).moment.unwrap();
        assert!(risen > sunrise);
    }

    #[test]
    fn degrees_after_sunrise_are_above_the_horizon() {
        let engine = engine();
        let after = Arc::new(ZmanDefinition::relative(
            "after",
            Hanaitz.occurs(M::degrees(5.0)).after(Hanaitz),
        ));
        let standalone = def("risen", Hanaitz, M::degrees(-5.0));
        assert_eq!(engine.resolve(&after).moment, engine.resolve(&standalone).moment);
    }

    #[test]
    fn huge_offsets_are_undefined() {
        let engine = engine();
        for minutes in [1e300, -1e300, f64::INFINITY, f64::NAN] {
            let alos = Arc::new(ZmanDefinition::relative(
                "alos",
                Alos.occurs(M::FixedMinutesFloat(minutes)).before(Hanaitz),
            ));
            assert_eq!(engine.resolve(&alos).moment, None, "{minutes}");
        }
        let zmaniyos = def("far", Alos, M::ZmaniyosDuration(TimeDelta::MAX));
        assert_eq!(engine.resolve(&zmaniyos).moment, None);
    }

    #[test]
    fn later_of_picks_the_later() {
        let engine = engine();
        let later = moment(&engine, "mincha_gedola_greater_than_30");
        let gra = moment(&engine, "mincha_gedola");
        let thirty = moment(&engine, "mincha_gedola_30_minutes");
        assert_eq!(later, gra.max(thirty));
    }

    #[test]
    fn later_of_with_one_side_undefined() {
        let never = def("never", Alos, M::Unspecified);
        let sunrise = def("sunrise", Hanaitz, M::Unspecified);
        let later = def("later", Hanaitz, M::LaterOf(never.clone(), sunrise.clone()));
        let catalog = Catalog::new([sunrise, never.clone(), later.clone()]).unwrap();
        let engine = engine().with_catalog(Arc::new(catalog));
        assert_eq!(engine.resolve(&later).moment, engine.calendar().sunrise());

        let both = def("both", Alos, M::LaterOf(never.clone(), never));
        assert_eq!(engine.resolve(&both).moment, None);
    }

    #[test]
    fn configured_durations_follow_the_config() {
        let engine = ZmanimEngine::with_config(
            lakewood(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ZmanimConfig::new().with_candle_lighting_minutes(40.0),
        )
        .unwrap();
        assert_eq!(
            moment(&engine, "sea_level_sunset") - moment(&engine, "candle_lighting"),
            TimeDelta::minutes(40)
        );
        assert_eq!(
            moment(&engine, "tzais_ateret_torah") - moment(&engine, "sunset"),
            TimeDelta::minutes(40)
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = ZmanimEngine::with_config(
            lakewood(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ZmanimConfig::new().with_ateret_torah_minutes(-5.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn molad_zmanim_only_on_their_day() {
        let mut engine = engine();
        assert_eq!(engine.zman("molad").unwrap().moment, None);

        let molad = Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap();
        engine.set_molad(Some(molad));
        // 22:00 EST on Feb 29
        assert_eq!(engine.zman("molad").unwrap().moment, None);
        assert_eq!(engine.zman("tchilas_zman_kidush_levana_3_days").unwrap().moment, None);

        engine.set_date(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        let tchilas = engine.zman("tchilas_zman_kidush_levana_3_days").unwrap();
        let local = tchilas.moment.unwrap();
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(local.hour(), 22);

        engine.set_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(engine.zman("molad").unwrap().moment.is_some());
    }

    #[test]
    fn sorted_zmanim_put_undefined_last() {
        let engine = engine();
        let sorted = engine.sorted_zmanim();
        assert_eq!(sorted.len(), engine.catalog().len());
        let first_undefined = sorted
            .iter()
            .position(|z| z.moment.is_none())
            .unwrap_or(sorted.len());
        assert!(sorted[first_undefined..].iter().all(|z| z.moment.is_none()));
        assert!(sorted[..first_undefined]
            .windows(2)
            .all(|w| w[0].moment <= w[1].moment));
    }

    #[test]
    fn sorted_zmanim_break_ties_by_declaration_order() {
        let engine = engine();
        let sorted: Vec<_> = engine.sorted_zmanim().iter().map(|z| z.key()).collect();
        let at = |key| sorted.iter().position(|k| *k == key).unwrap();
        assert_eq!(moment(&engine, "sunrise"), moment(&engine, "sea_level_sunrise"));
        assert_eq!(at("sunrise") + 1, at("sea_level_sunrise"));
        assert_eq!(moment(&engine, "sunset"), moment(&engine, "sea_level_sunset"));
        assert!(at("sunset") < at("sea_level_sunset"));
    }

    #[test]
    fn all_zmanim_follow_declaration_order() {
        let engine = engine();
        let keys: Vec<_> = engine.all_zmanim().iter().map(|z| z.key()).collect();
        let declared: Vec<_> = engine.catalog().iter().map(|d| d.key()).collect();
        assert_eq!(keys, declared);
    }

    #[test]
    fn unspecified_inherits_the_dependents_elevation() {
        let mut engine = engine();
        engine.set_use_elevation(false);
        let elevated = moment(&engine, "mincha_gedola_elevated");
        let sea_level = moment(&engine, "mincha_gedola_sea_level");
        assert_ne!(elevated, sea_level);
        assert_eq!(sea_level, moment(&engine, "mincha_gedola"));
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(engine().zman("no_such_zman").is_none());
    }

    #[test]
    fn display_shows_value_or_undefined() {
        let engine = engine();
        let molad = engine.zman("molad").unwrap();
        assert_eq!(molad.to_string(), "molad: undefined");
        assert!(engine.zman("sunrise").unwrap().to_string().starts_with("sunrise: 2024-03-01"));
    }
}
