// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zmanim
//!
//! This crate computes sun- and moon-relative time points ("zmanim") for a
//! location and a calendar date.
//!
//! # Layers
//!
//! - [`Location`]: coordinates, elevation and IANA zone.
//! - [`SolarCalculator`]: UTC hour at which the sun crosses a zenith, with
//!   the [`NoaaCalculator`] and [`UsnoCalculator`] strategies.
//! - [`AstronomicalCalendar`]: sunrise, sunset, twilight, transit and local
//!   mean time as instants in the location's zone.
//! - [`ZmanDefinition`]: declarative description of one zman, grouped into a
//!   validated [`Catalog`].
//! - [`ZmanimEngine`]: resolves a catalog against a calendar.
//!
//! # Undefined times
//!
//! Near the poles the sun may never reach a given depression.  Such times are
//! `None`, and everything measured from them is `None` too.  Errors
//! ([`ZmanimError`]) are reserved for malformed input.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use zmanim::{Location, ZmanimEngine};
//!
//! let lakewood = Location::new(
//!     "Lakewood, NJ",
//!     40.096,
//!     -74.222,
//!     29.02,
//!     chrono_tz::America::New_York,
//! )
//! .unwrap();
//! let engine = ZmanimEngine::new(lakewood, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
//!
//! let sunrise = engine.zman("sunrise").unwrap();
//! let shma = engine.zman("sof_zman_shma_gra").unwrap();
//! assert!(sunrise.moment.unwrap() < shma.moment.unwrap());
//! ```

pub mod astronomical;
pub mod calculator;
mod config;
pub mod engine;
mod error;
mod julian;
mod location;
mod span;
pub mod zman;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use astronomical::{AstronomicalCalendar, SolarEvent};
pub use calculator::{CalculatorKind, NoaaCalculator, SolarCalculator, UsnoCalculator};
pub use config::ZmanimConfig;
pub use engine::{DateBased, ZmanimEngine};
pub use error::{Result, ZmanimError};
pub use julian::JulianDay;
pub use location::{Geodesic, Location, RhumbLine};
pub use span::{DaySpan, HOURS_PER_DAY_SPAN};
pub use zman::{
    Catalog, DurationParameter, Occurrence, Reference, UsesElevation, ZmanAuthority,
    ZmanCalculationMethod, ZmanDefinition, ZmanRelationship, ZmanType,
};
