// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use super::definition::ZmanDefinition;
use chrono::TimeDelta;
use std::fmt;
use std::sync::Arc;

/// How a zman is derived from its anchor.
///
/// Numeric variants carry a sign: positive means *after* the anchor,
/// negative *before* it.  Use [`negate`](Self::negate) and
/// [`affirm`](Self::affirm) rather than flipping the sign by hand.
#[derive(Debug, Clone, PartialEq)]
pub enum ZmanCalculationMethod {
    /// Solar depression below the geometric horizon, in degrees.
    ///
    /// On its own the angle is taken on the type's side of the day, so a
    /// positive value falls before sunrise or after sunset.  In a
    /// relationship the sign is the direction from the reference, like
    /// every other offset.
    Degrees(f64),
    /// Wall-clock offset.
    FixedDuration(TimeDelta),
    /// Offset in proportional minutes, scaled by the day's temporal hour.
    ZmaniyosDuration(TimeDelta),
    /// Wall-clock offset in fractional minutes.
    FixedMinutesFloat(f64),
    /// Local mean noon at the location's longitude.
    FixedLocalChatzos,
    /// The later of two zmanim.
    LaterOf(Arc<ZmanDefinition>, Arc<ZmanDefinition>),
    /// The day bounded by two zmanim; resolves to its temporal hour.
    DayDefinition(Arc<ZmanDefinition>, Arc<ZmanDefinition>),
    /// Wall-clock offset whose magnitude comes from engine configuration.
    ConfiguredDuration {
        parameter: DurationParameter,
        negative: bool,
    },
    /// No offset of its own: the reference's value, or the type's
    /// intrinsic value.
    Unspecified,
}

impl ZmanCalculationMethod {
    /// `Degrees` from a literal.
    pub const fn degrees(degrees: f64) -> Self {
        Self::Degrees(degrees)
    }

    /// Whole wall-clock minutes.
    pub const fn minutes(minutes: i64) -> Self {
        Self::FixedDuration(TimeDelta::minutes(minutes))
    }

    /// Whole proportional minutes.
    pub const fn zmaniyos_minutes(minutes: i64) -> Self {
        Self::ZmaniyosDuration(TimeDelta::minutes(minutes))
    }

    /// Proportional hours.
    pub const fn zmaniyos_hours(hours: i64) -> Self {
        Self::ZmaniyosDuration(TimeDelta::minutes(hours * 60))
    }

    /// Configured offset, positive.
    pub const fn configured(parameter: DurationParameter) -> Self {
        Self::ConfiguredDuration {
            parameter,
            negative: false,
        }
    }

    /// The same method pointing before its anchor.
    ///
    /// Idempotent: a method that already points backwards is returned
    /// unchanged.  Non-numeric variants are fixed points.
    pub fn negate(&self) -> Self {
        self.with_sign(true)
    }

    /// The same method pointing after its anchor.
    pub fn affirm(&self) -> Self {
        self.with_sign(false)
    }

    fn with_sign(&self, negative: bool) -> Self {
        let sign = if negative { -1.0 } else { 1.0 };
        match self {
            Self::Degrees(d) => Self::Degrees(sign * d.abs()),
            Self::FixedDuration(d) => Self::FixedDuration(signed(*d, negative)),
            Self::ZmaniyosDuration(d) => Self::ZmaniyosDuration(signed(*d, negative)),
            Self::FixedMinutesFloat(m) => Self::FixedMinutesFloat(sign * m.abs()),
            Self::ConfiguredDuration { parameter, .. } => Self::ConfiguredDuration {
                parameter: *parameter,
                negative,
            },
            Self::FixedLocalChatzos
            | Self::LaterOf(..)
            | Self::DayDefinition(..)
            | Self::Unspecified => self.clone(),
        }
    }

    /// Whether the method points before its anchor.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Degrees(d) | Self::FixedMinutesFloat(d) => d.is_sign_negative() && *d != 0.0,
            Self::FixedDuration(d) | Self::ZmaniyosDuration(d) => *d < TimeDelta::zero(),
            Self::ConfiguredDuration { negative, .. } => *negative,
            Self::FixedLocalChatzos
            | Self::LaterOf(..)
            | Self::DayDefinition(..)
            | Self::Unspecified => false,
        }
    }
}

fn signed(duration: TimeDelta, negative: bool) -> TimeDelta {
    let magnitude = duration.abs();
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl fmt::Display for ZmanCalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees(d) => write!(f, "{d}°"),
            Self::FixedDuration(d) => write!(f, "{} minutes", d.num_seconds() as f64 / 60.0),
            Self::ZmaniyosDuration(d) => {
                write!(f, "{} minutes zmaniyos", d.num_seconds() as f64 / 60.0)
            }
            Self::FixedMinutesFloat(m) => write!(f, "{m} minutes"),
            Self::FixedLocalChatzos => f.write_str("fixed local chatzos"),
            Self::LaterOf(a, b) => write!(f, "later of {} and {}", a.key(), b.key()),
            Self::DayDefinition(a, b) => write!(f, "day from {} to {}", a.key(), b.key()),
            Self::ConfiguredDuration {
                parameter,
                negative,
            } => write!(f, "{}{parameter}", if *negative { "-" } else { "" }),
            Self::Unspecified => f.write_str("unspecified"),
        }
    }
}

/// An engine-configured offset, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DurationParameter {
    /// Minutes before sunset that candles are lit.
    CandleLighting,
    /// Minutes after sunset of nightfall according to the Ateret Torah.
    AteretTorah,
}

impl DurationParameter {
    /// Value used when the engine is not configured otherwise.
    pub const fn default_minutes(self) -> i64 {
        match self {
            DurationParameter::CandleLighting => 18,
            DurationParameter::AteretTorah => 40,
        }
    }
}

impl fmt::Display for DurationParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationParameter::CandleLighting => f.write_str("candle lighting offset"),
            DurationParameter::AteretTorah => f.write_str("Ateret Torah sunset offset"),
        }
    }
}
