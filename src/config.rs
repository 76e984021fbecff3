// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Engine configuration.

use crate::calculator::CalculatorKind;
use crate::error::{Result, ZmanimError};
use crate::span;
use crate::zman::DurationParameter;
use chrono::TimeDelta;

/// Settings for a [`ZmanimEngine`](crate::ZmanimEngine).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use zmanim::{CalculatorKind, ZmanimConfig};
///
/// let config = ZmanimConfig::new()
///     .with_calculator(CalculatorKind::Usno)
///     .with_elevation(true)
///     .with_candle_lighting_minutes(40.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.candle_lighting_minutes(), 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZmanimConfig {
    /// Solar position strategy.
    calculator: CalculatorKind,
    /// Whether sunrise and sunset follow the location's elevation by default.
    use_elevation: bool,
    /// Minutes before sea-level sunset that candles are lit.
    candle_lighting_minutes: f64,
    /// Minutes after sunset of the Ateret Torah's nightfall.
    ateret_torah_minutes: f64,
}

impl ZmanimConfig {
    /// Defaults: NOAA calculator, sea level, 18 minutes candle lighting,
    /// 40 minutes Ateret Torah.
    pub fn new() -> Self {
        Self {
            calculator: CalculatorKind::default(),
            use_elevation: false,
            candle_lighting_minutes: DurationParameter::CandleLighting.default_minutes() as f64,
            ateret_torah_minutes: DurationParameter::AteretTorah.default_minutes() as f64,
        }
    }

    pub fn with_calculator(mut self, calculator: CalculatorKind) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_elevation(mut self, use_elevation: bool) -> Self {
        self.use_elevation = use_elevation;
        self
    }

    pub fn with_candle_lighting_minutes(mut self, minutes: f64) -> Self {
        self.candle_lighting_minutes = minutes;
        self
    }

    pub fn with_ateret_torah_minutes(mut self, minutes: f64) -> Self {
        self.ateret_torah_minutes = minutes;
        self
    }

    pub fn calculator(&self) -> CalculatorKind {
        self.calculator
    }

    pub fn use_elevation(&self) -> bool {
        self.use_elevation
    }

    pub fn candle_lighting_minutes(&self) -> f64 {
        self.candle_lighting_minutes
    }

    pub fn ateret_torah_minutes(&self) -> f64 {
        self.ateret_torah_minutes
    }

    /// The configured magnitude of `parameter`, or `None` when it does not
    /// fit in a [`TimeDelta`].
    pub fn duration(&self, parameter: DurationParameter) -> Option<TimeDelta> {
        let minutes = match parameter {
            DurationParameter::CandleLighting => self.candle_lighting_minutes,
            DurationParameter::AteretTorah => self.ateret_torah_minutes,
        };
        span::minutes(minutes)
    }

    /// Validates this configuration.
    ///
    /// Returns an error if an offset is negative, not finite, or too large
    /// to represent.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("candle_lighting_minutes", self.candle_lighting_minutes),
            ("ateret_torah_minutes", self.ateret_torah_minutes),
        ] {
            if !value.is_finite() || value < 0.0 || span::minutes(value).is_none() {
                return Err(ZmanimError::InvalidConfig {
                    field,
                    value,
                    reason: "must be a finite, non-negative, representable number of minutes",
                });
            }
        }
        Ok(())
    }
}

impl Default for ZmanimConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ZmanimConfig::default();
        assert_eq!(cfg.calculator(), CalculatorKind::Noaa);
        assert!(!cfg.use_elevation());
        assert_eq!(cfg.duration(DurationParameter::CandleLighting), Some(TimeDelta::minutes(18)));
        assert_eq!(cfg.duration(DurationParameter::AteretTorah), Some(TimeDelta::minutes(40)));
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = ZmanimConfig::new()
            .with_calculator(CalculatorKind::Usno)
            .with_elevation(true)
            .with_candle_lighting_minutes(22.5)
            .with_ateret_torah_minutes(30.0);
        assert_eq!(cfg.calculator(), CalculatorKind::Usno);
        assert!(cfg.use_elevation());
        assert_eq!(
            cfg.duration(DurationParameter::CandleLighting),
            Some(TimeDelta::seconds(22 * 60 + 30))
        );
        assert_eq!(cfg.ateret_torah_minutes(), 30.0);
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let err = ZmanimConfig::new()
            .with_candle_lighting_minutes(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ZmanimError::InvalidConfig {
                field: "candle_lighting_minutes",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(ZmanimConfig::new()
            .with_ateret_torah_minutes(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_offset() {
        let cfg = ZmanimConfig::new().with_candle_lighting_minutes(1e300);
        assert_eq!(cfg.duration(DurationParameter::CandleLighting), None);
        assert!(cfg.validate().is_err());
    }
}
