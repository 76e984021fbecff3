// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day spans.
//!
//! A [`DaySpan`] is the interval between the two boundary instants that
//! define a halachic day (sunrise to sunset, alos to tzais, ...).  Its twelfth
//! part is the *shaah zmanis*, the proportional hour every "zmaniyos" offset
//! is scaled by.

use chrono::{DateTime, TimeDelta, TimeZone};
use std::fmt;

/// Number of proportional hours in a day span.
pub const HOURS_PER_DAY_SPAN: i32 = 12;

/// Interval between two resolved instants.
///
/// The span is not required to be positive: a day definition whose end
/// precedes its start yields a negative temporal hour, mirroring the raw
/// difference of the two instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySpan<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> DaySpan<Tz> {
    /// Creates a new span between two instants.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        DaySpan { start, end }
    }

    /// Builds a span only when both boundaries are defined.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use zmanim::DaySpan;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
    /// assert!(DaySpan::from_bounds(Some(start), None).is_none());
    /// ```
    pub fn from_bounds(start: Option<DateTime<Tz>>, end: Option<DateTime<Tz>>) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    /// Returns the duration of the span as the difference between end and start.
    pub fn duration(&self) -> TimeDelta {
        self.end.clone().signed_duration_since(self.start.clone())
    }

    /// One twelfth of the span.
    ///
    /// ```
    /// use chrono::{TimeDelta, TimeZone, Utc};
    /// use zmanim::DaySpan;
    ///
    /// let span = DaySpan::new(
    ///     Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
    /// );
    /// assert_eq!(span.temporal_hour(), TimeDelta::hours(1));
    /// ```
    pub fn temporal_hour(&self) -> TimeDelta {
        self.duration() / HOURS_PER_DAY_SPAN
    }

    /// Wall-clock length of `minutes` proportional minutes, or `None` when
    /// it does not fit in a [`TimeDelta`].
    pub fn zmaniyos_minutes(&self, minutes: f64) -> Option<TimeDelta> {
        scale(self.temporal_hour(), minutes / 60.0)
    }

    /// The instant six proportional hours after the start.
    pub fn midpoint(&self) -> DateTime<Tz> {
        self.start.clone() + self.temporal_hour() * (HOURS_PER_DAY_SPAN / 2)
    }
}

impl<Tz: TimeZone> fmt::Display for DaySpan<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn scale(duration: TimeDelta, factor: f64) -> Option<TimeDelta> {
    milliseconds(duration.num_milliseconds() as f64 * factor)
}

/// A wall-clock duration of fractional minutes, at millisecond precision.
/// `None` when the value is not finite or out of range.
pub(crate) fn minutes(minutes: f64) -> Option<TimeDelta> {
    milliseconds(minutes * 60_000.0)
}

fn milliseconds(millis: f64) -> Option<TimeDelta> {
    let millis = millis.round();
    // `as` saturates, so range-check before casting
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn temporal_hour_is_a_twelfth() {
        let span = DaySpan::new(at(6, 0), at(18, 36));
        assert_eq!(span.duration(), TimeDelta::minutes(756));
        assert_eq!(span.temporal_hour(), TimeDelta::minutes(63));
        assert_eq!(span.midpoint(), at(12, 18));
    }

    #[test]
    fn zmaniyos_minutes_scale_with_the_day() {
        let short = DaySpan::new(at(8, 0), at(16, 0));
        let long = DaySpan::new(at(4, 0), at(20, 0));
        assert_eq!(short.zmaniyos_minutes(72.0), Some(TimeDelta::minutes(48)));
        assert_eq!(long.zmaniyos_minutes(72.0), Some(TimeDelta::minutes(96)));
    }

    #[test]
    fn missing_bound_gives_none() {
        assert!(DaySpan::<Utc>::from_bounds(None, Some(at(18, 0))).is_none());
        assert!(DaySpan::from_bounds(Some(at(6, 0)), Some(at(18, 0))).is_some());
    }

    #[test]
    fn inverted_span_has_negative_hour() {
        let span = DaySpan::new(at(18, 0), at(6, 0));
        assert_eq!(span.temporal_hour(), TimeDelta::hours(-1));
    }

    #[test]
    fn fractional_minutes() {
        assert_eq!(minutes(7.5), Some(TimeDelta::seconds(450)));
        assert_eq!(scale(TimeDelta::hours(1), 1.5), Some(TimeDelta::minutes(90)));
    }

    #[test]
    fn out_of_range_offsets_are_none() {
        assert_eq!(minutes(1e300), None);
        assert_eq!(minutes(-1e300), None);
        assert_eq!(minutes(f64::NAN), None);
        assert_eq!(minutes(f64::INFINITY), None);
        let span = DaySpan::new(at(6, 0), at(18, 0));
        assert_eq!(span.zmaniyos_minutes(-1e300), None);
    }
}
