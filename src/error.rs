// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for configuration problems.
//!
//! Astronomically undefined times are never errors: they surface as `None`.
//! Everything here describes a malformed input (a location out of range, a
//! zman catalog that references itself) and is reported once, at
//! construction time.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ZmanimError>;

/// Error type for all fallible constructors in the crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZmanimError {
    /// A location field is outside its valid range.
    #[error("invalid location {field}: {value} ({reason})")]
    InvalidLocation {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint.
        reason: &'static str,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration {field}: {value} ({reason})")]
    InvalidConfig {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint.
        reason: &'static str,
    },

    /// A timezone name could not be parsed as an IANA identifier.
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// Two different definitions in one catalog share a key.
    #[error("duplicate zman key {0:?}")]
    DuplicateKey(&'static str),

    /// A definition refers to a zman type the catalog has no canonical entry for.
    #[error("zman {key:?} references {reference} which has no canonical definition")]
    UnresolvedReference {
        /// Key of the definition holding the reference.
        key: &'static str,
        /// Debug name of the missing type.
        reference: String,
    },

    /// The definitions form a dependency cycle.
    #[error("zman dependency cycle: {}", path.join(" -> "))]
    CatalogCycle {
        /// Keys along the cycle, first key repeated at the end.
        path: Vec<&'static str>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_location_message() {
        let e = ZmanimError::InvalidLocation {
            field: "latitude",
            value: 91.0,
            reason: "must be within [-90, 90]",
        };
        assert_eq!(
            e.to_string(),
            "invalid location latitude: 91 (must be within [-90, 90])"
        );
    }

    #[test]
    fn cycle_message_lists_path() {
        let e = ZmanimError::CatalogCycle {
            path: vec!["a", "b", "a"],
        };
        assert_eq!(e.to_string(), "zman dependency cycle: a -> b -> a");
    }

    #[test]
    fn unknown_timezone_message() {
        let e = ZmanimError::UnknownTimezone("Mars/Olympus".into());
        assert_eq!(e.to_string(), "unknown timezone \"Mars/Olympus\"");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ZmanimError>();
    }
}
