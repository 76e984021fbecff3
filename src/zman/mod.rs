// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zman metadata model.
//!
//! Everything here is immutable data describing *how* a time point is
//! computed, with no reference to a date or location:
//!
//! - [`ZmanType`]: what a time point is (dawn, sunset, ...).
//! - [`ZmanCalculationMethod`]: how it is offset from its anchor.
//! - [`ZmanRelationship`]: "`X` occurs by `method` after/before `Y`".
//! - [`ZmanDefinition`]: a keyed, complete description.
//! - [`Catalog`]: a validated set of definitions.
//!
//! Evaluation against a calendar lives in [`crate::engine`].

mod authority;
pub mod catalog;
mod definition;
mod method;
mod types;

pub use authority::ZmanAuthority;
pub use catalog::Catalog;
pub use definition::{Occurrence, Reference, UsesElevation, ZmanDefinition, ZmanRelationship};
pub use method::{DurationParameter, ZmanCalculationMethod};
pub use types::ZmanType;
