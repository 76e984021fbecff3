// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use super::{ZmanAuthority, ZmanCalculationMethod, ZmanType};
use std::fmt;
use std::sync::Arc;

/// Whether sunrise and sunset are corrected for the observer's elevation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UsesElevation {
    /// Always elevation-adjusted.
    Always,
    /// Always at sea level.
    Never,
    /// Follows the engine's elevation flag.
    IfSet,
    /// Follows whichever zman depends on this one, else the zman this one
    /// references, else the engine's flag.
    #[default]
    Unspecified,
}

/// What a relationship is measured from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// The catalog's canonical definition of a type.
    Type(ZmanType),
    /// A specific definition.
    Definition(Arc<ZmanDefinition>),
}

impl Reference {
    /// The referenced type.
    pub fn zman_type(&self) -> ZmanType {
        match self {
            Reference::Type(t) => *t,
            Reference::Definition(d) => d.zman_type(),
        }
    }
}

impl From<ZmanType> for Reference {
    fn from(value: ZmanType) -> Self {
        Reference::Type(value)
    }
}

impl From<Arc<ZmanDefinition>> for Reference {
    fn from(value: Arc<ZmanDefinition>) -> Self {
        Reference::Definition(value)
    }
}

impl From<&Arc<ZmanDefinition>> for Reference {
    fn from(value: &Arc<ZmanDefinition>) -> Self {
        Reference::Definition(Arc::clone(value))
    }
}

/// "`subject` occurs by `method` relative to `reference`".
#[derive(Debug, Clone, PartialEq)]
pub struct ZmanRelationship {
    /// The type of the zman being defined.
    pub subject: ZmanType,
    /// Signed: negative methods point before the reference.
    pub method: ZmanCalculationMethod,
    /// What the offset is measured from.
    pub reference: Reference,
}

/// Half-built relationship; finish it with [`after`](Self::after) or
/// [`before`](Self::before).
///
/// ```
/// use zmanim::{ZmanCalculationMethod, ZmanType};
///
/// let tzais = ZmanType::Tzais
///     .occurs(ZmanCalculationMethod::minutes(72))
///     .after(ZmanType::Shkia);
/// assert!(!tzais.method.is_negative());
///
/// let alos = ZmanType::Alos
///     .occurs(ZmanCalculationMethod::degrees(16.1))
///     .before(ZmanType::Hanaitz);
/// assert!(alos.method.is_negative());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    subject: ZmanType,
    method: ZmanCalculationMethod,
}

impl Occurrence {
    pub fn after(self, reference: impl Into<Reference>) -> ZmanRelationship {
        ZmanRelationship {
            subject: self.subject,
            method: self.method.affirm(),
            reference: reference.into(),
        }
    }

    pub fn before(self, reference: impl Into<Reference>) -> ZmanRelationship {
        ZmanRelationship {
            subject: self.subject,
            method: self.method.negate(),
            reference: reference.into(),
        }
    }
}

impl ZmanType {
    /// Start a relationship with this type as its subject.
    pub fn occurs(self, method: ZmanCalculationMethod) -> Occurrence {
        Occurrence {
            subject: self,
            method,
        }
    }
}

/// A declarative description of how one zman is computed.
///
/// Definitions are immutable values shared through [`Arc`].  The `key`
/// identifies a definition within a catalog and must be unique there.
#[derive(Debug, Clone, PartialEq)]
pub struct ZmanDefinition {
    key: &'static str,
    zman_type: ZmanType,
    method: ZmanCalculationMethod,
    methods_by_reference: Vec<(ZmanType, ZmanCalculationMethod)>,
    uses_elevation: UsesElevation,
    day: Option<(Arc<ZmanDefinition>, Arc<ZmanDefinition>)>,
    authorities: Vec<ZmanAuthority>,
    relationship: Option<ZmanRelationship>,
}

impl ZmanDefinition {
    pub fn new(key: &'static str, zman_type: ZmanType, method: ZmanCalculationMethod) -> Self {
        Self {
            key,
            zman_type,
            method,
            methods_by_reference: Vec::new(),
            uses_elevation: UsesElevation::Unspecified,
            day: None,
            authorities: Vec::new(),
            relationship: None,
        }
    }

    /// A definition measured from another zman.  The relationship's subject
    /// and signed method become the definition's type and main method.
    pub fn relative(key: &'static str, relationship: ZmanRelationship) -> Self {
        let mut definition = Self::new(key, relationship.subject, relationship.method.clone());
        definition.relationship = Some(relationship);
        definition
    }

    pub fn elevation(mut self, uses_elevation: UsesElevation) -> Self {
        self.uses_elevation = uses_elevation;
        self
    }

    /// Bound the day used for proportional hours.
    pub fn day(mut self, start: &Arc<ZmanDefinition>, end: &Arc<ZmanDefinition>) -> Self {
        self.day = Some((Arc::clone(start), Arc::clone(end)));
        self
    }

    pub fn authority(mut self, authority: ZmanAuthority) -> Self {
        self.authorities.push(authority);
        self
    }

    /// Record the equivalent method when measured from `reference`.
    pub fn relative_to(mut self, reference: ZmanType, method: ZmanCalculationMethod) -> Self {
        self.methods_by_reference.push((reference, method));
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn zman_type(&self) -> ZmanType {
        self.zman_type
    }

    pub fn method(&self) -> &ZmanCalculationMethod {
        &self.method
    }

    pub fn uses_elevation(&self) -> UsesElevation {
        self.uses_elevation
    }

    pub fn authorities(&self) -> &[ZmanAuthority] {
        &self.authorities
    }

    pub fn relationship(&self) -> Option<&ZmanRelationship> {
        self.relationship.as_ref()
    }

    /// What the definition is measured from, if anything.
    pub fn reference(&self) -> Option<&Reference> {
        self.relationship.as_ref().map(|r| &r.reference)
    }

    /// The equivalent method when measured from `reference`, if recorded.
    pub fn method_relative_to(&self, reference: ZmanType) -> Option<&ZmanCalculationMethod> {
        self.methods_by_reference
            .iter()
            .find(|(t, _)| *t == reference)
            .map(|(_, m)| m)
    }

    /// The two zmanim bounding the day: the main method's own bounds for a
    /// `DayDefinition`, else the explicit day.
    pub fn day_bounds(&self) -> Option<(&Arc<ZmanDefinition>, &Arc<ZmanDefinition>)> {
        match &self.method {
            ZmanCalculationMethod::DayDefinition(start, end) => Some((start, end)),
            _ => self.day.as_ref().map(|(start, end)| (start, end)),
        }
    }

    /// Every zman this definition needs resolved first.
    pub(crate) fn dependencies(&self) -> Vec<Reference> {
        let mut dependencies = Vec::new();
        if let Some(reference) = self.reference() {
            dependencies.push(reference.clone());
        }
        if let Some((start, end)) = self.day_bounds() {
            dependencies.push(start.into());
            dependencies.push(end.into());
        }
        for method in std::iter::once(&self.method)
            .chain(self.relationship.as_ref().map(|r| &r.method))
        {
            if let ZmanCalculationMethod::LaterOf(a, b) = method {
                dependencies.push(a.into());
                dependencies.push(b.into());
            }
        }
        dependencies
    }
}

impl fmt::Display for ZmanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.key, self.zman_type)?;
        match &self.relationship {
            Some(r) => {
                let direction = if r.method.is_negative() { "before" } else { "after" };
                write!(
                    f,
                    ": {} {direction} {}",
                    r.method.affirm(),
                    r.reference.zman_type()
                )?;
            }
            None => write!(f, ": {}", self.method)?,
        }
        f.write_str(")")
    }
}
