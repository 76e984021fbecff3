// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated registries of zman definitions.
//!
//! A [`Catalog`] is checked once when it is built: keys are unique, every
//! type reference has a canonical definition, and the dependency graph is
//! acyclic.  Resolution never re-checks.
//!
//! The first definition of each type in declaration order is that type's
//! canonical definition, the one a [`Reference::Type`] resolves to.
//!
//! [`Catalog::standard`] holds the built-in definitions, constructed on first
//! use.

use super::{
    DurationParameter, Reference, UsesElevation, ZmanAuthority, ZmanCalculationMethod,
    ZmanDefinition, ZmanType,
};
use crate::error::{Result, ZmanimError};
use chrono::TimeDelta;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An immutable, validated list of definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<Arc<ZmanDefinition>>,
    by_key: HashMap<&'static str, usize>,
    canonical: HashMap<ZmanType, usize>,
}

static STANDARD: Lazy<Arc<Catalog>> = Lazy::new(|| {
    let catalog = Catalog::new(standard_definitions())
        .expect("built-in zman catalog must be valid");
    debug!(definitions = catalog.len(), "standard zman catalog loaded");
    Arc::new(catalog)
});

impl Catalog {
    /// Validate and index `definitions`.
    ///
    /// # Errors
    ///
    /// - [`ZmanimError::DuplicateKey`] when two different definitions share a key;
    /// - [`ZmanimError::UnresolvedReference`] when a type is referenced but never defined;
    /// - [`ZmanimError::CatalogCycle`] when definitions depend on each other in a loop.
    pub fn new(definitions: impl IntoIterator<Item = Arc<ZmanDefinition>>) -> Result<Self> {
        let definitions: Vec<_> = definitions.into_iter().collect();

        let mut by_key = HashMap::new();
        let mut canonical = HashMap::new();
        for (index, definition) in definitions.iter().enumerate() {
            if by_key.insert(definition.key(), index).is_some() {
                return Err(ZmanimError::DuplicateKey(definition.key()));
            }
            canonical.entry(definition.zman_type()).or_insert(index);
        }

        let catalog = Self {
            definitions,
            by_key,
            canonical,
        };
        let graph = catalog.collect_graph()?;
        catalog.check_acyclic(&graph)?;
        Ok(catalog)
    }

    /// The built-in catalog, shared process-wide.
    pub fn standard() -> Arc<Catalog> {
        Arc::clone(&STANDARD)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> &[Arc<ZmanDefinition>] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ZmanDefinition>> {
        self.definitions.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Arc<ZmanDefinition>> {
        self.by_key.get(key).map(|&i| &self.definitions[i])
    }

    /// Position of `key` in declaration order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// The definition a reference to `zman_type` resolves to.
    pub fn canonical(&self, zman_type: ZmanType) -> Option<&Arc<ZmanDefinition>> {
        self.canonical.get(&zman_type).map(|&i| &self.definitions[i])
    }

    /// The definition `reference` points at.
    pub fn resolve_reference(&self, reference: &Reference) -> Option<Arc<ZmanDefinition>> {
        match reference {
            Reference::Type(t) => self.canonical(*t).cloned(),
            Reference::Definition(d) => Some(Arc::clone(d)),
        }
    }

    /// Every definition reachable from the top level, keyed, with the keys
    /// it depends on.
    fn collect_graph(&self) -> Result<HashMap<&'static str, Vec<&'static str>>> {
        let mut seen: HashMap<&'static str, Arc<ZmanDefinition>> = HashMap::new();
        let mut graph = HashMap::new();
        let mut pending: Vec<Arc<ZmanDefinition>> = self.definitions.clone();

        while let Some(definition) = pending.pop() {
            if let Some(existing) = seen.get(definition.key()) {
                if !Arc::ptr_eq(existing, &definition) && **existing != *definition {
                    return Err(ZmanimError::DuplicateKey(definition.key()));
                }
                continue;
            }
            seen.insert(definition.key(), Arc::clone(&definition));

            let mut edges = Vec::new();
            for dependency in definition.dependencies() {
                let target = self.resolve_reference(&dependency).ok_or_else(|| {
                    ZmanimError::UnresolvedReference {
                        key: definition.key(),
                        reference: format!("{:?}", dependency.zman_type()),
                    }
                })?;
                edges.push(target.key());
                pending.push(target);
            }
            graph.insert(definition.key(), edges);
        }
        Ok(graph)
    }

    fn check_acyclic(&self, graph: &HashMap<&'static str, Vec<&'static str>>) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit(
            key: &'static str,
            graph: &HashMap<&'static str, Vec<&'static str>>,
            marks: &mut HashMap<&'static str, Mark>,
            path: &mut Vec<&'static str>,
        ) -> Result<()> {
            match marks.get(key) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    let start = path.iter().position(|k| *k == key).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(key);
                    return Err(ZmanimError::CatalogCycle { path: cycle });
                }
                None => {}
            }
            marks.insert(key, Mark::Visiting);
            path.push(key);
            for &next in graph.get(key).map(Vec::as_slice).unwrap_or_default() {
                visit(next, graph, marks, path)?;
            }
            path.pop();
            marks.insert(key, Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        let mut path = Vec::new();
        for definition in &self.definitions {
            visit(definition.key(), graph, &mut marks, &mut path)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in definitions
// ═══════════════════════════════════════════════════════════════════════

use ZmanAuthority::*;
use ZmanCalculationMethod as M;
use ZmanType::*;

/// Half of the mean synodic month (29d 12h 793 chalakim).
const HALF_SYNODIC_MONTH: TimeDelta = TimeDelta::milliseconds(1_275_721_666);

fn def(key: &'static str, zman_type: ZmanType, method: ZmanCalculationMethod) -> ZmanDefinition {
    ZmanDefinition::new(key, zman_type, method)
}

fn rel(key: &'static str, relationship: super::ZmanRelationship) -> ZmanDefinition {
    ZmanDefinition::relative(key, relationship)
}

/// Dawn/nightfall pair bounding a day.
struct Day {
    start: Arc<ZmanDefinition>,
    end: Arc<ZmanDefinition>,
}

/// Builds the standard catalog in declaration order.
#[derive(Default)]
struct Builder {
    definitions: Vec<Arc<ZmanDefinition>>,
}

impl Builder {
    fn add(&mut self, definition: ZmanDefinition) -> Arc<ZmanDefinition> {
        let definition = Arc::new(definition);
        self.definitions.push(Arc::clone(&definition));
        definition
    }

    /// An alos/tzais pair of the same measure.
    fn day_pair(
        &mut self,
        alos_key: &'static str,
        tzais_key: &'static str,
        method: ZmanCalculationMethod,
        authority: ZmanAuthority,
    ) -> Day {
        let start = self.add(rel(alos_key, Alos.occurs(method.clone()).before(Hanaitz)).authority(authority));
        let end = self.add(rel(tzais_key, Tzais.occurs(method).after(Shkia)).authority(authority));
        Day { start, end }
    }

    /// A zman `minutes` proportional minutes into `day`.
    fn into_day(
        &mut self,
        key: &'static str,
        zman_type: ZmanType,
        minutes: i64,
        day: &Day,
        authority: ZmanAuthority,
    ) -> Arc<ZmanDefinition> {
        self.add(
            def(key, zman_type, M::zmaniyos_minutes(minutes))
                .day(&day.start, &day.end)
                .authority(authority),
        )
    }

    fn shaah_zmanis(&mut self, key: &'static str, day: &Day, authority: ZmanAuthority) {
        self.add(
            def(
                key,
                ShaahZmanis,
                M::DayDefinition(Arc::clone(&day.start), Arc::clone(&day.end)),
            )
            .authority(authority),
        );
    }
}

/// Proportional minutes from the start of the day to each zman.
const SHMA: i64 = 3 * 60;
const TFILA: i64 = 4 * 60;
const BIUR_CHAMETZ: i64 = 5 * 60;
const MINCHA_GEDOLA: i64 = 6 * 60 + 30;
const MINCHA_KETANA: i64 = 9 * 60 + 30;
const PLAG_HAMINCHA: i64 = 10 * 60 + 45;

fn standard_definitions() -> Vec<Arc<ZmanDefinition>> {
    let mut b = Builder::default();

    // Canonical boundaries first: references by type resolve to these.
    let sunrise = b.add(def("sunrise", Hanaitz, M::Unspecified));
    let sunset = b.add(def("sunset", Shkia, M::Unspecified));
    let chatzos = b.add(def("chatzos", Chatzos, M::Unspecified).authority(Gra));
    b.add(def("chatzos_layla", ChatzosLayla, M::Unspecified));
    let molad = b.add(def("molad", Molad, M::Unspecified));

    let sea_level_sunrise = b.add(def("sea_level_sunrise", Hanaitz, M::Unspecified).elevation(UsesElevation::Never));
    let sea_level_sunset = b.add(def("sea_level_sunset", Shkia, M::Unspecified).elevation(UsesElevation::Never));
    b.add(def("elevated_sunrise", Hanaitz, M::Unspecified).elevation(UsesElevation::Always));
    b.add(def("elevated_sunset", Shkia, M::Unspecified).elevation(UsesElevation::Always));

    let gra = Day {
        start: Arc::clone(&sunrise),
        end: Arc::clone(&sunset),
    };
    let fixed_local_chatzos = b.add(
        def("fixed_local_chatzos", Chatzos, M::FixedLocalChatzos).authority(RavMosheFeinstein),
    );
    b.add(
        def("chatzos_half_day", Chatzos, M::zmaniyos_hours(6))
            .day(&sea_level_sunrise, &sea_level_sunset)
            .authority(Gra),
    );

    // Alos and tzais pairs.
    let mga_72 = b.day_pair("alos_72", "tzais_72", M::minutes(72), Mga);
    let mga_72_zmanis = b.day_pair("alos_72_zmanis", "tzais_72_zmanis", M::zmaniyos_minutes(72), Mga);
    let mga_90 = b.day_pair("alos_90", "tzais_90", M::minutes(90), Mga);
    let mga_90_zmanis = b.day_pair("alos_90_zmanis", "tzais_90_zmanis", M::zmaniyos_minutes(90), Mga);
    let mga_96 = b.day_pair("alos_96", "tzais_96", M::minutes(96), Mga);
    let mga_96_zmanis = b.day_pair("alos_96_zmanis", "tzais_96_zmanis", M::zmaniyos_minutes(96), Mga);
    let mga_120 = b.day_pair("alos_120", "tzais_120", M::minutes(120), Mga);
    b.day_pair("alos_120_zmanis", "tzais_120_zmanis", M::zmaniyos_minutes(120), Mga);
    let mga_60 = b.day_pair("alos_60", "tzais_60", M::minutes(60), Mga);
    let mga_16_1 = b.day_pair("alos_16_1_degrees", "tzais_16_1_degrees", M::degrees(16.1), Mga);
    let mga_18 = b.day_pair("alos_18_degrees", "tzais_18_degrees", M::degrees(18.0), Mga);
    let mga_19_8 = b.day_pair("alos_19_8_degrees", "tzais_19_8_degrees", M::degrees(19.8), Mga);
    let mga_26 = b.day_pair("alos_26_degrees", "tzais_26_degrees", M::degrees(26.0), Mga);

    // Misheyakir.
    for (key, degrees) in [
        ("misheyakir_10_2_degrees", 10.2),
        ("misheyakir_11_degrees", 11.0),
        ("misheyakir_11_5_degrees", 11.5),
    ] {
        b.add(rel(key, Misheyakir.occurs(M::degrees(degrees)).before(Hanaitz)));
    }

    // Baal HaTanya: sunrise and sunset at 1.583° below the horizon.
    let baal_hatanya = Day {
        start: b.add(
            rel("sunrise_baal_hatanya", Hanaitz.occurs(M::degrees(1.583)).before(Hanaitz))
                .authority(BaalHatanya),
        ),
        end: b.add(
            rel("sunset_baal_hatanya", Shkia.occurs(M::degrees(1.583)).after(Shkia))
                .authority(BaalHatanya),
        ),
    };
    b.add(
        rel("alos_baal_hatanya", Alos.occurs(M::degrees(16.9)).before(Hanaitz))
            .authority(BaalHatanya),
    );
    b.add(
        rel("tzais_baal_hatanya", Tzais.occurs(M::degrees(6.0)).after(Shkia))
            .authority(BaalHatanya),
    );

    // Ateret Torah: alos 72 zmaniyos to a configurable time after sunset.
    let ateret_torah = Day {
        start: Arc::clone(&mga_72_zmanis.start),
        end: b.add(
            rel(
                "tzais_ateret_torah",
                Tzais
                    .occurs(M::configured(DurationParameter::AteretTorah))
                    .after(Shkia),
            )
            .authority(AteretTorah),
        ),
    };

    // Geonim and other single-opinion tzais.
    let geonim = |key, degrees| rel(key, Tzais.occurs(M::degrees(degrees)).after(Shkia)).authority(Geonim);
    b.add(geonim("tzais_geonim_3_7_degrees", 3.7));
    let tzais_geonim_3_8 = b.add(geonim("tzais_geonim_3_8_degrees", 3.8));
    b.add(geonim("tzais_geonim_7_083_degrees", 7.083));
    b.add(geonim("tzais_geonim_8_5_degrees", 8.5));
    b.add(rel("tzais_50", Tzais.occurs(M::minutes(50)).after(Shkia)));
    let alos_16_1_to_tzais_3_8 = Day {
        start: Arc::clone(&mga_16_1.start),
        end: tzais_geonim_3_8,
    };

    // Sof zman shma and tfila.
    b.add(
        def("sof_zman_shma_gra", SofZmanShma, M::zmaniyos_minutes(SHMA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::IfSet)
            .authority(Gra)
            .relative_to(Chatzos, M::zmaniyos_minutes(-SHMA)),
    );
    b.into_day("sof_zman_shma_mga", SofZmanShma, SHMA, &mga_72, Mga);
    b.into_day("sof_zman_shma_mga_72_zmanis", SofZmanShma, SHMA, &mga_72_zmanis, Mga);
    b.into_day("sof_zman_shma_mga_90", SofZmanShma, SHMA, &mga_90, Mga);
    b.into_day("sof_zman_shma_mga_90_zmanis", SofZmanShma, SHMA, &mga_90_zmanis, Mga);
    b.into_day("sof_zman_shma_mga_96", SofZmanShma, SHMA, &mga_96, Mga);
    b.into_day("sof_zman_shma_mga_96_zmanis", SofZmanShma, SHMA, &mga_96_zmanis, Mga);
    b.into_day("sof_zman_shma_mga_120", SofZmanShma, SHMA, &mga_120, Mga);
    b.into_day("sof_zman_shma_mga_16_1_degrees", SofZmanShma, SHMA, &mga_16_1, Mga);
    b.into_day("sof_zman_shma_mga_18_degrees", SofZmanShma, SHMA, &mga_18, Mga);
    b.into_day("sof_zman_shma_mga_19_8_degrees", SofZmanShma, SHMA, &mga_19_8, Mga);
    b.into_day("sof_zman_shma_baal_hatanya", SofZmanShma, SHMA, &baal_hatanya, BaalHatanya);
    b.into_day("sof_zman_shma_ateret_torah", SofZmanShma, SHMA, &ateret_torah, AteretTorah);
    b.into_day(
        "sof_zman_shma_alos_16_1_to_tzais_3_8",
        SofZmanShma,
        SHMA,
        &alos_16_1_to_tzais_3_8,
        Mga,
    );
    // Half-day zmanim: the day ends at fixed local chatzos, so each half-day
    // hour is two of its temporal hours.
    let sunrise_to_fixed_chatzos = Day {
        start: Arc::clone(&sunrise),
        end: Arc::clone(&fixed_local_chatzos),
    };
    let mga_72_to_fixed_chatzos = Day {
        start: Arc::clone(&mga_72.start),
        end: Arc::clone(&fixed_local_chatzos),
    };
    b.into_day(
        "sof_zman_shma_gra_sunrise_to_fixed_local_chatzos",
        SofZmanShma,
        2 * SHMA,
        &sunrise_to_fixed_chatzos,
        RavMosheFeinstein,
    );
    b.into_day(
        "sof_zman_shma_mga_72_to_fixed_local_chatzos",
        SofZmanShma,
        2 * SHMA,
        &mga_72_to_fixed_chatzos,
        RavMosheFeinstein,
    );
    b.add(rel(
        "sof_zman_shma_3_hours_before_chatzos",
        SofZmanShma.occurs(M::minutes(180)).before(Chatzos),
    ));

    b.add(
        def("sof_zman_tfila_gra", SofZmanTfila, M::zmaniyos_minutes(TFILA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::IfSet)
            .authority(Gra),
    );
    b.into_day("sof_zman_tfila_mga", SofZmanTfila, TFILA, &mga_72, Mga);
    b.into_day("sof_zman_tfila_mga_72_zmanis", SofZmanTfila, TFILA, &mga_72_zmanis, Mga);
    b.into_day("sof_zman_tfila_mga_90", SofZmanTfila, TFILA, &mga_90, Mga);
    b.into_day("sof_zman_tfila_mga_90_zmanis", SofZmanTfila, TFILA, &mga_90_zmanis, Mga);
    b.into_day("sof_zman_tfila_mga_96", SofZmanTfila, TFILA, &mga_96, Mga);
    b.into_day("sof_zman_tfila_mga_96_zmanis", SofZmanTfila, TFILA, &mga_96_zmanis, Mga);
    b.into_day("sof_zman_tfila_mga_120", SofZmanTfila, TFILA, &mga_120, Mga);
    b.into_day("sof_zman_tfila_mga_16_1_degrees", SofZmanTfila, TFILA, &mga_16_1, Mga);
    b.into_day("sof_zman_tfila_mga_18_degrees", SofZmanTfila, TFILA, &mga_18, Mga);
    b.into_day("sof_zman_tfila_mga_19_8_degrees", SofZmanTfila, TFILA, &mga_19_8, Mga);
    b.into_day("sof_zman_tfila_baal_hatanya", SofZmanTfila, TFILA, &baal_hatanya, BaalHatanya);
    b.into_day("sof_zman_tfila_ateret_torah", SofZmanTfila, TFILA, &ateret_torah, AteretTorah);
    b.into_day(
        "sof_zman_tfila_gra_sunrise_to_fixed_local_chatzos",
        SofZmanTfila,
        2 * TFILA,
        &sunrise_to_fixed_chatzos,
        RavMosheFeinstein,
    );
    b.add(rel(
        "sof_zman_tfila_2_hours_before_chatzos",
        SofZmanTfila.occurs(M::minutes(120)).before(Chatzos),
    ));

    // Erev Pesach.
    b.into_day("sof_zman_achilas_chametz_gra", SofZmanAchilasChametz, TFILA, &gra, Gra);
    b.into_day("sof_zman_achilas_chametz_mga_72", SofZmanAchilasChametz, TFILA, &mga_72, Mga);
    b.into_day(
        "sof_zman_achilas_chametz_mga_16_1_degrees",
        SofZmanAchilasChametz,
        TFILA,
        &mga_16_1,
        Mga,
    );
    b.into_day(
        "sof_zman_achilas_chametz_baal_hatanya",
        SofZmanAchilasChametz,
        TFILA,
        &baal_hatanya,
        BaalHatanya,
    );
    b.into_day("sof_zman_biur_chametz_gra", SofZmanBiurChametz, BIUR_CHAMETZ, &gra, Gra);
    b.into_day("sof_zman_biur_chametz_mga_72", SofZmanBiurChametz, BIUR_CHAMETZ, &mga_72, Mga);
    b.into_day(
        "sof_zman_biur_chametz_mga_16_1_degrees",
        SofZmanBiurChametz,
        BIUR_CHAMETZ,
        &mga_16_1,
        Mga,
    );
    b.into_day(
        "sof_zman_biur_chametz_baal_hatanya",
        SofZmanBiurChametz,
        BIUR_CHAMETZ,
        &baal_hatanya,
        BaalHatanya,
    );

    // Mincha.
    let mincha_gedola_gra = b.add(
        def("mincha_gedola", MinchaGedola, M::zmaniyos_minutes(MINCHA_GEDOLA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::IfSet)
            .authority(Gra)
            .relative_to(Chatzos, M::zmaniyos_minutes(30)),
    );
    b.add(
        def("mincha_gedola_sea_level", MinchaGedola, M::zmaniyos_minutes(MINCHA_GEDOLA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::Never)
            .authority(Gra),
    );
    b.add(
        def("mincha_gedola_elevated", MinchaGedola, M::zmaniyos_minutes(MINCHA_GEDOLA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::Always)
            .authority(Gra),
    );
    let mincha_gedola_30 = b.add(rel(
        "mincha_gedola_30_minutes",
        MinchaGedola.occurs(M::minutes(30)).after(&chatzos),
    ));
    b.add(def(
        "mincha_gedola_greater_than_30",
        MinchaGedola,
        M::LaterOf(mincha_gedola_gra, mincha_gedola_30),
    ));
    b.add(
        rel(
            "mincha_gedola_gra_fixed_local_chatzos_30_minutes",
            MinchaGedola.occurs(M::minutes(30)).after(&fixed_local_chatzos),
        )
        .authority(RavMosheFeinstein),
    );
    b.into_day("mincha_gedola_mga_72", MinchaGedola, MINCHA_GEDOLA, &mga_72, Mga);
    b.into_day("mincha_gedola_mga_16_1_degrees", MinchaGedola, MINCHA_GEDOLA, &mga_16_1, Mga);
    b.into_day("mincha_gedola_baal_hatanya", MinchaGedola, MINCHA_GEDOLA, &baal_hatanya, BaalHatanya);
    b.into_day("mincha_gedola_ateret_torah", MinchaGedola, MINCHA_GEDOLA, &ateret_torah, AteretTorah);

    let fixed_chatzos_to_sunset = Day {
        start: Arc::clone(&fixed_local_chatzos),
        end: Arc::clone(&sunset),
    };
    b.add(
        def("mincha_ketana", MinchaKetana, M::zmaniyos_minutes(MINCHA_KETANA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::IfSet)
            .authority(Gra)
            .relative_to(Shkia, M::zmaniyos_minutes(-150)),
    );
    b.into_day("mincha_ketana_mga_72", MinchaKetana, MINCHA_KETANA, &mga_72, Mga);
    b.into_day("mincha_ketana_mga_16_1_degrees", MinchaKetana, MINCHA_KETANA, &mga_16_1, Mga);
    b.into_day("mincha_ketana_baal_hatanya", MinchaKetana, MINCHA_KETANA, &baal_hatanya, BaalHatanya);
    b.into_day("mincha_ketana_ateret_torah", MinchaKetana, MINCHA_KETANA, &ateret_torah, AteretTorah);
    b.into_day(
        "mincha_ketana_gra_fixed_local_chatzos_to_sunset",
        MinchaKetana,
        2 * (MINCHA_KETANA - 6 * 60),
        &fixed_chatzos_to_sunset,
        RavMosheFeinstein,
    );

    b.add(
        def("plag_hamincha", PlagHamincha, M::zmaniyos_minutes(PLAG_HAMINCHA))
            .day(&gra.start, &gra.end)
            .elevation(UsesElevation::IfSet)
            .authority(Gra)
            .relative_to(Shkia, M::zmaniyos_minutes(-75)),
    );
    b.into_day("plag_hamincha_mga_72", PlagHamincha, PLAG_HAMINCHA, &mga_72, Mga);
    b.into_day("plag_hamincha_mga_72_zmanis", PlagHamincha, PLAG_HAMINCHA, &mga_72_zmanis, Mga);
    b.into_day("plag_hamincha_mga_90", PlagHamincha, PLAG_HAMINCHA, &mga_90, Mga);
    b.into_day("plag_hamincha_mga_96", PlagHamincha, PLAG_HAMINCHA, &mga_96, Mga);
    b.into_day("plag_hamincha_mga_120", PlagHamincha, PLAG_HAMINCHA, &mga_120, Mga);
    b.into_day("plag_hamincha_mga_16_1_degrees", PlagHamincha, PLAG_HAMINCHA, &mga_16_1, Mga);
    b.into_day("plag_hamincha_mga_18_degrees", PlagHamincha, PLAG_HAMINCHA, &mga_18, Mga);
    b.into_day("plag_hamincha_mga_19_8_degrees", PlagHamincha, PLAG_HAMINCHA, &mga_19_8, Mga);
    b.into_day("plag_hamincha_mga_26_degrees", PlagHamincha, PLAG_HAMINCHA, &mga_26, Mga);
    b.into_day("plag_hamincha_baal_hatanya", PlagHamincha, PLAG_HAMINCHA, &baal_hatanya, BaalHatanya);
    b.into_day("plag_hamincha_ateret_torah", PlagHamincha, PLAG_HAMINCHA, &ateret_torah, AteretTorah);
    b.into_day(
        "plag_hamincha_gra_fixed_local_chatzos_to_sunset",
        PlagHamincha,
        2 * (PLAG_HAMINCHA - 6 * 60),
        &fixed_chatzos_to_sunset,
        RavMosheFeinstein,
    );
    // alos 16.1° to sea-level sunset
    b.add(
        def("plag_hamincha_alos_to_sunset", PlagHamincha, M::zmaniyos_minutes(PLAG_HAMINCHA))
            .day(&mga_16_1.start, &sea_level_sunset)
            .authority(Mga),
    );

    // Evening.
    b.add(rel(
        "candle_lighting",
        CandleLighting
            .occurs(M::configured(DurationParameter::CandleLighting))
            .before(&sea_level_sunset),
    ));
    b.add(
        rel(
            "bain_hashmashos_rabbeinu_tam_13_24_degrees",
            BainHashmashos.occurs(M::degrees(13.24)).after(Shkia),
        )
        .authority(RabbeinuTam),
    );
    b.add(
        rel(
            "bain_hashmashos_rabbeinu_tam_58_5_minutes",
            BainHashmashos
                .occurs(M::FixedMinutesFloat(58.5))
                .after(Shkia),
        )
        .authority(RabbeinuTam),
    );
    b.add(
        rel(
            "bain_hashmashos_yereim_18_minutes",
            BainHashmashos.occurs(M::minutes(18)).before(Shkia),
        )
        .authority(Yereim),
    );

    // Proportional hours.
    b.shaah_zmanis("shaah_zmanis_gra", &gra, Gra);
    b.shaah_zmanis("shaah_zmanis_mga", &mga_72, Mga);
    b.shaah_zmanis("shaah_zmanis_60_minutes", &mga_60, Mga);
    b.shaah_zmanis("shaah_zmanis_72_minutes_zmanis", &mga_72_zmanis, Mga);
    b.shaah_zmanis("shaah_zmanis_90_minutes", &mga_90, Mga);
    b.shaah_zmanis("shaah_zmanis_90_minutes_zmanis", &mga_90_zmanis, Mga);
    b.shaah_zmanis("shaah_zmanis_96_minutes", &mga_96, Mga);
    b.shaah_zmanis("shaah_zmanis_96_minutes_zmanis", &mga_96_zmanis, Mga);
    b.shaah_zmanis("shaah_zmanis_120_minutes", &mga_120, Mga);
    b.shaah_zmanis("shaah_zmanis_16_1_degrees", &mga_16_1, Mga);
    b.shaah_zmanis("shaah_zmanis_18_degrees", &mga_18, Mga);
    b.shaah_zmanis("shaah_zmanis_19_8_degrees", &mga_19_8, Mga);
    b.shaah_zmanis("shaah_zmanis_26_degrees", &mga_26, Mga);
    b.shaah_zmanis("shaah_zmanis_baal_hatanya", &baal_hatanya, BaalHatanya);
    b.shaah_zmanis("shaah_zmanis_ateret_torah", &ateret_torah, AteretTorah);
    b.shaah_zmanis("shaah_zmanis_alos_16_1_to_tzais_3_8", &alos_16_1_to_tzais_3_8, Mga);

    // Kiddush levana.
    b.add(rel(
        "tchilas_zman_kidush_levana_3_days",
        TchilasZmanKidushLevana
            .occurs(M::FixedDuration(TimeDelta::days(3)))
            .after(&molad),
    ));
    b.add(rel(
        "tchilas_zman_kidush_levana_7_days",
        TchilasZmanKidushLevana
            .occurs(M::FixedDuration(TimeDelta::days(7)))
            .after(&molad),
    ));
    b.add(rel(
        "sof_zman_kidush_levana_between_moldos",
        SofZmanKidushLevana
            .occurs(M::FixedDuration(HALF_SYNODIC_MONTH))
            .after(&molad),
    ));
    b.add(rel(
        "sof_zman_kidush_levana_15_days",
        SofZmanKidushLevana
            .occurs(M::FixedDuration(TimeDelta::days(15)))
            .after(&molad),
    ));

    b.definitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(definition: ZmanDefinition) -> Arc<ZmanDefinition> {
        Arc::new(definition)
    }

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = Catalog::standard();
        assert!(catalog.len() > 100);
        assert_eq!(catalog.canonical(Hanaitz).map(|d| d.key()), Some("sunrise"));
        assert_eq!(catalog.canonical(Shkia).map(|d| d.key()), Some("sunset"));
        assert_eq!(catalog.canonical(Chatzos).map(|d| d.key()), Some("chatzos"));
        assert_eq!(catalog.position("sunrise"), Some(0));
    }

    #[test]
    fn standard_catalog_is_shared() {
        assert!(Arc::ptr_eq(&Catalog::standard(), &Catalog::standard()));
    }

    #[test]
    fn every_type_has_a_standard_definition() {
        let catalog = Catalog::standard();
        for t in ZmanType::ALL {
            assert!(catalog.canonical(t).is_some(), "{t:?}");
        }
    }

    #[test]
    fn lookup_by_key() {
        let catalog = Catalog::standard();
        let tzais = catalog.get("tzais_72").unwrap();
        assert_eq!(tzais.zman_type(), Tzais);
        assert_eq!(tzais.method(), &M::minutes(72));
        assert!(catalog.get("no_such_zman").is_none());
    }

    #[test]
    fn duplicate_top_level_key_is_rejected() {
        let err = Catalog::new([
            arc(def("sunrise", Hanaitz, M::Unspecified)),
            arc(def("sunrise", Shkia, M::Unspecified)),
        ])
        .unwrap_err();
        assert_eq!(err, ZmanimError::DuplicateKey("sunrise"));
    }

    #[test]
    fn nested_definition_shadowing_a_key_is_rejected() {
        let sunrise = arc(def("sunrise", Hanaitz, M::Unspecified));
        let impostor = arc(def("sunrise", Hanaitz, M::FixedLocalChatzos));
        let sunset = arc(def("sunset", Shkia, M::Unspecified));
        let err = Catalog::new([
            Arc::clone(&sunrise),
            Arc::clone(&sunset),
            arc(def("hour", ShaahZmanis, M::DayDefinition(impostor, sunset))),
        ])
        .unwrap_err();
        assert_eq!(err, ZmanimError::DuplicateKey("sunrise"));
    }

    #[test]
    fn nested_copy_of_a_definition_is_accepted() {
        let sunrise = arc(def("sunrise", Hanaitz, M::Unspecified));
        let copy = arc(def("sunrise", Hanaitz, M::Unspecified));
        let sunset = arc(def("sunset", Shkia, M::Unspecified));
        let catalog = Catalog::new([
            sunrise,
            Arc::clone(&sunset),
            arc(def("hour", ShaahZmanis, M::DayDefinition(copy, sunset))),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn missing_canonical_definition_is_rejected() {
        let err = Catalog::new([arc(rel(
            "tzais_72",
            Tzais.occurs(M::minutes(72)).after(Shkia),
        ))])
        .unwrap_err();
        assert!(matches!(
            err,
            ZmanimError::UnresolvedReference { key: "tzais_72", .. }
        ));
    }

    #[test]
    fn cycle_through_type_references_is_rejected() {
        let err = Catalog::new([
            arc(rel("a", Alos.occurs(M::minutes(10)).before(Tzais))),
            arc(rel("b", Tzais.occurs(M::minutes(10)).after(Alos))),
        ])
        .unwrap_err();
        match err {
            ZmanimError::CatalogCycle { path } => {
                assert_eq!(path.first(), path.last());
                assert!(path.contains(&"a") && path.contains(&"b"));
                assert_eq!(path.len(), 3);
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let err = Catalog::new([arc(rel(
            "loop",
            Tzais.occurs(M::minutes(1)).after(Tzais),
        ))])
        .unwrap_err();
        assert_eq!(
            err,
            ZmanimError::CatalogCycle {
                path: vec!["loop", "loop"]
            }
        );
    }

    #[test]
    fn half_synodic_month() {
        assert_eq!(HALF_SYNODIC_MONTH.num_days(), 14);
        assert_eq!(
            HALF_SYNODIC_MONTH - TimeDelta::days(14),
            TimeDelta::hours(18) + TimeDelta::minutes(22) + TimeDelta::milliseconds(1_666)
        );
    }
}
