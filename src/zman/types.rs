// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use crate::astronomical::SolarEvent;
use std::fmt;

/// Identity of a named time point.
///
/// A type carries no computation; it only says *what* a definition
/// describes, and which side of the day it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZmanType {
    /// Dawn.
    Alos,
    /// Earliest time for tallis and tefillin.
    Misheyakir,
    /// Sunrise.
    Hanaitz,
    SofZmanShma,
    SofZmanTfila,
    SofZmanAchilasChametz,
    SofZmanBiurChametz,
    /// Midday.
    Chatzos,
    MinchaGedola,
    MinchaKetana,
    PlagHamincha,
    CandleLighting,
    /// Sunset.
    Shkia,
    /// Twilight between sunset and nightfall.
    BainHashmashos,
    /// Nightfall.
    Tzais,
    /// Midnight.
    ChatzosLayla,
    /// Mean lunar conjunction.
    Molad,
    TchilasZmanKidushLevana,
    SofZmanKidushLevana,
    /// Proportional hour.
    ShaahZmanis,
}

impl ZmanType {
    /// Every type, in the order of the day.
    pub const ALL: [ZmanType; 20] = [
        ZmanType::Alos,
        ZmanType::Misheyakir,
        ZmanType::Hanaitz,
        ZmanType::SofZmanShma,
        ZmanType::SofZmanTfila,
        ZmanType::SofZmanAchilasChametz,
        ZmanType::SofZmanBiurChametz,
        ZmanType::Chatzos,
        ZmanType::MinchaGedola,
        ZmanType::MinchaKetana,
        ZmanType::PlagHamincha,
        ZmanType::CandleLighting,
        ZmanType::Shkia,
        ZmanType::BainHashmashos,
        ZmanType::Tzais,
        ZmanType::ChatzosLayla,
        ZmanType::Molad,
        ZmanType::TchilasZmanKidushLevana,
        ZmanType::SofZmanKidushLevana,
        ZmanType::ShaahZmanis,
    ];

    /// The solar event this time point sits nearest to.
    ///
    /// Degree-based offsets measured from a zman are taken on this side of
    /// the day.  Lunar and duration-only types have none.
    pub const fn solar_event(self) -> Option<SolarEvent> {
        match self {
            ZmanType::Alos
            | ZmanType::Misheyakir
            | ZmanType::Hanaitz
            | ZmanType::SofZmanShma
            | ZmanType::SofZmanTfila
            | ZmanType::SofZmanAchilasChametz
            | ZmanType::SofZmanBiurChametz => Some(SolarEvent::Sunrise),
            ZmanType::Chatzos => Some(SolarEvent::Noon),
            ZmanType::MinchaGedola
            | ZmanType::MinchaKetana
            | ZmanType::PlagHamincha
            | ZmanType::CandleLighting
            | ZmanType::Shkia
            | ZmanType::BainHashmashos
            | ZmanType::Tzais => Some(SolarEvent::Sunset),
            ZmanType::ChatzosLayla => Some(SolarEvent::Midnight),
            ZmanType::Molad
            | ZmanType::TchilasZmanKidushLevana
            | ZmanType::SofZmanKidushLevana
            | ZmanType::ShaahZmanis => None,
        }
    }

    /// Whether the time point is derived from the molad rather than the sun.
    pub const fn is_molad_based(self) -> bool {
        matches!(
            self,
            ZmanType::Molad | ZmanType::TchilasZmanKidushLevana | ZmanType::SofZmanKidushLevana
        )
    }

    /// Transliterated name.
    pub const fn name(self) -> &'static str {
        match self {
            ZmanType::Alos => "Alos Hashachar",
            ZmanType::Misheyakir => "Misheyakir",
            ZmanType::Hanaitz => "Hanetz",
            ZmanType::SofZmanShma => "Sof Zman Krias Shma",
            ZmanType::SofZmanTfila => "Sof Zman Tfila",
            ZmanType::SofZmanAchilasChametz => "Sof Zman Achilas Chametz",
            ZmanType::SofZmanBiurChametz => "Sof Zman Biur Chametz",
            ZmanType::Chatzos => "Chatzos",
            ZmanType::MinchaGedola => "Mincha Gedola",
            ZmanType::MinchaKetana => "Mincha Ketana",
            ZmanType::PlagHamincha => "Plag Hamincha",
            ZmanType::CandleLighting => "Candle Lighting",
            ZmanType::Shkia => "Shkiah",
            ZmanType::BainHashmashos => "Bain Hashmashos",
            ZmanType::Tzais => "Tzais",
            ZmanType::ChatzosLayla => "Chatzos Layla",
            ZmanType::Molad => "Molad",
            ZmanType::TchilasZmanKidushLevana => "Tchilas Zman Kidush Levana",
            ZmanType::SofZmanKidushLevana => "Sof Zman Kidush Levana",
            ZmanType::ShaahZmanis => "Shaah Zmanis",
        }
    }
}

impl fmt::Display for ZmanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
