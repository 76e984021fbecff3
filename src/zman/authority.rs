// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use std::fmt;

/// An opinion a zman definition follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZmanAuthority {
    /// The Vilna Gaon: the day runs from sunrise to sunset.
    Gra,
    /// The Magen Avraham: the day runs from alos to tzais.
    Mga,
    BaalHatanya,
    AteretTorah,
    Geonim,
    RabbeinuTam,
    Yereim,
    /// Rav Moshe Feinstein, who measures from fixed local chatzos.
    RavMosheFeinstein,
    Rambam,
}

impl ZmanAuthority {
    pub const fn name(self) -> &'static str {
        match self {
            ZmanAuthority::Gra => "GRA",
            ZmanAuthority::Mga => "Magen Avraham",
            ZmanAuthority::BaalHatanya => "Baal HaTanya",
            ZmanAuthority::AteretTorah => "Ateret Torah",
            ZmanAuthority::Geonim => "Geonim",
            ZmanAuthority::RabbeinuTam => "Rabbeinu Tam",
            ZmanAuthority::Yereim => "Yereim",
            ZmanAuthority::RavMosheFeinstein => "Rav Moshe Feinstein",
            ZmanAuthority::Rambam => "Rambam",
        }
    }
}

impl fmt::Display for ZmanAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
