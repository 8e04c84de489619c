// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 vending-machine-rs contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The closed set of catalog selection identifiers.

use crate::VendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for one catalog entry.
///
/// The set is fixed at build time and ordered: [`Selection::ALL`] defines the
/// catalog display order. Wire names (CSV, JSON, path segments) use the
/// camelCase form, e.g. `dietSoda`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    Soda,
    DietSoda,
    Chips,
    Cookie,
    Sandwich,
    Wrap,
    CandyBar,
    PopTart,
    Water,
    FruitJuice,
    SportsDrink,
    Gum,
}

impl Selection {
    /// Every selection, in catalog display order.
    pub const ALL: [Selection; 12] = [
        Selection::Soda,
        Selection::DietSoda,
        Selection::Chips,
        Selection::Cookie,
        Selection::Sandwich,
        Selection::Wrap,
        Selection::CandyBar,
        Selection::PopTart,
        Selection::Water,
        Selection::FruitJuice,
        Selection::SportsDrink,
        Selection::Gum,
    ];

    /// The camelCase wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Soda => "soda",
            Selection::DietSoda => "dietSoda",
            Selection::Chips => "chips",
            Selection::Cookie => "cookie",
            Selection::Sandwich => "sandwich",
            Selection::Wrap => "wrap",
            Selection::CandyBar => "candyBar",
            Selection::PopTart => "popTart",
            Selection::Water => "water",
            Selection::FruitJuice => "fruitJuice",
            Selection::SportsDrink => "sportsDrink",
            Selection::Gum => "gum",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Selection {
    type Err = VendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::ALL
            .into_iter()
            .find(|selection| selection.name() == s)
            .ok_or(VendError::InvalidSelection)
    }
}
