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

//! Inventory model: the per-selection item records and stock mutation rules.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vending_machine_rs::{Inventory, Item, Selection};
//!
//! let inventory = Inventory::from_iter([(
//!     Selection::Soda,
//!     Item { price: dec!(1.50), quantity: 2 },
//! )]);
//! assert_eq!(inventory.lookup(Selection::Soda).unwrap().quantity, 2);
//! assert_eq!(inventory.lookup(Selection::Gum), None);
//! ```

use crate::VendError;
use crate::base::Selection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog entry: unit price and units in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    pub price: Decimal,
    pub quantity: u32,
}

/// Mapping from [`Selection`] to [`Item`].
///
/// Populated once at construction from a validated catalog; never gains or
/// loses keys afterwards. The only mutation is [`decrement`](Inventory::decrement),
/// which either replaces the stored item wholesale or leaves it untouched.
#[derive(Debug, Clone)]
pub struct Inventory {
    items: HashMap<Selection, Item>,
}

impl Inventory {
    pub fn new(items: HashMap<Selection, Item>) -> Self {
        let inventory = Self { items };
        inventory.assert_invariants();
        inventory
    }

    fn assert_invariants(&self) {
        for (selection, item) in &self.items {
            debug_assert!(
                item.price >= Decimal::ZERO,
                "Invariant violated: negative price for {}: {}",
                selection,
                item.price
            );
        }
    }

    /// Returns the current item state for a selection.
    ///
    /// `None` means the catalog never stocked this selection; the key set is
    /// fixed, so this cannot change over the machine's lifetime.
    pub fn lookup(&self, selection: Selection) -> Option<Item> {
        self.items.get(&selection).copied()
    }

    /// Removes `quantity` units of `selection` from stock.
    ///
    /// # Errors
    ///
    /// - [`VendError::InvalidSelection`] - the selection is not stocked.
    /// - [`VendError::OutOfStock`] - fewer than `quantity` units remain.
    ///
    /// On failure the stored item is unchanged; there is no partial mutation.
    pub fn decrement(&mut self, selection: Selection, quantity: u32) -> Result<(), VendError> {
        let item = self
            .items
            .get_mut(&selection)
            .ok_or(VendError::InvalidSelection)?;
        if item.quantity < quantity {
            return Err(VendError::OutOfStock);
        }
        item.quantity -= quantity;
        Ok(())
    }
}

impl FromIterator<(Selection, Item)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (Selection, Item)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
