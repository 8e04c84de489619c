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

//! Catalog loading.
//!
//! Parses an externally supplied CSV catalog into a validated [`Inventory`].
//! Unknown selection names, negative prices, and duplicate rows are rejected
//! here; the engine assumes it never receives an invalid catalog. A loading
//! failure is an earlier-stage fatal condition, not a vend error.

use crate::base::Selection;
use crate::inventory::{Inventory, Item};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;

/// Catalog loading errors. All fatal to startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// CSV structure or field is unreadable, including unknown selection names
    #[error("malformed catalog: {0}")]
    Malformed(#[from] csv::Error),

    /// A row carries a negative price
    #[error("negative price for selection '{0}'")]
    NegativePrice(Selection),

    /// The same selection appears in more than one row
    #[error("duplicate catalog row for selection '{0}'")]
    DuplicateSelection(Selection),
}

/// Raw CSV record matching the catalog format.
///
/// Fields: `selection, price, quantity`
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    selection: Selection,
    price: Decimal,
    quantity: u32,
}

/// Loads a catalog CSV into an [`Inventory`].
///
/// # CSV Format
///
/// Expected columns: `selection, price, quantity`
/// - `selection`: one of the wire names (e.g. `soda`, `dietSoda`)
/// - `price`: non-negative decimal unit price
/// - `quantity`: units in stock
///
/// # Example
///
/// ```
/// use vending_machine_rs::{Selection, catalog};
///
/// let csv = "selection,price,quantity\nsoda,1.50,2\ngum,0.75,5\n";
/// let inventory = catalog::load(csv.as_bytes()).unwrap();
/// assert_eq!(inventory.lookup(Selection::Gum).unwrap().quantity, 5);
/// ```
///
/// # Errors
///
/// Unlike command processing, catalog loading is strict: the first malformed,
/// unknown, negative-priced, or duplicated row aborts the load.
pub fn load<R: Read>(reader: R) -> Result<Inventory, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let mut items = HashMap::new();
    for result in rdr.deserialize::<CatalogRecord>() {
        let record = result?;
        if record.price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(record.selection));
        }
        let item = Item {
            price: record.price,
            quantity: record.quantity,
        };
        if items.insert(record.selection, item).is_some() {
            return Err(CatalogError::DuplicateSelection(record.selection));
        }
    }
    Ok(Inventory::new(items))
}
