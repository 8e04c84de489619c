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

//! Inventory public API integration tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use vending_machine_rs::{Inventory, Item, Selection, VendError};

// === Helper Functions ===

fn two_item_inventory() -> Inventory {
    Inventory::from_iter([
        (
            Selection::Soda,
            Item {
                price: dec!(1.50),
                quantity: 2,
            },
        ),
        (
            Selection::CandyBar,
            Item {
                price: dec!(1.25),
                quantity: 0,
            },
        ),
    ])
}

// === Construction ===

#[test]
fn new_from_hashmap() {
    let mut items = HashMap::new();
    items.insert(
        Selection::Water,
        Item {
            price: dec!(1.00),
            quantity: 12,
        },
    );
    let inventory = Inventory::new(items);
    assert_eq!(inventory.lookup(Selection::Water).unwrap().quantity, 12);
}

#[test]
fn free_items_are_allowed() {
    // Zero price is valid; only negative prices violate the catalog contract.
    let inventory = Inventory::from_iter([(
        Selection::Gum,
        Item {
            price: Decimal::ZERO,
            quantity: 1,
        },
    )]);
    assert_eq!(inventory.lookup(Selection::Gum).unwrap().price, Decimal::ZERO);
}

// === Lookup ===

#[test]
fn lookup_returns_current_item_state() {
    let inventory = two_item_inventory();
    let soda = inventory.lookup(Selection::Soda).unwrap();
    assert_eq!(soda.price, dec!(1.50));
    assert_eq!(soda.quantity, 2);
}

#[test]
fn lookup_reports_zero_stock_items_as_present() {
    // Out of stock is not the same as not stocked.
    let inventory = two_item_inventory();
    let bar = inventory.lookup(Selection::CandyBar).unwrap();
    assert_eq!(bar.quantity, 0);
}

#[test]
fn lookup_absent_key_is_none() {
    let inventory = two_item_inventory();
    assert_eq!(inventory.lookup(Selection::PopTart), None);
}

// === Decrement ===

#[test]
fn decrement_never_reduces_quantity_below_zero() {
    let mut inventory = two_item_inventory();

    // Drain soda completely, then keep trying.
    inventory.decrement(Selection::Soda, 2).unwrap();
    assert_eq!(inventory.lookup(Selection::Soda).unwrap().quantity, 0);

    for _ in 0..3 {
        let result = inventory.decrement(Selection::Soda, 1);
        assert_eq!(result, Err(VendError::OutOfStock));
        assert_eq!(inventory.lookup(Selection::Soda).unwrap().quantity, 0);
    }
}

#[test]
fn over_decrement_leaves_quantity_unchanged() {
    let mut inventory = two_item_inventory();
    let result = inventory.decrement(Selection::Soda, 3);
    assert_eq!(result, Err(VendError::OutOfStock));
    assert_eq!(inventory.lookup(Selection::Soda).unwrap().quantity, 2);
}

#[test]
fn decrement_does_not_touch_other_items() {
    let mut inventory = two_item_inventory();
    inventory.decrement(Selection::Soda, 1).unwrap();
    assert_eq!(inventory.lookup(Selection::CandyBar).unwrap().quantity, 0);
    assert_eq!(inventory.lookup(Selection::CandyBar).unwrap().price, dec!(1.25));
}

#[test]
fn decrement_preserves_price() {
    let mut inventory = two_item_inventory();
    inventory.decrement(Selection::Soda, 1).unwrap();
    assert_eq!(inventory.lookup(Selection::Soda).unwrap().price, dec!(1.50));
}

#[test]
fn decrement_absent_key_is_invalid_selection() {
    let mut inventory = two_item_inventory();
    let result = inventory.decrement(Selection::FruitJuice, 1);
    assert_eq!(result, Err(VendError::InvalidSelection));
}
