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

//! The vending machine engine: deposited balance plus inventory.
//!
//! [`VendingMachine`] holds both pieces of state behind a single mutex, so the
//! two mutations a successful vend performs (debit balance, decrement stock)
//! are always observed together.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vending_machine_rs::{Inventory, Item, Selection, VendingMachine};
//!
//! let inventory = Inventory::from_iter([(
//!     Selection::Soda,
//!     Item { price: dec!(1.50), quantity: 2 },
//! )]);
//! let machine = VendingMachine::new(inventory);
//!
//! machine.vend(Selection::Soda, 1).unwrap();
//! assert_eq!(machine.balance(), dec!(8.50));
//! assert_eq!(machine.item(Selection::Soda).unwrap().quantity, 1);
//! ```

use crate::base::Selection;
use crate::inventory::{Inventory, Item};
use crate::VendError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

#[derive(Debug)]
struct MachineData {
    inventory: Inventory,
    balance: Decimal,
}

impl MachineData {
    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: deposited balance went negative: {}",
            self.balance
        );
    }

    /// Adds funds to the running balance.
    fn deposit(&mut self, amount: Decimal) -> Result<(), VendError> {
        if amount <= Decimal::ZERO {
            return Err(VendError::InvalidAmount);
        }
        self.balance += amount;
        self.assert_invariants();
        Ok(())
    }

    /// Dispenses `quantity` units of `selection`, debiting the balance.
    ///
    /// The stock check precedes the funds check: a request that is both
    /// out of stock and underfunded reports [`VendError::OutOfStock`].
    fn vend(&mut self, selection: Selection, quantity: u32) -> Result<(), VendError> {
        if quantity == 0 {
            return Err(VendError::InvalidQuantity);
        }

        let item = self
            .inventory
            .lookup(selection)
            .ok_or(VendError::InvalidSelection)?;
        if item.quantity < quantity {
            return Err(VendError::OutOfStock);
        }

        let total = item.price * Decimal::from(quantity);
        if self.balance < total {
            return Err(VendError::InsufficientFunds);
        }

        // All checks passed; neither mutation below can fail.
        self.balance -= total;
        self.inventory.decrement(selection, quantity)?;
        self.assert_invariants();
        Ok(())
    }
}

/// A single vending machine: one inventory, one deposited balance.
///
/// Each instance owns its state outright, so independent machines coexist and
/// test in isolation. All operations lock the machine for their full duration;
/// no caller can observe a balance debit without the matching stock decrement.
///
/// # Invariants
///
/// - `balance >= 0` at all times.
/// - The inventory key set is fixed at construction.
/// - A failed operation leaves balance and stock exactly unchanged.
#[derive(Debug)]
pub struct VendingMachine {
    inner: Mutex<MachineData>,
}

impl VendingMachine {
    const DECIMAL_PRECISION: u32 = 2;

    /// Balance a machine starts with unless overridden.
    pub const DEFAULT_DEPOSIT: Decimal = dec!(10.00);

    /// Creates a machine stocked with `inventory` and the default starting
    /// balance of [`DEFAULT_DEPOSIT`](Self::DEFAULT_DEPOSIT).
    pub fn new(inventory: Inventory) -> Self {
        Self::with_starting_balance(inventory, Self::DEFAULT_DEPOSIT)
    }

    /// Creates a machine with an explicit starting balance.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `starting_balance` is negative.
    pub fn with_starting_balance(inventory: Inventory, starting_balance: Decimal) -> Self {
        let data = MachineData {
            inventory,
            balance: starting_balance,
        };
        data.assert_invariants();
        Self {
            inner: Mutex::new(data),
        }
    }

    /// Current deposited balance.
    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Every selection the catalog can ever stock, in display order.
    pub fn selections(&self) -> &'static [Selection] {
        &Selection::ALL
    }

    /// Current price and stock for a selection, or `None` if the catalog
    /// never stocked it. Read-only; used by callers to render state.
    pub fn item(&self, selection: Selection) -> Option<Item> {
        self.inner.lock().inventory.lookup(selection)
    }

    /// Adds funds to the deposited balance.
    ///
    /// # Errors
    ///
    /// - [`VendError::InvalidAmount`] - `amount` is zero or negative. The
    ///   balance is untouched.
    pub fn deposit(&self, amount: Decimal) -> Result<(), VendError> {
        self.inner.lock().deposit(amount)
    }

    /// Dispenses `quantity` units of `selection`.
    ///
    /// On success the balance is debited by `price * quantity` and the stock
    /// decremented by `quantity`, atomically. On failure both are unchanged,
    /// and repeating the same failing call yields the same error.
    ///
    /// # Errors
    ///
    /// - [`VendError::InvalidQuantity`] - `quantity` is zero.
    /// - [`VendError::InvalidSelection`] - selection not stocked by this machine.
    /// - [`VendError::OutOfStock`] - fewer than `quantity` units remain
    ///   (reported even when funds are also short).
    /// - [`VendError::InsufficientFunds`] - balance below the total price.
    pub fn vend(&self, selection: Selection, quantity: u32) -> Result<(), VendError> {
        self.inner.lock().vend(selection, quantity)
    }
}

/// Stocked items in display order, prices rounded for output.
struct ItemsInOrder<'a>(&'a Inventory);

impl Serialize for ItemsInOrder<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for selection in Selection::ALL {
            if let Some(item) = self.0.lookup(selection) {
                let rounded = Item {
                    price: item.price.round_dp(VendingMachine::DECIMAL_PRECISION),
                    quantity: item.quantity,
                };
                map.serialize_entry(selection.name(), &rounded)?;
            }
        }
        map.end()
    }
}

impl Serialize for VendingMachine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("VendingMachine", 2)?;
        state.serialize_field(
            "balance",
            &data.balance.round_dp(VendingMachine::DECIMAL_PRECISION),
        )?;
        state.serialize_field("items", &ItemsInOrder(&data.inventory))?;
        state.end()
    }
}
