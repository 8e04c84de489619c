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

//! # Vending Machine
//!
//! This library provides an in-memory vending machine engine: a fixed catalog
//! of items with price and stock, a running deposited balance, and a vend
//! operation that debits funds and decrements stock together.
//!
//! ## Core Components
//!
//! - [`VendingMachine`]: the engine holding balance and inventory
//! - [`Inventory`]/[`Item`]: the per-selection catalog state
//! - [`Selection`]: the closed, ordered set of catalog identifiers
//! - [`VendError`]: typed, caller-recoverable vend failures
//! - [`catalog`]: strict CSV catalog loading
//!
//! ## Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vending_machine_rs::{Inventory, Item, Selection, VendError, VendingMachine};
//!
//! let inventory = Inventory::from_iter([
//!     (Selection::Soda, Item { price: dec!(1.50), quantity: 2 }),
//!     (Selection::Gum, Item { price: dec!(0.75), quantity: 5 }),
//! ]);
//! let machine = VendingMachine::new(inventory);
//!
//! machine.deposit(dec!(5.00)).unwrap();
//! machine.vend(Selection::Soda, 2).unwrap();
//! assert_eq!(machine.balance(), dec!(12.00));
//!
//! // The stock check precedes the funds check.
//! assert_eq!(machine.vend(Selection::Soda, 1), Err(VendError::OutOfStock));
//! ```
//!
//! ## Thread Safety
//!
//! A machine keeps its balance and inventory behind a single mutex, so the two
//! mutations of a successful vend are observed atomically by any concurrent
//! reader. Each machine owns its state outright; independent machines coexist
//! freely.

mod base;
pub mod catalog;
mod error;
mod inventory;
mod machine;

pub use base::Selection;
pub use error::VendError;
pub use inventory::{Inventory, Item};
pub use machine::VendingMachine;
