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

//! Error types for vend and deposit operations.

use thiserror::Error;

/// Vending operation errors.
///
/// Every failure is returned to the immediate caller; the engine never logs,
/// retries, or suppresses one. None of these are fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VendError {
    /// Selection is not stocked by this machine
    #[error("invalid selection")]
    InvalidSelection,

    /// Requested quantity exceeds the available stock
    #[error("out of stock")]
    OutOfStock,

    /// Deposited balance cannot cover the total price
    #[error("insufficient funds deposited")]
    InsufficientFunds,

    /// Deposit amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Vend quantity is zero
    #[error("invalid quantity (must be at least one)")]
    InvalidQuantity,
}
