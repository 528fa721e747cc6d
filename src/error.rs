// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
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

//! Error types for register operations.

use thiserror::Error;

/// Result type alias for register operations.
pub type Result<T> = std::result::Result<T, InvalidArgument>;

/// Rejected input to [`Register::add_item`](crate::Register::add_item).
///
/// This is the only error the register raises. Validation always completes
/// before the register is mutated, so a failed call leaves it untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// Price is not a number
    #[error("Price must be a number.")]
    PriceNotANumber,

    /// Quantity is not a whole number
    #[error("Quantity must be an integer.")]
    QuantityNotAnInteger,

    /// Quantity is zero or negative
    #[error("Quantity must be a positive integer.")]
    QuantityNotPositive,

    /// `price * quantity`, or the new total, exceeds the decimal range
    #[error("Amount is out of range.")]
    AmountOutOfRange,
}
