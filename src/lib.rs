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

//! # Cash Register
//!
//! This library models a point-of-sale register: a running total, a log of
//! the items rung up, an optional one-time percentage discount, and the
//! ability to void the most recent transaction.
//!
//! ## Core Components
//!
//! - [`Register`]: Owns the sale state and exposes the register operations
//! - [`Operation`]: One register call, for batch replay
//! - [`DiscountPercent`]: Percentage taken off when a discount is applied
//! - [`InvalidArgument`]: The error raised for rejected item input
//!
//! ## Example
//!
//! ```
//! use cash_register::Register;
//! use rust_decimal_macros::dec;
//!
//! let mut register = Register::new();
//! register.add_item("apple", dec!(0.99)).unwrap();
//! register.add_item_with_quantity("tomato", dec!(1.76), 2).unwrap();
//! assert_eq!(register.total(), dec!(4.51));
//!
//! // Only the most recent add can be voided
//! register.void_last_transaction();
//! assert_eq!(register.total(), dec!(0.99));
//! assert_eq!(register.items(), ["apple"]);
//! ```
//!
//! ## Threading
//!
//! A [`Register`] is a plain owned value mutated through `&mut self`. It does
//! no locking of its own.

mod base;
pub mod error;
mod register;
mod transaction;
pub mod validation;

pub use base::DiscountPercent;
pub use error::{InvalidArgument, Result};
pub use register::{DiscountOutcome, Register};
pub use transaction::{LastTransaction, Operation};
