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

//! Point-of-sale register.
//!
//! A [`Register`] keeps a running total, the log of item titles rung up, an
//! optional one-time discount, and enough of the most recent add to void it.
//!
//! ```text
//!  add_item ──► total += price * qty, items += qty × title, last = (title, qty, amount)
//!  apply_discount ──► total -= total * pct / 100, pct consumed
//!  void_last_transaction ──► total -= last.amount, trailing qty items dropped, last cleared
//! ```
//!
//! # Example
//!
//! ```
//! use cash_register::Register;
//! use rust_decimal_macros::dec;
//!
//! let mut register = Register::with_discount(dec!(20));
//! register.add_item("macbook air", dec!(1000)).unwrap();
//! register.apply_discount();
//! assert_eq!(register.total(), dec!(800.00));
//! ```

use crate::base::DiscountPercent;
use crate::error::{InvalidArgument, Result};
use crate::transaction::{LastTransaction, Operation};
use crate::validation::check_quantity;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::io::{self, Write};
use std::iter;
use tracing::{debug, info};

/// Result of [`Register::apply_discount`].
///
/// Displays as the line reported to the cashier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountOutcome {
    /// No discount was pending; the total is unchanged.
    NoDiscount,
    /// The pending discount was taken off the total and consumed.
    Applied {
        discount_amount: Decimal,
        total: Decimal,
    },
}

impl fmt::Display for DiscountOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDiscount => f.write_str("There is no discount to apply."),
            Self::Applied { total, .. } => write!(
                f,
                "After the discount, the total comes to ${}",
                to_cents(*total)
            ),
        }
    }
}

/// Rounds to cents, keeping both decimal places (`800` becomes `800.00`).
fn to_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp(Register::DECIMAL_PRECISION);
    cents.rescale(Register::DECIMAL_PRECISION);
    cents
}

/// Register state for a single sale.
#[derive(Debug, Clone)]
pub struct Register {
    total: Decimal,
    /// `None` once consumed, or when constructed without a discount.
    discount: Option<DiscountPercent>,
    /// One title per unit, in the order rung up.
    items: Vec<String>,
    last_transaction: Option<LastTransaction>,
}

impl Register {
    const DECIMAL_PRECISION: u32 = 2;

    /// Creates an empty register with no discount pending.
    pub fn new() -> Self {
        Self {
            total: Decimal::ZERO,
            discount: None,
            items: Vec::new(),
            last_transaction: None,
        }
    }

    /// Creates an empty register with a one-time discount pending.
    ///
    /// The percentage is not range-checked. Zero means no discount.
    pub fn with_discount(percent: impl Into<DiscountPercent>) -> Self {
        let percent = percent.into();
        Self {
            discount: (!percent.is_zero()).then_some(percent),
            ..Self::new()
        }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns the pending discount percentage, or zero if there is none.
    pub fn discount_percent(&self) -> Decimal {
        self.discount.map_or(Decimal::ZERO, |percent| percent.0)
    }

    pub fn pending_discount(&self) -> Option<DiscountPercent> {
        self.discount
    }

    /// Returns `price * quantity` of the most recent add, or zero after a void.
    pub fn last_transaction_amount(&self) -> Decimal {
        self.last_transaction
            .as_ref()
            .map_or(Decimal::ZERO, |last| last.amount)
    }

    pub fn last_transaction(&self) -> Option<&LastTransaction> {
        self.last_transaction.as_ref()
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.last_transaction
                .as_ref()
                .is_none_or(|last| last.quantity <= self.items.len()),
            "Invariant violated: last transaction has more units than the item log"
        );
    }

    /// Rings up one unit of an item.
    ///
    /// # Errors
    ///
    /// Never fails for a single unit; returns `Result` to match
    /// [`add_item_with_quantity`](Self::add_item_with_quantity).
    pub fn add_item(&mut self, title: impl Into<String>, price: Decimal) -> Result<()> {
        self.add_item_with_quantity(title, price, 1)
    }

    /// Rings up `quantity` units of an item.
    ///
    /// Adds `price * quantity` to the total, appends `quantity` copies of
    /// `title` to the item log, and makes this add the voidable transaction.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument::QuantityNotPositive`] if `quantity <= 0`.
    /// - [`InvalidArgument::AmountOutOfRange`] if `price * quantity` or the new
    ///   total does not fit in a [`Decimal`].
    ///
    /// The register is left unchanged on error.
    pub fn add_item_with_quantity(
        &mut self,
        title: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<()> {
        let quantity = check_quantity(quantity)?;
        let amount = price
            .checked_mul(Decimal::from(quantity))
            .ok_or(InvalidArgument::AmountOutOfRange)?;
        let total = self
            .total
            .checked_add(amount)
            .ok_or(InvalidArgument::AmountOutOfRange)?;
        let title = title.into();
        // Positive after check_quantity.
        let units = quantity as usize;

        self.total = total;
        self.items.extend(iter::repeat_n(title.clone(), units));
        debug!(%title, %price, quantity, %amount, total = %self.total, "item added");

        self.last_transaction = Some(LastTransaction {
            title,
            quantity: units,
            amount,
        });
        self.assert_invariants();
        Ok(())
    }

    /// Applies the pending discount, printing the outcome to stdout.
    ///
    /// Calling it again afterwards reports that there is no discount.
    pub fn apply_discount(&mut self) -> DiscountOutcome {
        let outcome = self.take_discount();
        println!("{outcome}");
        outcome
    }

    /// Applies the pending discount, writing the outcome line to `out`.
    ///
    /// # Errors
    ///
    /// Returns the writer's error. The discount has already been applied
    /// when this happens.
    pub fn apply_discount_to<W: Write>(&mut self, mut out: W) -> io::Result<DiscountOutcome> {
        let outcome = self.take_discount();
        writeln!(out, "{outcome}")?;
        Ok(outcome)
    }

    fn take_discount(&mut self) -> DiscountOutcome {
        let Some(percent) = self.discount.take() else {
            debug!("no discount pending");
            return DiscountOutcome::NoDiscount;
        };

        // Saturates: an unchecked percentage may push the total past the decimal range.
        let discount_amount = self.total.saturating_mul(percent.fraction());
        self.total = self.total.saturating_sub(discount_amount);
        info!(%percent, %discount_amount, total = %self.total, "discount applied");

        DiscountOutcome::Applied {
            discount_amount,
            total: self.total,
        }
    }

    /// Reverses the most recent add.
    ///
    /// Subtracts its amount from the total and drops the units it appended
    /// to the item log. Only one transaction is kept, so voiding twice in a
    /// row leaves the register unchanged the second time.
    ///
    /// Returns the voided transaction, if there was one.
    pub fn void_last_transaction(&mut self) -> Option<LastTransaction> {
        let Some(last) = self.last_transaction.take() else {
            debug!("nothing to void");
            return None;
        };

        self.total = self.total.saturating_sub(last.amount);
        let kept = self.items.len().saturating_sub(last.quantity);
        debug_assert!(
            self.items[kept..].iter().all(|title| *title == last.title),
            "Invariant violated: trailing items do not match the last transaction"
        );
        self.items.truncate(kept);
        debug!(title = %last.title, amount = %last.amount, total = %self.total, "transaction voided");

        self.assert_invariants();
        Some(last)
    }

    /// Runs one operation against the register.
    ///
    /// Discount messages go to stdout, as with [`apply_discount`](Self::apply_discount).
    ///
    /// # Errors
    ///
    /// Only [`Operation::AddItem`] can fail; see
    /// [`add_item_with_quantity`](Self::add_item_with_quantity).
    pub fn process(&mut self, operation: Operation) -> Result<()> {
        match operation {
            Operation::AddItem {
                title,
                price,
                quantity,
            } => self.add_item_with_quantity(title, price, quantity)?,
            Operation::ApplyDiscount => {
                self.apply_discount();
            }
            Operation::VoidLastTransaction => {
                self.void_last_transaction();
            }
        }
        Ok(())
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Register {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Register", 4)?;
        state.serialize_field("total", &to_cents(self.total))?;
        state.serialize_field("discount_percent", &self.discount_percent())?;
        state.serialize_field(
            "last_transaction_amount",
            &to_cents(self.last_transaction_amount()),
        )?;
        state.serialize_field("item_count", &self.items.len())?;
        state.end()
    }
}
