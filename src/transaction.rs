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

//! Register operations.
//!
//! An [`Operation`] is one call against a [`Register`](crate::Register),
//! in a form that can be built from a batch file and replayed with
//! [`Register::process`](crate::Register::process).

use crate::error::Result;
use crate::validation::{check_quantity, parse_price, parse_quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operation {
    AddItem {
        title: String,
        price: Decimal,
        quantity: i64,
    },
    ApplyDiscount,
    VoidLastTransaction,
}

impl Operation {
    /// Builds an add-item operation from text fields.
    ///
    /// A missing quantity means one unit.
    ///
    /// # Errors
    ///
    /// See [`parse_price`] and [`parse_quantity`]; the price is checked first.
    pub fn add_item(title: &str, price: &str, quantity: Option<&str>) -> Result<Self> {
        let price = parse_price(price)?;
        let quantity = match quantity {
            Some(quantity) => parse_quantity(quantity)?,
            None => check_quantity(1)?,
        };
        Ok(Self::AddItem {
            title: title.to_string(),
            price,
            quantity,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "add",
            Self::ApplyDiscount => "discount",
            Self::VoidLastTransaction => "void",
        }
    }
}

/// The most recent committed add, kept so it can be voided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastTransaction {
    pub title: String,
    pub quantity: usize,
    /// `price * quantity`
    pub amount: Decimal,
}
