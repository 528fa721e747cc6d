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

//! Core value types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage taken off the register total when a discount is applied.
///
/// No range is enforced: `20` means 20% off, and values outside `0..=100`
/// are applied as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DiscountPercent(pub Decimal);

impl DiscountPercent {
    /// Returns the percentage as a fraction (`20` becomes `0.20`).
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for DiscountPercent {
    fn from(percent: Decimal) -> Self {
        Self(percent)
    }
}

impl From<u32> for DiscountPercent {
    fn from(percent: u32) -> Self {
        Self(Decimal::from(percent))
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fraction_divides_by_one_hundred() {
        assert_eq!(DiscountPercent(dec!(20)).fraction(), dec!(0.20));
        assert_eq!(DiscountPercent(dec!(12.5)).fraction(), dec!(0.125));
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(DiscountPercent::from(15).to_string(), "15%");
    }
}
