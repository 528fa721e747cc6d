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

//! Conversion of untyped item input into register values.
//!
//! Prices and quantities read from text (a CSV row, a prompt) pass through
//! these checks before they reach the register. The order matches
//! [`Register::add_item_with_quantity`](crate::Register::add_item_with_quantity):
//! price first, then the quantity's type, then its sign.

use crate::error::{InvalidArgument, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a price. Any decimal number is accepted, including negatives.
///
/// # Errors
///
/// [`InvalidArgument::PriceNotANumber`] if `input` is not a decimal number.
pub fn parse_price(input: &str) -> Result<Decimal> {
    let input = input.trim();
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| InvalidArgument::PriceNotANumber)
}

/// Parses a quantity and checks that it is positive.
///
/// # Errors
///
/// - [`InvalidArgument::QuantityNotAnInteger`] if `input` is not a whole number
///   (`"1.5"`, `"two"`), even when it is also non-positive.
/// - [`InvalidArgument::QuantityNotPositive`] if the number is zero or negative.
pub fn parse_quantity(input: &str) -> Result<i64> {
    let quantity = input
        .trim()
        .parse::<i64>()
        .map_err(|_| InvalidArgument::QuantityNotAnInteger)?;
    check_quantity(quantity)
}

/// Checks that a quantity is positive.
///
/// # Errors
///
/// [`InvalidArgument::QuantityNotPositive`] if `quantity <= 0`.
pub fn check_quantity(quantity: i64) -> Result<i64> {
    if quantity <= 0 {
        return Err(InvalidArgument::QuantityNotPositive);
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_integer_and_fractional_prices() {
        assert_eq!(parse_price("1000"), Ok(dec!(1000)));
        assert_eq!(parse_price(" 0.99 "), Ok(dec!(0.99)));
        assert_eq!(parse_price("-2.50"), Ok(dec!(-2.50)));
        assert_eq!(parse_price("1e2"), Ok(dec!(100)));
    }

    #[test]
    fn rejects_non_numeric_price() {
        assert_eq!(parse_price("free"), Err(InvalidArgument::PriceNotANumber));
        assert_eq!(parse_price(""), Err(InvalidArgument::PriceNotANumber));
        assert_eq!(parse_price("$5"), Err(InvalidArgument::PriceNotANumber));
    }

    #[test]
    fn parses_positive_quantity() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert_eq!(parse_quantity(" 1 "), Ok(1));
    }

    #[test]
    fn non_integer_quantity_is_reported_before_sign() {
        assert_eq!(
            parse_quantity("1.5"),
            Err(InvalidArgument::QuantityNotAnInteger)
        );
        assert_eq!(
            parse_quantity("-0.5"),
            Err(InvalidArgument::QuantityNotAnInteger)
        );
        assert_eq!(
            parse_quantity("two"),
            Err(InvalidArgument::QuantityNotAnInteger)
        );
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        assert_eq!(parse_quantity("0"), Err(InvalidArgument::QuantityNotPositive));
        assert_eq!(parse_quantity("-3"), Err(InvalidArgument::QuantityNotPositive));
        assert_eq!(check_quantity(0), Err(InvalidArgument::QuantityNotPositive));
    }
}
