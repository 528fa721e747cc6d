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

use cash_register::{InvalidArgument, Operation, Register};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Cash Register - Replay register operations from a CSV file
///
/// Reads operations from a CSV file, prints discount messages as they occur,
/// then writes a summary of the register to stdout.
#[derive(Parser, Debug)]
#[command(name = "cash-register")]
#[command(about = "A cash register that replays operation CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with operations
    ///
    /// Expected format: op,title,price,quantity
    /// Example: cargo run -- sale.csv --discount 20
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// One-time discount percentage available to the sale
    #[arg(short, long, value_name = "PERCENT")]
    discount: Option<Decimal>,
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only register output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let register = match args.discount {
        Some(percent) => Register::with_discount(percent),
        None => Register::new(),
    };

    let stdout = io::stdout();
    let register = match process_operations(BufReader::new(file), register, stdout.lock()) {
        Ok(register) => register,
        Err(e) => {
            eprintln!("Error processing operations: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_summary(&register, stdout.lock()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `op, title, price, quantity`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    title: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
}

impl CsvRecord {
    /// Converts a CSV record to an [`Operation`].
    ///
    /// Returns `None` for unknown operation names. Add rows are validated
    /// here, so a rejected price or quantity never reaches the register.
    fn into_operation(self) -> Option<Result<Operation, InvalidArgument>> {
        match self.op.to_lowercase().as_str() {
            "add" => Some(Operation::add_item(
                self.title.as_deref().unwrap_or_default(),
                self.price.as_deref().unwrap_or_default(),
                self.quantity.as_deref(),
            )),
            "discount" => Some(Ok(Operation::ApplyDiscount)),
            "void" => Some(Ok(Operation::VoidLastTransaction)),
            _ => None,
        }
    }
}

/// Replays operations from a CSV reader against `register`.
///
/// Discount messages are written to `out` as they happen. Unknown
/// operations, malformed rows and rejected items are logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `op, title, price, quantity`
/// - `op`: Operation name (add, discount, void)
/// - `title`: Item title (add only)
/// - `price`: Unit price (add only)
/// - `quantity`: Units to add (optional, defaults to 1)
///
/// # Example
///
/// ```csv
/// op,title,price,quantity
/// add,eggs,1.99,2
/// add,tomato,1.76,
/// void,,,
/// discount,,,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or writing to `out` fails.
pub fn process_operations<R: Read, W: Write>(
    reader: R,
    mut register: Register,
    mut out: W,
) -> Result<Register, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for (line, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line, error = %e, "skipping malformed row");
                continue;
            }
        };

        let op_name = record.op.clone();
        let operation = match record.into_operation() {
            Some(Ok(operation)) => operation,
            Some(Err(e)) => {
                warn!(line, op = %op_name, error = %e, "skipping rejected item");
                continue;
            }
            None => {
                warn!(line, op = %op_name, "skipping unknown operation");
                continue;
            }
        };

        let kind = operation.kind();
        debug!(line, op = kind, "replaying operation");
        match operation {
            Operation::ApplyDiscount => {
                register.apply_discount_to(&mut out)?;
            }
            operation => {
                if let Err(e) = register.process(operation) {
                    warn!(line, op = kind, error = %e, "skipping rejected item");
                }
            }
        }
    }

    out.flush()?;
    Ok(register)
}

/// Writes the register summary as CSV.
///
/// # CSV Format
///
/// Columns: `total, discount_percent, last_transaction_amount, item_count`
///
/// ```csv
/// total,discount_percent,last_transaction_amount,item_count
/// 800.00,0,1000.00,1
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_summary<W: Write>(register: &Register, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.serialize(register)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn replay(csv: &str, register: Register) -> (Register, String) {
        let mut out = Vec::new();
        let register = process_operations(Cursor::new(csv), register, &mut out).unwrap();
        (register, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_simple_add() {
        let csv = "op,title,price,quantity\nadd,eggs,1.99,\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.total(), dec!(1.99));
        assert_eq!(register.items(), ["eggs"]);
    }

    #[test]
    fn parse_add_without_quantity_column() {
        let csv = "op,title,price,quantity\nadd,eggs,1.99\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.items(), ["eggs"]);
    }

    #[test]
    fn parse_add_with_quantity() {
        let csv = "op,title,price,quantity\n\
                   add,eggs,1.99,2\n\
                   add,tomato,1.76,3\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.total(), dec!(9.26));
        assert_eq!(
            register.items(),
            ["eggs", "eggs", "tomato", "tomato", "tomato"]
        );
    }

    #[test]
    fn parse_void_sequence() {
        let csv = "op,title,price,quantity\n\
                   add,apple,0.99,\n\
                   add,tomato,1.76,\n\
                   void,,,\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.total(), dec!(0.99));
        assert_eq!(register.items(), ["apple"]);
    }

    #[test]
    fn discount_messages_are_written() {
        let csv = "op,title,price,quantity\n\
                   add,macbook air,1000,\n\
                   discount,,,\n\
                   discount,,,\n";
        let (register, out) = replay(csv, Register::with_discount(dec!(20)));

        assert_eq!(register.total(), dec!(800));
        assert_eq!(
            out,
            "After the discount, the total comes to $800.00\n\
             There is no discount to apply.\n"
        );
    }

    #[test]
    fn parse_with_whitespace_and_case() {
        let csv = "op,title,price,quantity\n ADD , eggs , 1.99 , 2 \n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.items(), ["eggs", "eggs"]);
    }

    #[test]
    fn skip_rejected_items() {
        let csv = "op,title,price,quantity\n\
                   add,eggs,1.99,\n\
                   add,gift,free,1\n\
                   add,tomato,1.76,0\n\
                   add,tomato,1.76,1.5\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.total(), dec!(1.99));
        assert_eq!(register.items(), ["eggs"]);
        assert_eq!(register.last_transaction_amount(), dec!(1.99));
    }

    #[test]
    fn skip_out_of_range_amounts() {
        let csv = "op,title,price,quantity\n\
                   add,eggs,1.99,\n\
                   add,gold,79228162514264337593543950335,2\n\
                   add,tomato,1.76,\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.total(), dec!(3.75));
        assert_eq!(register.items(), ["eggs", "tomato"]);
    }

    #[test]
    fn negative_discount_on_max_total_does_not_abort() {
        let csv = "op,title,price,quantity\n\
                   add,gold,79228162514264337593543950335,\n\
                   discount,,,\n";
        let (register, out) = replay(csv, Register::with_discount(dec!(-50)));

        assert_eq!(register.total(), Decimal::MAX);
        assert!(out.starts_with("After the discount, the total comes to $"));
    }

    #[test]
    fn skip_unknown_operations() {
        let csv = "op,title,price,quantity\n\
                   add,eggs,1.99,\n\
                   refund,eggs,1.99,\n";
        let (register, _) = replay(csv, Register::new());

        assert_eq!(register.items(), ["eggs"]);
    }

    #[test]
    fn write_summary_to_csv() {
        let csv = "op,title,price,quantity\n\
                   add,macbook air,1000,\n\
                   discount,,,\n";
        let (register, _) = replay(csv, Register::with_discount(dec!(20)));

        let mut output = Vec::new();
        write_summary(&register, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "total,discount_percent,last_transaction_amount,item_count\n\
             800.00,0,1000.00,1\n"
        );
    }
}
