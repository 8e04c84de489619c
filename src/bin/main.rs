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

use clap::Parser;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use vending_machine_rs::{Selection, VendingMachine, catalog};

/// Vending Machine - Replay command CSV files against a catalog
///
/// Loads a catalog CSV, replays deposit/vend commands from a second CSV, and
/// writes the final machine state to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "vending-machine-rs")]
#[command(about = "A vending machine engine that replays command CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with the catalog
    ///
    /// Expected format: selection,price,quantity
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Path to CSV file with commands
    ///
    /// Expected format: op,selection,quantity,amount
    /// Example: cargo run -- catalog.csv commands.csv > state.json
    #[arg(value_name = "COMMANDS")]
    commands: PathBuf,

    /// Starting deposited balance (defaults to 10.00)
    #[arg(long, value_name = "AMOUNT")]
    starting_balance: Option<Decimal>,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Load and validate the catalog; any defect here is fatal
    let catalog_file = match File::open(&args.catalog) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening catalog '{}': {}", args.catalog.display(), e);
            process::exit(1);
        }
    };
    let inventory = match catalog::load(BufReader::new(catalog_file)) {
        Ok(inventory) => inventory,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            process::exit(1);
        }
    };

    let machine = match args.starting_balance {
        Some(balance) => VendingMachine::with_starting_balance(inventory, balance),
        None => VendingMachine::new(inventory),
    };

    // Replay commands from CSV
    let commands_file = match File::open(&args.commands) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening commands '{}': {}", args.commands.display(), e);
            process::exit(1);
        }
    };
    if let Err(e) = process_commands(&machine, BufReader::new(commands_file)) {
        eprintln!("Error processing commands: {}", e);
        process::exit(1);
    }

    // Write final state to stdout
    if let Err(e) = write_state(&machine, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the command format.
///
/// Fields: `op, selection, quantity, amount`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    selection: Option<Selection>,
    #[serde(deserialize_with = "csv::invalid_option")]
    quantity: Option<u32>,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
}

/// One machine command.
#[derive(Debug)]
enum Command {
    Deposit(Decimal),
    Vend(Selection, u32),
}

impl CsvRecord {
    /// Converts a CSV record to a command.
    ///
    /// Returns `None` for unknown ops or missing required fields.
    fn into_command(self) -> Option<Command> {
        match self.op.to_lowercase().as_str() {
            "deposit" => {
                let amount = self.amount?;
                Some(Command::Deposit(amount))
            }
            "vend" => {
                let selection = self.selection?;
                let quantity = self.quantity?;
                Some(Command::Vend(selection, quantity))
            }
            _ => None,
        }
    }
}

/// Replays commands from a CSV reader against the machine.
///
/// Malformed rows and failed commands are skipped: every failure is terminal
/// for that command alone and the replay continues (logged in debug mode).
///
/// # CSV Format
///
/// Expected columns: `op, selection, quantity, amount`
/// - `op`: `deposit` or `vend`
/// - `selection`: wire name, required for vend
/// - `quantity`: units to vend, required for vend
/// - `amount`: decimal amount, required for deposit
///
/// # Example
///
/// ```csv
/// op,selection,quantity,amount
/// deposit,,,5.00
/// vend,soda,2,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader itself fails.
pub fn process_commands<R: Read>(
    machine: &VendingMachine,
    reader: R,
) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " vend "
        .flexible(true) // Allow short rows for ops that omit trailing fields
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(command) = record.into_command() else {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping invalid command record");
                    continue;
                };

                let outcome = match command {
                    Command::Deposit(amount) => machine.deposit(amount),
                    Command::Vend(selection, quantity) => machine.vend(selection, quantity),
                };
                if let Err(_e) = outcome {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping command: {}", _e);
                }
            }
            Err(e) => {
                // Skip malformed rows
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(())
}

/// Writes the machine snapshot as JSON.
///
/// Items appear in catalog display order with prices rounded to two decimal
/// places; unstocked selections are omitted.
///
/// # Example
///
/// ```json
/// {"balance":"8.50","items":{"soda":{"price":"1.50","quantity":1}}}
/// ```
pub fn write_state<W: Write>(machine: &VendingMachine, mut writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, machine)?;
    writeln!(writer)?;
    writer.flush()
}
