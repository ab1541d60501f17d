//! # Log Inspect Utility
//!
//! Prints or clears the log buffer persisted by the telemetry core.
//!
//! ## Usage
//!
//! ```bash
//! FITLOG_STORAGE_DIR=./.fitlog cargo run --package log-inspect --bin log_inspect -- list
//! FITLOG_STORAGE_DIR=./.fitlog cargo run --package log-inspect --bin log_inspect -- tail 5
//! FITLOG_STORAGE_DIR=./.fitlog cargo run --package log-inspect --bin log_inspect -- clear
//! ```
//!
//! `clear` asks for confirmation and cannot be undone.

use anyhow::{bail, Context};
use lib_core::sink::{format_line, RingBuffer};
use lib_core::store::STORAGE_DIR_ENV;
use lib_core::FileStore;
use std::io::{self, Write};
use std::sync::Arc;

enum Command {
    List,
    Tail(usize),
    Clear,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    match args.next().as_deref() {
        None | Some("list") => Ok(Command::List),
        Some("tail") => {
            let n = match args.next() {
                Some(raw) => raw.parse().with_context(|| format!("invalid count: {raw}"))?,
                None => 10,
            };
            Ok(Command::Tail(n))
        }
        Some("clear") => Ok(Command::Clear),
        Some(other) => bail!("unknown command: {other} (expected list, tail [N] or clear)"),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let command = parse_args(std::env::args().skip(1))?;

    let dir = std::env::var(STORAGE_DIR_ENV)
        .with_context(|| format!("{STORAGE_DIR_ENV} must point at the log storage directory"))?;
    let buffer = RingBuffer::new(Arc::new(FileStore::new(&dir)));

    let records = buffer.read_all().context("reading stored logs")?;

    match command {
        Command::List => print_records(&records, records.len()),
        Command::Tail(n) => print_records(&records, n),
        Command::Clear => {
            if records.is_empty() {
                println!("No stored logs in {dir}.");
                println!("Nothing to clear.");
                return Ok(());
            }

            println!("Found {} stored log record(s) in {dir}.", records.len());
            print!("Clear them all? This cannot be undone. (yes/no): ");
            io::stdout().flush()?;

            let mut confirmation = String::new();
            io::stdin().read_line(&mut confirmation)?;
            let confirmation = confirmation.trim().to_lowercase();

            if confirmation != "yes" && confirmation != "y" {
                println!("Operation cancelled.");
                return Ok(());
            }

            buffer.clear().context("clearing stored logs")?;
            println!("Cleared {} record(s).", records.len());
        }
    }

    Ok(())
}

fn print_records(records: &[lib_core::LogRecord], n: usize) {
    if records.is_empty() {
        println!("No stored logs.");
        return;
    }

    let start = records.len().saturating_sub(n);
    for record in &records[start..] {
        println!("{}", format_line(record));
    }
    println!();
    println!("{} of {} record(s) shown.", records.len() - start, records.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        assert!(matches!(parse_args(args(&[])).unwrap(), Command::List));
        assert!(matches!(parse_args(args(&["tail"])).unwrap(), Command::Tail(10)));
        assert!(matches!(parse_args(args(&["tail", "3"])).unwrap(), Command::Tail(3)));
        assert!(matches!(parse_args(args(&["clear"])).unwrap(), Command::Clear));
        assert!(parse_args(args(&["tail", "x"])).is_err());
        assert!(parse_args(args(&["drop"])).is_err());
    }
}
