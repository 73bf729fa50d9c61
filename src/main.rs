//! Clipharvest CLI entry point.

#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clipharvest::Error;
use clipharvest::constants::EXIT_INTERRUPTED;

fn main() {
    match clipharvest::run() {
        Ok(()) => {}
        Err(Error::Cancelled) => std::process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
