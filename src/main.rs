//! Phonebook entry point
//!
//! Parses arguments and boots the service through `cli::run`. Any startup
//! failure is printed to stderr and exits with status 1.

use phonebook::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
