//! Command-line entry: argument parsing, configuration resolution and boot.

mod args;
mod commands;
mod config;
mod errors;

pub use args::Cli;
pub use commands::{run, serve};
pub use config::{FileConfig, ServiceConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
