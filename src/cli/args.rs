//! CLI argument definitions using clap
//!
//! Every flag falls back to an environment variable, so the binary can be
//! configured the same way on a laptop and in a container.

use clap::Parser;
use std::path::PathBuf;

use crate::observability::LogFormat;

/// Phonebook - a small REST service for names and phone numbers
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "phonebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, env = "PHONEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Where documents are stored: memory:// or log://<path>
    #[arg(long, env = "STORE_URL")]
    pub store_url: Option<String>,

    /// Directory of static frontend assets
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
