//! Service configuration
//!
//! Settings are resolved once at startup. A value given as a flag or
//! environment variable (clap merges those two) wins over the JSON config
//! file, which wins over the built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::Cli;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::store::StoreUrl;

const DEFAULT_STORE_URL: &str = "memory://";

/// Optional JSON config file. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub store_url: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub log_format: Option<LogFormat>,
}

impl FileConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }
}

/// Fully resolved settings the service boots with.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub server: HttpServerConfig,
    pub store_url: StoreUrl,
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Resolve from parsed arguments, reading the config file if one is named.
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Layer arguments over file values over defaults.
    pub fn merge(cli: &Cli, file: FileConfig) -> CliResult<Self> {
        let defaults = HttpServerConfig::default();

        let host = cli.host.clone().or(file.host).unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        let store_url = cli
            .store_url
            .clone()
            .or(file.store_url)
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let store_url: StoreUrl = store_url.parse().map_err(CliError::config_error)?;

        let server = HttpServerConfig {
            host,
            port: cli.port.or(file.port).unwrap_or(defaults.port),
            cors_origins: file.cors_origins,
            static_dir: cli
                .static_dir
                .clone()
                .or(file.static_dir)
                .or(defaults.static_dir),
        };

        Ok(Self {
            server,
            store_url,
            log_format: cli.log_format.or(file.log_format).unwrap_or_default(),
        })
    }
}
