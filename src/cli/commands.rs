//! CLI command implementations
//!
//! Boot order: resolve configuration, install logging, open the document
//! backend, then serve HTTP until shutdown.

use super::args::Cli;
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::{init_tracing, log_event, Event};
use crate::person::PersonRepository;
use crate::store::open_backend;

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = ServiceConfig::resolve(&cli)?;
    serve(config)
}

/// Boot the service and block until it shuts down.
pub fn serve(config: ServiceConfig) -> CliResult<()> {
    init_tracing(config.log_format);
    log_event(
        Event::ConfigLoaded,
        &format!(
            "listen={} store={} static_dir={}",
            config.server.socket_addr(),
            config.store_url,
            config
                .server
                .static_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let backend = open_backend(&config.store_url).await.map_err(|e| {
            CliError::boot_failed(format!("Failed to open store {}: {}", config.store_url, e))
        })?;

        let people = PersonRepository::new(backend);
        log_event(
            Event::StoreOpened,
            &format!("{} backend at {}", people.backend_kind(), config.store_url),
        );

        HttpServer::with_config(config.server, people)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
