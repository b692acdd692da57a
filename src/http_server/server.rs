//! # HTTP Server
//!
//! Combines the route groups, middleware and static assets into one Axum
//! router and serves it until a shutdown signal arrives.

use std::net::SocketAddr;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::info_routes::info_routes;
use super::person_routes::person_routes;
use super::state::AppState;
use crate::observability::{access_log::access_log, log_event, Event};
use crate::person::PersonRepository;

/// HTTP server for the phonebook API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, people: PersonRepository) -> Self {
        let router = Self::build_router(&config, AppState::new(people));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let mut router = Router::new()
            .merge(health_routes())
            .merge(info_routes(state.clone()))
            .nest("/api", person_routes(state));

        if let Some(dir) = config.static_dir.as_ref().filter(|dir| dir.is_dir()) {
            tracing::debug!(dir = %dir.display(), "serving static assets");
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .layer(cors)
            .layer(middleware::from_fn(access_log))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C or SIGTERM, then drain in-flight requests.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event(
            Event::ServerListening,
            &format!("Server running on port {}", addr.port()),
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete, "server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log_event(Event::ShutdownStart, "shutdown signal received");
}
