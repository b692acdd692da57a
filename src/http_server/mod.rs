//! # HTTP Server Module
//!
//! Routes requests to the person repository and renders the results.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/info` - HTML summary of the phonebook
//! - `/api/persons` - Person CRUD
//! - anything else - static assets, when an asset directory exists

pub mod config;
pub mod errors;
mod extract;
mod health_routes;
mod info_routes;
mod person_routes;
pub mod server;
mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use info_routes::{render_info, TIMESTAMP_FORMAT};
pub use server::HttpServer;
pub use state::AppState;
