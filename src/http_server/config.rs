//! HTTP Server Configuration
//!
//! Host, port, CORS and static asset settings for the HTTP server.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory of static assets served for unmatched paths
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    3001
}

pub(crate) fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("dist"))
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            static_dir: default_static_dir(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HttpServerConfig =
            serde_json::from_str(r#"{"port": 4000, "cors_origins": ["http://localhost:5173"]}"#)
                .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
    }
}
