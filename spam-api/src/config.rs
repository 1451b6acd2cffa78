//! Configuration for spam-api
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:5000"
//! request_timeout_seconds = 10
//! enable_admin = false
//!
//! [artifacts]
//! vectorizer_path = "vectorizer.json"
//! model_path = "spam_model.json"
//!
//! [cors]
//! allow_any_origin = false
//! allowed_origins = ["http://localhost:3000"]
//! ```

use serde::{Deserialize, Serialize};
use spam_rs::ArtifactPaths;
use std::path::Path;

use crate::error::{ApiError, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Mount `POST /admin/reload`. It is unauthenticated, so keep it off on
    /// any listener reachable by untrusted clients.
    #[serde(default)]
    pub enable_admin: bool,
}

/// Cross-origin policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_any_origin")]
    pub allow_any_origin: bool,
    /// Used when `allow_any_origin` is false
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_allow_any_origin() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout_seconds: default_timeout(),
            enable_admin: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: default_allow_any_origin(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_seconds == 0 {
            return Err(ApiError::Config(
                "request_timeout_seconds must be positive".to_string(),
            ));
        }
        if !self.cors.allow_any_origin {
            for origin in &self.cors.allowed_origins {
                origin.parse::<axum::http::HeaderValue>().map_err(|e| {
                    ApiError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
                })?;
            }
        }
        Ok(())
    }
}
