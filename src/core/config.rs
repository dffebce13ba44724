//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, command-line flags, or defaults.

use super::transport::TransportConfig;
use crate::domains::scholar::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable holding the Semantic Scholar API key.
pub const API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Upstream Graph API settings.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Semantic Scholar API key, sent as `x-api-key`.
    /// Optional; without it requests share the public rate limit.
    pub semantic_scholar_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "semantic_scholar_api_key",
                &self.semantic_scholar_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// Whether a usable (non-empty) key is configured.
    pub fn has_api_key(&self) -> bool {
        self.semantic_scholar_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }
}

/// Upstream Graph API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Graph API.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "semantic-scholar-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). The API key comes from
    /// `SEMANTIC_SCHOLAR_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            config.credentials.semantic_scholar_api_key = Some(api_key).filter(|k| !k.is_empty());
        }

        if let Ok(base_url) = std::env::var("SEMANTIC_SCHOLAR_BASE_URL") {
            info!("Upstream base URL overridden: {}", base_url);
            config.upstream.base_url = base_url;
        }

        config
    }

    /// Apply a key given on the command line. An empty key clears it.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.credentials.semantic_scholar_api_key = Some(key).filter(|k| !k.is_empty());
        }
        self
    }

    /// Log whether an API key is in use.
    pub fn log_credentials(&self) {
        if self.credentials.has_api_key() {
            info!("Semantic Scholar API key configured");
        } else {
            warn!(
                "No Semantic Scholar API key found \
                 (set {} for higher rate limits)",
                API_KEY_ENV
            );
        }
    }
}
