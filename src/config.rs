//! # Configuration
//!
//! Application configuration loading and management.
//!
//! Everything the original deployment kept in ambient environment variables
//! (table names, topic and queue names, message-attribute key names) lives in
//! an explicit [`AppConfig`] passed into each component at construction.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if exists)
//! 3. Environment variables (prefixed with `RIDE_RFQ_`)
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RIDE_RFQ_REST_HOST` | REST server host | `0.0.0.0` |
//! | `RIDE_RFQ_REST_PORT` | REST server port | `8080` |
//! | `RIDE_RFQ_LOG_LEVEL` | Log level | `info` |
//! | `RIDE_RFQ_LOG_FORMAT` | Log format (json/pretty) | `json` |
//! | `RIDE_RFQ_REPLY_QUEUE` | Return-address queue name | `rfq-replies` |
//! | `RIDE_RFQ_BIDDER_COUNT` | Demo bidder workers to spawn | `3` |
//!
//! # Examples
//!
//! ```ignore
//! use ride_rfq::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("REST server: {}:{}", config.rest.host, config.rest.port);
//! ```

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

// ============================================================================
// Server Configuration
// ============================================================================

/// REST/HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_rest_port")]
    pub port: u16,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_rest_port(),
        }
    }
}

impl RestConfig {
    /// Returns the socket address for the REST server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                field: "rest.host:port".to_string(),
                message: format!("{e}"),
            })
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON output.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g. `info`, `ride_rfq=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// ============================================================================
// Store Configuration
// ============================================================================

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the request table.
    #[serde(default = "default_request_table")]
    pub request_table: String,

    /// Name of the response table.
    #[serde(default = "default_response_table")]
    pub response_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_table: default_request_table(),
            response_table: default_response_table(),
        }
    }
}

// ============================================================================
// Bus Configuration
// ============================================================================

/// Message bus configuration.
///
/// The attribute key names are part of the wire contract between the
/// submitter, the bidders, and the collector, so they are configured in one
/// place rather than hard-coded at each site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Name of the fan-out request topic.
    #[serde(default = "default_request_topic")]
    pub request_topic: String,

    /// Name of the reply queue used as the return address.
    #[serde(default = "default_reply_queue")]
    pub reply_queue: String,

    /// Routing-attribute key carrying the correlation id.
    #[serde(default = "default_correlation_id_key")]
    pub correlation_id_key: String,

    /// Routing-attribute key carrying the return address.
    #[serde(default = "default_return_address_key")]
    pub return_address_key: String,

    /// Routing-attribute key carrying the bidder id on replies.
    #[serde(default = "default_bidder_id_key")]
    pub bidder_id_key: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            request_topic: default_request_topic(),
            reply_queue: default_reply_queue(),
            correlation_id_key: default_correlation_id_key(),
            return_address_key: default_return_address_key(),
            bidder_id_key: default_bidder_id_key(),
        }
    }
}

// ============================================================================
// Bidder Configuration
// ============================================================================

/// Demo bidder-pool configuration for the single-process binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidderConfig {
    /// Number of bidder workers to spawn.
    #[serde(default = "default_bidder_count")]
    pub count: usize,
}

impl Default for BidderConfig {
    fn default() -> Self {
        Self {
            count: default_bidder_count(),
        }
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST server settings.
    #[serde(default)]
    pub rest: RestConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Durable store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Message bus settings.
    #[serde(default)]
    pub bus: BusConfig,

    /// Demo bidder settings.
    #[serde(default)]
    pub bidder: BidderConfig,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file exists but cannot be read
    /// or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path =
            std::env::var("RIDE_RFQ_CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            config = Self::from_file(&config_path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("RIDE_RFQ_REST_HOST") {
            self.rest.host = host;
        }
        if let Ok(port) = std::env::var("RIDE_RFQ_REST_PORT")
            && let Ok(p) = port.parse()
        {
            self.rest.port = p;
        }

        if let Ok(level) = std::env::var("RIDE_RFQ_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Ok(format) = std::env::var("RIDE_RFQ_LOG_FORMAT") {
            self.log.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Json,
            };
        }

        if let Ok(table) = std::env::var("RIDE_RFQ_REQUEST_TABLE") {
            self.store.request_table = table;
        }
        if let Ok(table) = std::env::var("RIDE_RFQ_RESPONSE_TABLE") {
            self.store.response_table = table;
        }

        if let Ok(topic) = std::env::var("RIDE_RFQ_REQUEST_TOPIC") {
            self.bus.request_topic = topic;
        }
        if let Ok(queue) = std::env::var("RIDE_RFQ_REPLY_QUEUE") {
            self.bus.reply_queue = queue;
        }

        if let Ok(count) = std::env::var("RIDE_RFQ_BIDDER_COUNT")
            && let Ok(c) = count.parse()
        {
            self.bidder.count = c;
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rest_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

fn default_request_table() -> String {
    "rfq-requests".to_string()
}

fn default_response_table() -> String {
    "rfq-responses".to_string()
}

fn default_request_topic() -> String {
    "rfq-requests".to_string()
}

fn default_reply_queue() -> String {
    "rfq-replies".to_string()
}

fn default_correlation_id_key() -> String {
    "correlation-id".to_string()
}

fn default_return_address_key() -> String {
    "return-address".to_string()
}

fn default_bidder_id_key() -> String {
    "bidder-id".to_string()
}

fn default_bidder_count() -> usize {
    3
}
