//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Options applied to connections opened by the `connect` tool.
    pub mongodb: MongoConfig,
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

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// MongoDB client configuration.
///
/// The connection string itself is never configured here; clients pass it
/// to the `connect` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Application name sent to the server in the connection handshake.
    pub app_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mongo-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            mongodb: MongoConfig::default(),
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
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(app_name) = std::env::var("MCP_MONGODB_APP_NAME") {
            if !app_name.trim().is_empty() {
                info!("MongoDB application name set to {}", app_name);
                config.mongodb.app_name = Some(app_name);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "mongo-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert!(config.mongodb.app_name.is_none());
    }

    #[test]
    fn test_app_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_MONGODB_APP_NAME", "reporting-agent");
        }
        let config = Config::from_env();
        assert_eq!(config.mongodb.app_name.as_deref(), Some("reporting-agent"));
        unsafe {
            std::env::remove_var("MCP_MONGODB_APP_NAME");
        }
    }

    #[test]
    fn test_blank_app_name_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_MONGODB_APP_NAME", "  ");
        }
        let config = Config::from_env();
        assert!(config.mongodb.app_name.is_none());
        unsafe {
            std::env::remove_var("MCP_MONGODB_APP_NAME");
        }
    }

    #[test]
    fn test_server_name_and_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "mongo-test");
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "mongo-test");
        assert_eq!(config.logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }
}
