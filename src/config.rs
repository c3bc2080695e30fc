//! Configuration management for the Rook file server
//!
//! Loads startup configuration from config.toml with environment overrides.
//! All values are fixed for the lifetime of the process and handed to the
//! server explicitly at construction.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration, loaded once during initialization
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Root directory exposed over HTTP; every request path is resolved
    /// against it and must stay inside it
    pub root_dir: String,

    /// Username of the single shared credential pair
    /// Environment: FILESRV_LOGIN
    #[serde(default)]
    pub login: String,

    /// Password of the single shared credential pair
    /// Environment: FILESRV_PASSWORD
    #[serde(default)]
    pub password: String,

    /// Maximum accepted upload body size in MB
    pub max_upload_mb: u64,
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILESRV"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values.
    /// The server must not start with an incomplete configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::Message("bind_address is not set".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Message("port is not set".into()));
        }

        if self.root_dir.is_empty() {
            return Err(ConfigError::Message("root_dir is not set".into()));
        }

        if self.login.is_empty() {
            return Err(ConfigError::Message(
                "login is not set (FILESRV_LOGIN)".into(),
            ));
        }

        if self.password.is_empty() {
            return Err(ConfigError::Message(
                "password is not set (FILESRV_PASSWORD)".into(),
            ));
        }

        if self.max_upload_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the served root directory as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_dir)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            root_dir: "./server_root".to_string(),
            login: "alice".to_string(),
            password: "alice123".to_string(),
            max_upload_mb: 64,
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config = valid_config();
        config.login = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.password = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_network_values_rejected() {
        let mut config = valid_config();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.bind_address = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_root_rejected() {
        let mut config = valid_config();
        config.root_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_helpers() {
        let config = valid_config();
        assert_eq!(config.control_socket(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes(), 64 * 1024 * 1024);
    }
}
