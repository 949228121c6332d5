//! HTTP server configuration loaded from environment variables.

use crate::errors::{Error, Result};

/// Server bind settings.
///
/// Reads from environment variables:
/// - `HOST` - bind address (default: `"0.0.0.0"`)
/// - `PORT` - listen port (default: `8080`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when `PORT` is set but is not a valid port.
    pub fn from_env() -> Result<Self> {
        Self::from_values(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match port {
            Some(raw) => raw.parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT {raw:?}: {e}"),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: host.unwrap_or(defaults.host),
            port,
        })
    }

    /// Returns the `"host:port"` bind address string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_values_overrides() -> Result<()> {
        let config =
            ServerConfig::from_values(Some("127.0.0.1".to_string()), Some("3000".to_string()))?;
        assert_eq!(config.addr(), "127.0.0.1:3000");
        Ok(())
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = ServerConfig::from_values(None, Some("http".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
