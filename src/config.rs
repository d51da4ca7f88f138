//! Configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind (default: `0.0.0.0`)
    pub host: IpAddr,

    /// Listening port (default: 3000)
    pub port: u16,

    /// Log filter used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,

    /// Value of `access-control-allow-origin` (default: "*")
    pub cors_allow_origin: String,

    /// OpenAPI YAML file re-read on every docs request. `None` serves the
    /// bundled document.
    pub openapi_spec_path: Option<PathBuf>,

    /// Base URL for the Swagger UI stylesheet and script. `None` uses unpkg.com.
    pub swagger_ui_assets_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Optional environment variables:
    /// - `HOST`: bind address (default: 0.0.0.0)
    /// - `PORT`: bind port (default: 3000)
    /// - `LOG_LEVEL`: log filter (default: "info")
    /// - `CORS_ALLOW_ORIGIN`: allowed origin (default: "*")
    /// - `OPENAPI_SPEC_PATH`: OpenAPI YAML file to serve instead of the bundled one
    /// - `SWAGGER_UI_ASSETS_URL`: where `/api-docs` loads the Swagger UI assets from
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable or `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let defaults = Self::default();

        let host = match non_empty(lookup("HOST")) {
            Some(val) => val.parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "HOST".to_owned(),
                reason: format!("Must be an IP address, got: {val}"),
            })?,
            None => defaults.host,
        };

        let port = match non_empty(lookup("PORT")) {
            Some(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: "PORT".to_owned(),
                reason: format!("Must be a port number, got: {val}"),
            })?,
            None => defaults.port,
        };

        let log_level = non_empty(lookup("LOG_LEVEL")).unwrap_or(defaults.log_level);
        let cors_allow_origin =
            non_empty(lookup("CORS_ALLOW_ORIGIN")).unwrap_or(defaults.cors_allow_origin);
        let openapi_spec_path = non_empty(lookup("OPENAPI_SPEC_PATH")).map(PathBuf::from);
        let swagger_ui_assets_url = non_empty(lookup("SWAGGER_UI_ASSETS_URL"));

        Ok(Config {
            host,
            port,
            log_level,
            cors_allow_origin,
            openapi_spec_path,
            swagger_ui_assets_url,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_level: "info".to_owned(),
            cors_allow_origin: "*".to_owned(),
            openapi_spec_path: None,
            swagger_ui_assets_url: None,
        }
    }
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allow_origin, "*");
        assert!(config.openapi_spec_path.is_none());
        assert!(config.swagger_ui_assets_url.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("CORS_ALLOW_ORIGIN", "https://crm.example.com"),
            ("OPENAPI_SPEC_PATH", "/etc/crm/openapi.yaml"),
            ("SWAGGER_UI_ASSETS_URL", "https://cdn.internal/swagger-ui"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cors_allow_origin, "https://crm.example.com");
        assert_eq!(
            config.openapi_spec_path,
            Some(PathBuf::from("/etc/crm/openapi.yaml"))
        );
        assert_eq!(
            config.swagger_ui_assets_url.as_deref(),
            Some("https://cdn.internal/swagger-ui")
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("PORT", "  "), ("LOG_LEVEL", ""), ("OPENAPI_SPEC_PATH", "")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_level, "info");
        assert!(config.openapi_spec_path.is_none());
    }

    #[test]
    fn test_invalid_port() {
        match load(&[("PORT", "70000")]) {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PORT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_host() {
        match load(&[("HOST", "localhost")]) {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "HOST");
                assert!(reason.contains("localhost"));
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }
}
