//! Error types.
//!
//! Lookup outcomes (missing parameter, bad format, not found) are not errors
//! in this sense; they live in [`crate::contacts::LookupError`] and become
//! HTTP responses. The types here cover infrastructure: binding the socket,
//! reading configuration and loading the OpenAPI document.

use thiserror::Error;

/// Errors returned by the server's fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding or inspecting the listening socket failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while loading the OpenAPI document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The configured document file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML (or JSON).
    #[error("failed to parse OpenAPI document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
