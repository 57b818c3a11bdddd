//! Error types for sentiscope-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A configured auth token maps to an empty user identifier.
    #[error("auth token {token:?} maps to an empty user id")]
    EmptyUserId {
        /// The offending token (as written in the config file).
        token: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;
