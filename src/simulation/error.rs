//! Errors raised while loading configuration.

use thiserror::Error;

/// Errors emitted when reading or validating [`super::params::Params`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for `Params`.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A parameter is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
