//! Error types for diffwarden configuration

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be parsed or did not match the expected shape
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        /// Underlying figment error, naming the offending key and source
        source: Box<figment::Error>,
    },

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue {
        /// Dotted key, e.g. `posting.batch_size`
        key: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}
