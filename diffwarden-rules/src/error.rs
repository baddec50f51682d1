//! Error types for the rules system
//!
//! Load-time failures (a missing directory, a malformed document) are never
//! fatal for the caller: the loader logs them and continues with fewer rules.
//! They are still modeled as `RuleError` so the parser can be tested on its
//! own and so the warning carries a precise reason.

use std::path::PathBuf;
use thiserror::Error;

/// Error types for rule operations
#[derive(Debug, Error)]
pub enum RuleError {
    /// Document does not start with a metadata delimiter line
    #[error("rule document does not start with a '---' metadata delimiter")]
    MissingFrontmatter,

    /// Metadata block opened but never closed
    #[error("rule document metadata block has no closing '---' delimiter")]
    UnclosedFrontmatter,

    /// Reading a rule file or directory failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A clause pattern failed to compile
    #[error("invalid pattern for rule '{rule_id}' ({pattern}): {source}")]
    InvalidPattern {
        /// Clause whose pattern is invalid
        rule_id: String,
        /// The offending pattern source
        pattern: String,
        /// Compilation error
        source: regex::Error,
    },

    /// A severity label outside error/warning/info
    #[error("invalid severity: {0}")]
    InvalidSeverity(String),
}

impl RuleError {
    /// Build an I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RuleError::Io {
            path: path.into(),
            source,
        }
    }
}
