//! Severity labels for rules and findings
//!
//! # Example
//!
//! ```
//! use diffwarden_rules::Severity;
//!
//! let severity = Severity::Error;
//! assert_eq!(severity.to_string(), "error");
//!
//! let parsed: Severity = "warning".parse().unwrap();
//! assert_eq!(parsed, Severity::Warning);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RuleError;

/// Severity attached to a rule clause and the findings it produces
///
/// Only used as a label; no ordering is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed
    Error,
    /// Should be fixed
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// All severities, in declaration order
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Lowercase label used in rule documents and comment bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(RuleError::InvalidSeverity(s.to_string())),
        }
    }
}
