//! Logging utilities
//!
//! This module provides utilities for formatting and displaying log messages.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing types in logs as YAML
///
/// Use this in tracing statements to format findings and drafts as YAML with
/// a newline before the content:
///
/// ```
/// use diffwarden_review::Pretty;
/// use diffwarden_rules::Finding;
///
/// let findings = vec![Finding::new("src/a.ts", 2, "Avoid TODO comments.")];
/// let rendered = format!("{}", Pretty(&findings));
/// assert!(rendered.starts_with('\n'));
/// assert!(rendered.contains("path: src/a.ts"));
/// ```
///
/// Debug is used as a fallback if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
