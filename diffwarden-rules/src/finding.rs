//! Findings produced by rule evaluation

use crate::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finding anchored at a diff position, ready to be reported or posted
///
/// `position` is a diff position: the 1-based index of the line within the
/// file's whole hunk stream, context and deletions included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Path of the file within the repository
    pub path: String,
    /// Diff position the finding is anchored to
    pub position: u32,
    /// Human readable message
    pub message: String,
    /// Clause that produced the finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Severity of the producing clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Finding {
    /// Create a finding without rule attribution
    pub fn new(path: impl Into<String>, position: u32, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position,
            message: message.into(),
            rule_id: None,
            severity: None,
        }
    }

    /// Attach the producing clause
    pub fn with_rule(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.rule_id = Some(rule_id.into());
        self.severity = Some(severity);
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.position)?;
        if let Some(severity) = self.severity {
            write!(f, " [{severity}]")?;
        }
        write!(f, " {}", self.message)?;
        if let Some(rule_id) = &self.rule_id {
            write!(f, " (rule: {rule_id})")?;
        }
        Ok(())
    }
}

/// A finding located by its index among the file's added lines
///
/// This is what the evaluation engine emits. `line` counts added lines only,
/// so it is not a diff position; it has to be anchored against the file's
/// positioned patch before it can be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFinding {
    /// Path of the file within the repository
    pub path: String,
    /// 1-based index among the file's added lines
    pub line: usize,
    /// Human readable message
    pub message: String,
    /// Clause that produced the finding
    pub rule_id: String,
    /// Severity of the producing clause
    pub severity: Severity,
}

impl LineFinding {
    /// Convert to a [`Finding`] at `diff_position`
    ///
    /// Callers resolve `diff_position` from the positioned line at index
    /// `line - 1`; passing the added-line index itself places the comment on
    /// the wrong line.
    pub fn into_finding(self, diff_position: u32) -> Finding {
        Finding {
            path: self.path,
            position: diff_position,
            message: self.message,
            rule_id: Some(self.rule_id),
            severity: Some(self.severity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display() {
        let finding = Finding::new("src/a.ts", 4, "Avoid TODO comments.")
            .with_rule("avoid-todo-comments", Severity::Warning);
        assert_eq!(
            finding.to_string(),
            "src/a.ts:4 [warning] Avoid TODO comments. (rule: avoid-todo-comments)"
        );

        let bare = Finding::new("b.rs", 1, "note");
        assert_eq!(bare.to_string(), "b.rs:1 note");
    }

    #[test]
    fn test_finding_json_shape() {
        let finding = Finding::new("a.ts", 2, "m").with_rule("r", Severity::Info);
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["ruleId"], "r");
        assert_eq!(json["severity"], "info");

        let bare = serde_json::to_value(Finding::new("a.ts", 2, "m")).unwrap();
        assert!(bare.get("ruleId").is_none());
    }

    #[test]
    fn test_into_finding_replaces_index_with_position() {
        let line = LineFinding {
            path: "a.ts".to_string(),
            line: 1,
            message: "m".to_string(),
            rule_id: "r".to_string(),
            severity: Severity::Error,
        };
        let finding = line.into_finding(7);
        assert_eq!(finding.position, 7);
        assert_eq!(finding.rule_id.as_deref(), Some("r"));
        assert_eq!(finding.severity, Some(Severity::Error));
    }
}
