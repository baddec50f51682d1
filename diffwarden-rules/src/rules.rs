//! Rule documents and the clauses they group

use crate::glob::FilePatternSet;
use crate::Severity;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A single pattern check inside a rule document
///
/// Owned by exactly one [`RuleDocument`] and immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleClause {
    /// Identifier, unique within its document
    pub id: String,
    /// Regular expression tested against each added line
    pub pattern: String,
    /// Regular expression that, when it matches any added line of a file,
    /// suppresses every finding of this clause in that file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_pattern: Option<String>,
    /// Message attached to each finding
    pub message: String,
    /// Severity attached to each finding
    pub severity: Severity,
    /// Compile both patterns case-insensitively
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub case_insensitive: bool,
}

impl RuleClause {
    /// Create a case-sensitive clause without a negative pattern
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            negative_pattern: None,
            message: message.into(),
            severity,
            case_insensitive: false,
        }
    }

    /// Set the file-scoped suppression pattern
    pub fn with_negative_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.negative_pattern = Some(pattern.into());
        self
    }

    /// Match case-insensitively
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// A parsed rule document: shared applicability plus zero or more clauses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    /// File stem the document was loaded from
    pub id: String,
    /// Human readable title
    pub title: String,
    /// Default severity for clauses that do not set one
    pub severity: Severity,
    /// Free-form grouping label
    pub category: String,
    /// Glob patterns selecting the files this document applies to; never empty
    pub file_patterns: Vec<String>,
    /// Text after the metadata block
    pub body: String,
    /// Pattern clauses, in document order
    pub rules: Vec<RuleClause>,
    /// Full metadata block, unknown keys included
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    /// Where the document came from, if it was read from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip)]
    matcher: FilePatternSet,
}

impl RuleDocument {
    /// Create a document that applies to every file
    pub fn new(id: impl Into<String>, title: impl Into<String>, severity: Severity) -> Self {
        let file_patterns = vec![crate::DEFAULT_PATTERN.to_string()];
        Self {
            id: id.into(),
            title: title.into(),
            severity,
            category: DEFAULT_CATEGORY.to_string(),
            matcher: FilePatternSet::new(&file_patterns),
            file_patterns,
            body: String::new(),
            rules: Vec::new(),
            metadata: Map::new(),
            source: None,
        }
    }

    /// Replace the file patterns; an empty list falls back to match-all
    pub fn with_file_patterns<S: Into<String>>(
        mut self,
        patterns: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            patterns.push(crate::DEFAULT_PATTERN.to_string());
        }
        self.matcher = FilePatternSet::new(&patterns);
        self.file_patterns = patterns;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a clause
    pub fn with_clause(mut self, clause: RuleClause) -> Self {
        self.rules.push(clause);
        self
    }

    /// True if `path` matches any of this document's file patterns
    pub fn applies_to(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Category used when a document does not declare one
pub const DEFAULT_CATEGORY: &str = "general";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults_match_everything() {
        let doc = RuleDocument::new("doc", "Doc", Severity::Info);
        assert_eq!(doc.file_patterns, vec!["**/*"]);
        assert_eq!(doc.category, "general");
        assert!(doc.applies_to("deep/nested/file.anything"));
    }

    #[test]
    fn test_document_file_patterns() {
        let doc = RuleDocument::new("ts", "TypeScript", Severity::Warning)
            .with_file_patterns(["**/*.ts", "**/*.tsx"]);
        assert!(doc.applies_to("src/app.ts"));
        assert!(doc.applies_to("src/App.tsx"));
        assert!(!doc.applies_to("src/app.js"));
    }

    #[test]
    fn test_empty_file_patterns_fall_back_to_match_all() {
        let doc = RuleDocument::new("doc", "Doc", Severity::Info)
            .with_file_patterns(Vec::<String>::new());
        assert_eq!(doc.file_patterns, vec!["**/*"]);
        assert!(doc.applies_to("a.rs"));
    }

    #[test]
    fn test_clause_builders() {
        let clause = RuleClause::new("id", "TODO", "msg", Severity::Warning)
            .with_negative_pattern("ALLOW")
            .case_insensitive();
        assert_eq!(clause.negative_pattern.as_deref(), Some("ALLOW"));
        assert!(clause.case_insensitive);
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = RuleDocument::new("doc", "Doc", Severity::Error)
            .with_clause(RuleClause::new("c1", "x", "m", Severity::Error));
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("filePatterns").is_some());
        assert!(json["rules"][0].get("negativePattern").is_none());
        assert!(json.get("matcher").is_none());
    }
}
