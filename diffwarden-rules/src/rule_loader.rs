//! Rule loading functionality
//!
//! This module turns rule documents into [`RuleDocument`] values. A broken
//! document never stops a directory load: it is logged as a warning and
//! skipped so the remaining documents are still available.

use crate::frontmatter::parse_frontmatter;
use crate::rules::{RuleClause, RuleDocument, DEFAULT_CATEGORY};
use crate::{RuleError, Severity};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Severity used when a document does not declare one
pub const DEFAULT_SEVERITY: Severity = Severity::Info;

/// Extension of rule document files
const RULE_EXTENSION: &str = "md";

/// Loads rule documents from strings, files and directories
///
/// # Examples
///
/// ```no_run
/// use diffwarden_rules::RuleLoader;
///
/// let loader = RuleLoader::new();
/// let documents = loader.load_directory("./rules");
/// println!("Loaded {} rule documents", documents.len());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleLoader;

impl RuleLoader {
    /// Create a new rule loader
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load every `*.md` document directly inside `path`, in file-name order
    ///
    /// A missing or unreadable directory yields an empty list and a warning.
    /// Documents that fail to parse are skipped with a warning.
    pub fn load_directory(&self, path: impl AsRef<Path>) -> Vec<RuleDocument> {
        let path = path.as_ref();

        if !path.is_dir() {
            tracing::warn!(path = %path.display(), "rules directory not found, no rules loaded");
            return Vec::new();
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to read rules directory entry"
                    );
                    continue;
                }
            };

            let entry_path = entry.path();
            if !entry.file_type().is_file() || !Self::is_rule_file(entry_path) {
                continue;
            }

            match self.load_file(entry_path) {
                Ok(document) => {
                    tracing::debug!(
                        id = %document.id,
                        clauses = document.rules.len(),
                        "loaded rule document"
                    );
                    documents.push(document);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %entry_path.display(),
                        error = %e,
                        "skipping rule document"
                    );
                }
            }
        }

        documents
    }

    /// Load a single rule document from a file
    ///
    /// The document id is the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its metadata block is
    /// malformed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RuleDocument, RuleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RuleError::io(path, e))?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let mut document = self.load_from_string(id, &content)?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    /// Load a rule document from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata block is missing or never closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffwarden_rules::{RuleLoader, Severity};
    ///
    /// let content = r#"---
    /// title: No TODO markers
    /// severity: warning
    /// rules:
    ///   - id: no-todo
    ///     pattern: "\\bTODO\\b"
    ///     message: Avoid TODO comments.
    /// ---
    /// Track work in the issue tracker.
    /// "#;
    ///
    /// let document = RuleLoader::new().load_from_string("no-todo", content).unwrap();
    /// assert_eq!(document.severity, Severity::Warning);
    /// assert_eq!(document.rules[0].pattern, "\\bTODO\\b");
    /// ```
    pub fn load_from_string(&self, id: &str, content: &str) -> Result<RuleDocument, RuleError> {
        let frontmatter = parse_frontmatter(content)?;
        let metadata = frontmatter.metadata;

        let title = metadata
            .get("title")
            .and_then(as_text)
            .unwrap_or_else(|| title_from_id(id));
        let severity = Self::severity_from_metadata(id, &metadata).unwrap_or(DEFAULT_SEVERITY);
        let category = metadata
            .get("category")
            .and_then(as_text)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let mut document = RuleDocument::new(id, title, severity)
            .with_category(category)
            .with_file_patterns(Self::file_patterns_from_metadata(&metadata))
            .with_body(frontmatter.content);
        document.rules = Self::clauses_from_metadata(&document, &metadata);
        document.metadata = metadata;

        Ok(document)
    }

    /// Read `severity`, warning on labels outside error/warning/info
    fn severity_from_metadata(id: &str, metadata: &Map<String, Value>) -> Option<Severity> {
        let raw = metadata.get("severity").and_then(as_text)?;
        match raw.parse::<Severity>() {
            Ok(severity) => Some(severity),
            Err(e) => {
                tracing::warn!(document = id, error = %e, "ignoring document severity");
                None
            }
        }
    }

    /// Read `filePatterns` as an inline or block array, or a single string
    fn file_patterns_from_metadata(metadata: &Map<String, Value>) -> Vec<String> {
        match metadata.get("filePatterns") {
            Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
            Some(Value::String(single)) if !single.is_empty() => vec![single.clone()],
            _ => Vec::new(),
        }
    }

    /// Build the clause list from the `rules` array
    fn clauses_from_metadata(
        document: &RuleDocument,
        metadata: &Map<String, Value>,
    ) -> Vec<RuleClause> {
        let Some(Value::Array(items)) = metadata.get("rules") else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut clauses = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let Value::Object(fields) = item else {
                tracing::warn!(
                    document = %document.id,
                    index,
                    "skipping rule entry that is not a key-value object"
                );
                continue;
            };

            let Some(clause) = Self::clause_from_fields(document, index + 1, fields) else {
                continue;
            };

            if !seen.insert(clause.id.clone()) {
                tracing::warn!(
                    document = %document.id,
                    rule_id = %clause.id,
                    "skipping duplicate rule id"
                );
                continue;
            }
            clauses.push(clause);
        }

        clauses
    }

    /// Build one clause, applying document-level defaults
    fn clause_from_fields(
        document: &RuleDocument,
        position: usize,
        fields: &Map<String, Value>,
    ) -> Option<RuleClause> {
        let id = fields
            .get("id")
            .and_then(as_text)
            .unwrap_or_else(|| format!("{}-{}", document.id, position));

        let Some(pattern) = fields
            .get("pattern")
            .and_then(as_text)
            .filter(|p| !p.is_empty())
        else {
            tracing::warn!(
                document = %document.id,
                rule_id = %id,
                "skipping rule without a pattern"
            );
            return None;
        };

        let message = fields
            .get("message")
            .and_then(as_text)
            .unwrap_or_else(|| document.title.clone());

        let severity = match fields.get("severity").and_then(as_text) {
            Some(raw) => raw.parse::<Severity>().unwrap_or_else(|e| {
                tracing::warn!(
                    document = %document.id,
                    rule_id = %id,
                    error = %e,
                    "using document severity"
                );
                document.severity
            }),
            None => document.severity,
        };

        let mut clause = RuleClause::new(id, pattern, message, severity);
        clause.negative_pattern = fields
            .get("negativePattern")
            .and_then(as_text)
            .filter(|p| !p.is_empty());
        clause.case_insensitive = fields
            .get("caseInsensitive")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(clause)
    }

    /// Check if a path is a rule file based on extension
    fn is_rule_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RULE_EXTENSION))
    }
}

/// Render a scalar metadata value as text
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Derive a title from a document id: `avoid-todo-comments` becomes
/// `Avoid Todo Comments`
pub fn title_from_id(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
