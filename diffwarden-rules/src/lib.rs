//! # diffwarden rules
//!
//! Rule documents and their evaluation against the lines a change adds.
//!
//! ## Features
//!
//! - **Rule documents**: a metadata block in a small key-value markup followed
//!   by a free-text body, parsed without a general YAML parser
//! - **File patterns**: glob-style applicability compiled to anchored
//!   regular expressions
//! - **Rule store**: directory and built-in loading with category, severity
//!   and per-file queries
//! - **Evaluation**: per-clause regex matching with file-scoped suppression

#![warn(missing_docs)]

mod builtin;
mod checker;
mod error;
mod finding;
mod frontmatter;
mod glob;
mod rule_loader;
mod rules;
mod severity;
mod store;

pub use builtin::{get_builtin_rules, load_builtin_documents};
pub use checker::RuleChecker;
pub use error::RuleError;
pub use finding::{Finding, LineFinding};
pub use frontmatter::{parse_frontmatter, parse_metadata, unescape_pattern, FrontmatterResult};
pub use glob::{glob_to_regex, matches, FilePatternSet, DEFAULT_PATTERN};
pub use rule_loader::{title_from_id, RuleLoader, DEFAULT_SEVERITY};
pub use rules::{RuleClause, RuleDocument, DEFAULT_CATEGORY};
pub use severity::Severity;
pub use store::RuleStore;

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RuleError>;
