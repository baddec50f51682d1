//! Rule evaluation against a file's added lines
//!
//! For every applicable clause the checker:
//! 1. compiles the clause's pattern, and its negative pattern if any
//! 2. records a tentative finding for each added line the pattern matches
//! 3. drops all tentative findings of the clause when the negative pattern
//!    matches any added line of the file
//!
//! Suppression is file-scoped: one matching line anywhere in the file
//! silences the clause for the whole file.
//!
//! Each clause compiles inside its own failure boundary. A pattern that does
//! not compile disables that clause for the call and is logged; the remaining
//! clauses are still evaluated.

use crate::{LineFinding, RuleClause, RuleError};
use regex::{Regex, RegexBuilder};

/// Evaluates rule clauses against added lines
///
/// # Examples
///
/// ```
/// use diffwarden_rules::{RuleChecker, RuleClause, Severity};
///
/// let clause = RuleClause::new("no-todo", "\\bTODO\\b", "Avoid TODO comments.", Severity::Warning);
/// let findings = RuleChecker::new().evaluate("src/a.ts", &["let a = 1; // TODO", "ok"], &[&clause]);
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].line, 1);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleChecker;

impl RuleChecker {
    /// Create a new checker
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `clauses` against the added lines of `path`
    ///
    /// Findings are ordered by clause, then by line. Several clauses may
    /// report the same line.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        path: &str,
        added_lines: &[S],
        clauses: &[&RuleClause],
    ) -> Vec<LineFinding> {
        if added_lines.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for clause in clauses {
            match self.evaluate_clause(path, added_lines, clause) {
                Ok(clause_findings) => findings.extend(clause_findings),
                Err(e) => {
                    tracing::warn!(
                        path,
                        rule_id = %clause.id,
                        error = %e,
                        "skipping rule with invalid pattern"
                    );
                }
            }
        }
        findings
    }

    fn evaluate_clause<S: AsRef<str>>(
        &self,
        path: &str,
        added_lines: &[S],
        clause: &RuleClause,
    ) -> Result<Vec<LineFinding>, RuleError> {
        let positive = compile(clause, &clause.pattern)?;
        let negative = clause
            .negative_pattern
            .as_deref()
            .map(|pattern| compile(clause, pattern))
            .transpose()?;

        let tentative: Vec<LineFinding> = added_lines
            .iter()
            .enumerate()
            .filter(|(_, line)| positive.is_match(line.as_ref()))
            .map(|(index, _)| LineFinding {
                path: path.to_string(),
                line: index + 1,
                message: clause.message.clone(),
                rule_id: clause.id.clone(),
                severity: clause.severity,
            })
            .collect();

        if tentative.is_empty() {
            return Ok(tentative);
        }

        if let Some(negative) = negative {
            if added_lines.iter().any(|line| negative.is_match(line.as_ref())) {
                tracing::debug!(
                    path,
                    rule_id = %clause.id,
                    suppressed = tentative.len(),
                    "negative pattern matched, suppressing rule for file"
                );
                return Ok(Vec::new());
            }
        }

        Ok(tentative)
    }
}

/// Compile one of `clause`'s patterns with its case sensitivity
fn compile(clause: &RuleClause, pattern: &str) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(clause.case_insensitive)
        .build()
        .map_err(|source| RuleError::InvalidPattern {
            rule_id: clause.id.clone(),
            pattern: pattern.to_string(),
            source,
        })
}
