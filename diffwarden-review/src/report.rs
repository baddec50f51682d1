//! Review results for display or JSON output

use crate::github::PullRequestRef;
use crate::PostOutcome;
use diffwarden_rules::Finding;
use serde::Serialize;
use std::fmt;

/// Findings listed individually in the text rendering
pub const MAX_LISTED_FINDINGS: usize = 10;

/// Per-file evaluation summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Path of the file within the repository
    pub path: String,
    /// Number of added lines evaluated
    pub added_lines: usize,
    /// Findings anchored in this file
    pub findings: usize,
}

/// Result of reviewing one pull request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    /// Reviewed pull request
    pub pull_request: PullRequestRef,
    /// Pull request title
    pub title: String,
    /// Pull request state (`open`, `closed`)
    pub state: String,
    /// Files in the pull request
    pub files_changed: usize,
    /// Files that had added lines and applicable rules
    pub files_reviewed: usize,
    /// Rule documents loaded
    pub rule_documents: usize,
    /// Rule clauses loaded
    pub rule_clauses: usize,
    /// Per-file summaries, for reviewed files only
    pub files: Vec<FileSummary>,
    /// All findings, anchored to diff positions
    pub findings: Vec<Finding>,
    /// What posting did
    pub outcome: PostOutcome,
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Review of {}: {} ({})", self.pull_request, self.title, self.state)?;
        writeln!(
            f,
            "Files changed: {}, reviewed: {}",
            self.files_changed, self.files_reviewed
        )?;
        writeln!(
            f,
            "Rules loaded: {} documents, {} clauses",
            self.rule_documents, self.rule_clauses
        )?;
        writeln!(f, "Findings: {}", self.findings.len())?;

        for finding in self.findings.iter().take(MAX_LISTED_FINDINGS) {
            writeln!(f, "  {finding}")?;
        }
        if self.findings.len() > MAX_LISTED_FINDINGS {
            writeln!(
                f,
                "  ...and {} more",
                self.findings.len() - MAX_LISTED_FINDINGS
            )?;
        }

        let outcome = &self.outcome;
        if self.findings.is_empty() {
            write!(f, "Nothing to post")
        } else if outcome.dry_run {
            write!(
                f,
                "Dry run: would post {} comments ({} skipped as duplicates)",
                outcome.to_post, outcome.skipped_duplicates
            )
        } else {
            write!(
                f,
                "Posted {} comments in {} batches ({} skipped as duplicates)",
                outcome.submitted, outcome.batches, outcome.skipped_duplicates
            )
        }
    }
}
