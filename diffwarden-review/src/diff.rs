//! Diff position mapping
//!
//! Review comments are anchored by diff position: the 1-based index of a line
//! counted from the line just below the file's first `@@` hunk header. Every
//! later line consumes a position (context, deletions, additions and any
//! further hunk headers alike), so positions are dense across the whole
//! patch and not limited to added lines.
//!
//! File header lines (`diff --git`, `index`, `---`, `+++`) that precede the
//! first hunk are not part of the addressable stream.

use diffwarden_rules::{Finding, LineFinding};
use serde::Serialize;

/// An added line and the diff position it occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedLine {
    /// Line text without the leading `+`
    pub text: String,
    /// 1-based position within the file's hunk stream
    pub diff_position: u32,
}

/// The added lines of one file patch, with their diff positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionedPatch {
    lines: Vec<PositionedLine>,
}

impl PositionedPatch {
    /// Walk `patch` and keep every genuine addition with its diff position
    ///
    /// An empty patch yields an empty result.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffwarden_review::PositionedPatch;
    ///
    /// let patch = PositionedPatch::map("@@ -1,2 +1,3 @@\n context\n+added\n-removed\n+again\n");
    /// let positions: Vec<u32> = patch.lines().iter().map(|l| l.diff_position).collect();
    /// assert_eq!(positions, vec![2, 4]);
    /// ```
    pub fn map(patch: &str) -> Self {
        let mut lines = Vec::new();
        let mut position: u32 = 0;
        let mut in_hunks = false;

        for raw in patch.lines() {
            if !in_hunks {
                if raw.starts_with("@@") {
                    in_hunks = true;
                    continue;
                }
                if is_file_header(raw) {
                    continue;
                }
                in_hunks = true;
            }

            position += 1;
            if is_addition(raw) {
                lines.push(PositionedLine {
                    text: raw[1..].to_string(),
                    diff_position: position,
                });
            }
        }

        Self { lines }
    }

    /// Positioned added lines, in patch order
    pub fn lines(&self) -> &[PositionedLine] {
        &self.lines
    }

    /// Added line texts only, in the same order as [`Self::lines`]
    pub fn added_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Number of added lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if the patch adds nothing
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Diff position of the 1-based added line `index`
    pub fn position_of(&self, index: usize) -> Option<u32> {
        index
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(|line| line.diff_position)
    }

    /// Replace each finding's added-line index with its diff position
    ///
    /// Findings whose index falls outside this patch are dropped with a
    /// warning; posting them would place a comment on an unrelated line.
    pub fn anchor(&self, findings: Vec<LineFinding>) -> Vec<Finding> {
        findings
            .into_iter()
            .filter_map(|finding| match self.position_of(finding.line) {
                Some(position) => Some(finding.into_finding(position)),
                None => {
                    tracing::warn!(
                        path = %finding.path,
                        line = finding.line,
                        added_lines = self.lines.len(),
                        rule_id = %finding.rule_id,
                        "dropping finding outside the patch"
                    );
                    None
                }
            })
            .collect()
    }
}

/// Added line texts of `patch`, without diff positions
pub fn extract_added_lines(patch: &str) -> Vec<String> {
    PositionedPatch::map(patch)
        .lines
        .into_iter()
        .map(|line| line.text)
        .collect()
}

fn is_addition(line: &str) -> bool {
    line.starts_with('+') && !line.starts_with("+++")
}

fn is_file_header(line: &str) -> bool {
    line.starts_with("diff ")
        || line.starts_with("index ")
        || line.starts_with("--- ")
        || line.starts_with("+++ ")
        || line.starts_with("new file mode")
        || line.starts_with("deleted file mode")
}
