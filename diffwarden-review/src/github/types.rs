//! GitHub API request and response types.

use crate::ReviewError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number, never 0
    pub number: u64,
}

impl PullRequestRef {
    /// Create a reference from its parts.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Parse a pull request reference.
    ///
    /// Accepted forms:
    /// - `https://github.com/<owner>/<repo>/pull/<n>` (trailing segments such
    ///   as `/files` are ignored)
    /// - `<owner>/<repo>#<n>`
    /// - `<n>` or `#<n>`, combined with `default_owner` and `default_repo`
    ///
    /// # Examples
    ///
    /// ```
    /// use diffwarden_review::PullRequestRef;
    ///
    /// let pr = PullRequestRef::parse("https://github.com/acme/widgets/pull/42", None, None).unwrap();
    /// assert_eq!(pr, PullRequestRef::new("acme", "widgets", 42));
    ///
    /// let pr = PullRequestRef::parse("7", Some("acme"), Some("widgets")).unwrap();
    /// assert_eq!(pr.to_string(), "acme/widgets#7");
    /// ```
    pub fn parse(
        input: &str,
        default_owner: Option<&str>,
        default_repo: Option<&str>,
    ) -> Result<Self, ReviewError> {
        let input = input.trim();
        let invalid = || ReviewError::InvalidPullRequestRef(input.to_string());

        if let Some(number) = parse_number(input.strip_prefix('#').unwrap_or(input)) {
            return match (default_owner, default_repo) {
                (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                    Ok(Self::new(owner, repo, number))
                }
                _ => Err(invalid()),
            };
        }

        if let Some(rest) = strip_github_host(input) {
            let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
            return match segments.as_slice() {
                [owner, repo, "pull", number, ..] => parse_number(number)
                    .map(|number| Self::new(*owner, *repo, number))
                    .ok_or_else(invalid),
                _ => Err(invalid()),
            };
        }

        let (slug, number) = input.split_once('#').ok_or_else(invalid)?;
        let (owner, repo) = slug.split_once('/').ok_or_else(invalid)?;
        let number = parse_number(number).ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(owner, repo, number))
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl std::str::FromStr for PullRequestRef {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None, None)
    }
}

fn parse_number(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|n| *n > 0)
}

fn strip_github_host(input: &str) -> Option<&str> {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);
    without_scheme
        .strip_prefix("www.github.com/")
        .or_else(|| without_scheme.strip_prefix("github.com/"))
}

/// Pull request metadata plus its changed files.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Title
    pub title: String,
    /// Description, empty when none was given
    pub body: String,
    /// `open` or `closed`
    pub state: String,
    /// Changed files, in the order GitHub lists them
    pub files: Vec<ChangedFile>,
}

/// Response from `GET /repos/:owner/:repo/pulls/:number`.
#[derive(Debug, Deserialize)]
pub struct PullRequestResponse {
    /// Pull request number
    pub number: u64,
    /// Title
    pub title: String,
    /// Description; `null` when empty
    #[serde(default)]
    pub body: Option<String>,
    /// `open` or `closed`
    pub state: String,
}

/// One entry from `GET /repos/:owner/:repo/pulls/:number/files`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChangedFile {
    /// Path within the repository
    pub filename: String,
    /// `added`, `modified`, `removed`, `renamed`, ...
    pub status: String,
    /// Absent for binary files and very large diffs.
    #[serde(default)]
    pub patch: Option<String>,
    /// Lines added
    #[serde(default)]
    pub additions: u64,
    /// Lines removed
    #[serde(default)]
    pub deletions: u64,
}

/// One entry from `GET /repos/:owner/:repo/pulls/:number/comments`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewComment {
    /// Comment id
    pub id: u64,
    /// Markdown body, possibly carrying a signature trailer
    #[serde(default)]
    pub body: Option<String>,
    /// File the comment is attached to
    #[serde(default)]
    pub path: Option<String>,
    /// Diff position; `null` once the line is outdated
    #[serde(default)]
    pub position: Option<u32>,
}

/// Inline comment inside a review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftComment {
    /// File to comment on
    pub path: String,
    /// Diff position of the commented line
    pub position: u32,
    /// Comment text including the signature trailer
    pub body: String,
}

/// Request body for `POST /repos/:owner/:repo/pulls/:number/reviews`.
#[derive(Debug, Serialize)]
pub struct CreateReviewRequest<'a> {
    /// Review event; always `COMMENT`
    pub event: &'static str,
    /// Inline comments of this submission
    pub comments: &'a [DraftComment],
}
