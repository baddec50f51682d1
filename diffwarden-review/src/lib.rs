//! # diffwarden review
//!
//! Turns a pull request's patches into anchored findings and posts them as
//! inline review comments, at most once per finding.
//!
//! - [`PositionedPatch`] maps a unified-diff patch to added lines and their
//!   diff positions
//! - [`signature`] and [`comment_body`] give every finding a stable identity
//!   that survives in the posted comment
//! - [`AnnotationPoster`] deduplicates against existing comments and submits
//!   in batches
//! - [`review_pull_request`] ties them to a [`RuleStore`](diffwarden_rules::RuleStore)

#![warn(missing_docs)]

pub mod diff;
mod error;
pub mod github;
mod logging;
mod poster;
mod report;
mod review;
pub mod signature;

pub use diff::{extract_added_lines, PositionedLine, PositionedPatch};
pub use error::ReviewError;
pub use github::{
    ChangedFile, DraftComment, GitHubClient, GitHubError, PullRequest, PullRequestRef,
    PullRequestSource, ReviewApi, ReviewComment, DEFAULT_API_URL,
};
pub use logging::Pretty;
pub use poster::{
    AnnotationPoster, PostOutcome, PosterOptions, DEFAULT_BATCH_SIZE, DEFAULT_MAX_COMMENT_PAGES,
    DEFAULT_PER_PAGE,
};
pub use report::{FileSummary, ReviewReport, MAX_LISTED_FINDINGS};
pub use review::review_pull_request;
pub use signature::{comment_body, extract_signature, signature, signature_trailer};
