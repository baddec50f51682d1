//! GitHub collaborator
//!
//! The review engine talks to the code host through two narrow traits so it
//! can be driven by an in-memory implementation in tests. [`GitHubClient`]
//! implements both against the REST API.

mod client;
mod error;
mod types;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use error::GitHubError;
pub use types::{
    ChangedFile, CreateReviewRequest, DraftComment, PullRequest, PullRequestRef,
    PullRequestResponse, ReviewComment,
};

use async_trait::async_trait;

/// Source of pull request metadata and patches
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetch metadata and every changed file, patches included
    async fn fetch_pull_request(&self, pr: &PullRequestRef) -> Result<PullRequest, GitHubError>;
}

/// Review comment listing and submission
///
/// Timeouts and retries are the implementation's concern; the poster calls
/// each method once and propagates failures.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// True if mutating calls can be made
    fn is_authenticated(&self) -> bool;

    /// One page of existing inline review comments, 1-based
    async fn list_review_comments(
        &self,
        pr: &PullRequestRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ReviewComment>, GitHubError>;

    /// Submit one review carrying `comments` as inline comments
    async fn create_review(
        &self,
        pr: &PullRequestRef,
        comments: &[DraftComment],
    ) -> Result<(), GitHubError>;
}
