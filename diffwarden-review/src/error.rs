//! Error types for review operations
//!
//! Every variant that involves the remote API names the pull request, and
//! submission failures also say which batch failed and how many comments had
//! already been posted, since earlier batches are not rolled back.

use crate::github::{GitHubError, PullRequestRef};
use thiserror::Error;

/// Error types for review operations
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Live posting was requested without a token
    #[error(
        "posting to {owner}/{repo}#{pull_number} requires a GitHub token; set GITHUB_TOKEN or github.token, or run without posting"
    )]
    MissingCredentials {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Pull request number
        pull_number: u64,
    },

    /// Fetching the pull request or its files failed
    #[error("failed to fetch pull request {owner}/{repo}#{pull_number}: {source}")]
    FetchPullRequest {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Pull request number
        pull_number: u64,
        /// Underlying API error
        source: GitHubError,
    },

    /// Listing existing review comments failed
    #[error("failed to list review comments on {owner}/{repo}#{pull_number} (page {page}): {source}")]
    ListComments {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Pull request number
        pull_number: u64,
        /// Page that failed, 1-based
        page: u32,
        /// Underlying API error
        source: GitHubError,
    },

    /// Submitting a review batch failed
    #[error(
        "failed to submit review batch {batch} of {total_batches} on {owner}/{repo}#{pull_number} ({submitted} comments already posted): {source}"
    )]
    SubmitBatch {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Pull request number
        pull_number: u64,
        /// Batch that failed, 1-based
        batch: usize,
        /// Number of batches in the submission
        total_batches: usize,
        /// Comments posted by earlier batches
        submitted: usize,
        /// Underlying API error
        source: GitHubError,
    },

    /// Pull request reference could not be parsed
    #[error("invalid pull request reference '{0}': expected https://github.com/<owner>/<repo>/pull/<n>, <owner>/<repo>#<n>, or a number with a default owner and repo")]
    InvalidPullRequestRef(String),
}

impl ReviewError {
    pub(crate) fn missing_credentials(pr: &PullRequestRef) -> Self {
        Self::MissingCredentials {
            owner: pr.owner.clone(),
            repo: pr.repo.clone(),
            pull_number: pr.number,
        }
    }

    pub(crate) fn fetch(pr: &PullRequestRef, source: GitHubError) -> Self {
        Self::FetchPullRequest {
            owner: pr.owner.clone(),
            repo: pr.repo.clone(),
            pull_number: pr.number,
            source,
        }
    }

    pub(crate) fn list_comments(pr: &PullRequestRef, page: u32, source: GitHubError) -> Self {
        Self::ListComments {
            owner: pr.owner.clone(),
            repo: pr.repo.clone(),
            pull_number: pr.number,
            page,
            source,
        }
    }

    pub(crate) fn submit_batch(
        pr: &PullRequestRef,
        batch: usize,
        total_batches: usize,
        submitted: usize,
        source: GitHubError,
    ) -> Self {
        Self::SubmitBatch {
            owner: pr.owner.clone(),
            repo: pr.repo.clone(),
            pull_number: pr.number,
            batch,
            total_batches,
            submitted,
            source,
        }
    }
}
