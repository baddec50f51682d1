//! Idempotent posting of findings as inline review comments
//!
//! The remote thread is the only record of what was posted. Before posting,
//! existing comments are scanned for signature trailers and any finding whose
//! signature is already present is dropped. Pages are fetched one at a time
//! and batches are submitted one at a time, so a batch is only sent after
//! the previous one has been accepted.
//!
//! A batch failure stops the submission and is returned to the caller.
//! Batches accepted before the failure stay posted; running again posts only
//! what is still missing.

use crate::github::{DraftComment, PullRequestRef, ReviewApi};
use crate::signature::{comment_body, extract_signature, signature};
use crate::{Pretty, ReviewError};
use diffwarden_rules::Finding;
use serde::Serialize;
use std::collections::HashSet;

/// Comments per review submission
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Page size when listing existing comments; GitHub's maximum
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Pages of existing comments scanned before giving up
pub const DEFAULT_MAX_COMMENT_PAGES: u32 = 10;

/// Tuning for [`AnnotationPoster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterOptions {
    /// Comments per review submission
    pub batch_size: usize,
    /// Page size when listing existing comments
    pub per_page: u32,
    /// Upper bound on listed pages
    pub max_comment_pages: u32,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            per_page: DEFAULT_PER_PAGE,
            max_comment_pages: DEFAULT_MAX_COMMENT_PAGES,
        }
    }
}

/// What a post call did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOutcome {
    /// Signatures found on existing comments
    pub existing: usize,
    /// Findings dropped because their signature was already posted or
    /// repeated within this call
    pub skipped_duplicates: usize,
    /// Findings left to post after deduplication
    pub to_post: usize,
    /// Comments actually submitted
    pub submitted: usize,
    /// Review submissions made
    pub batches: usize,
    /// True if nothing was submitted because of dry-run mode
    pub dry_run: bool,
}

/// Posts findings to a pull request without duplicating earlier comments
#[derive(Debug, Clone)]
pub struct AnnotationPoster<A> {
    api: A,
    options: PosterOptions,
}

impl<A: ReviewApi> AnnotationPoster<A> {
    /// Create a poster with default options
    pub fn new(api: A) -> Self {
        Self {
            api,
            options: PosterOptions::default(),
        }
    }

    /// Replace the options; a zero batch size or page size is raised to one
    pub fn with_options(mut self, options: PosterOptions) -> Self {
        self.options = PosterOptions {
            batch_size: options.batch_size.max(1),
            per_page: options.per_page.max(1),
            max_comment_pages: options.max_comment_pages,
        };
        self
    }

    /// The underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Options in effect
    pub fn options(&self) -> PosterOptions {
        self.options
    }

    /// Post `findings` on `pr`, or log what would be posted when `dry_run`
    ///
    /// # Errors
    ///
    /// - [`ReviewError::MissingCredentials`] when live and unauthenticated,
    ///   before any request is made
    /// - [`ReviewError::ListComments`] when a page of existing comments
    ///   cannot be listed
    /// - [`ReviewError::SubmitBatch`] when a submission fails; earlier
    ///   batches remain posted
    pub async fn post(
        &self,
        pr: &PullRequestRef,
        findings: &[Finding],
        dry_run: bool,
    ) -> Result<PostOutcome, ReviewError> {
        let mut outcome = PostOutcome {
            dry_run,
            ..PostOutcome::default()
        };

        if findings.is_empty() {
            return Ok(outcome);
        }

        if !dry_run && !self.api.is_authenticated() {
            return Err(ReviewError::missing_credentials(pr));
        }

        let mut seen = self.existing_signatures(pr).await?;
        outcome.existing = seen.len();

        let drafts: Vec<DraftComment> = findings
            .iter()
            .filter(|finding| seen.insert(signature(finding)))
            .map(|finding| DraftComment {
                path: finding.path.clone(),
                position: finding.position,
                body: comment_body(finding),
            })
            .collect();
        outcome.skipped_duplicates = findings.len() - drafts.len();
        outcome.to_post = drafts.len();

        if drafts.is_empty() {
            tracing::info!(
                pull_request = %pr,
                skipped = outcome.skipped_duplicates,
                "no new comments to post"
            );
            return Ok(outcome);
        }

        if dry_run {
            tracing::info!(
                "[dry run] would post {} review comments on {}{}",
                drafts.len(),
                pr,
                Pretty(&drafts)
            );
            return Ok(outcome);
        }

        let total_batches = drafts.len().div_ceil(self.options.batch_size);
        for (index, batch) in drafts.chunks(self.options.batch_size).enumerate() {
            self.api.create_review(pr, batch).await.map_err(|e| {
                ReviewError::submit_batch(pr, index + 1, total_batches, outcome.submitted, e)
            })?;
            outcome.submitted += batch.len();
            outcome.batches += 1;
            tracing::info!(
                pull_request = %pr,
                batch = index + 1,
                total_batches,
                comments = batch.len(),
                "submitted review batch"
            );
        }

        Ok(outcome)
    }

    /// Signatures already present in the pull request's review comments
    ///
    /// Pages are requested in order until a short page or the page cap.
    pub async fn existing_signatures(
        &self,
        pr: &PullRequestRef,
    ) -> Result<HashSet<String>, ReviewError> {
        let mut signatures = HashSet::new();

        for page in 1..=self.options.max_comment_pages {
            let comments = self
                .api
                .list_review_comments(pr, page, self.options.per_page)
                .await
                .map_err(|e| ReviewError::list_comments(pr, page, e))?;

            let count = comments.len();
            signatures.extend(
                comments
                    .iter()
                    .filter_map(|comment| comment.body.as_deref())
                    .filter_map(extract_signature),
            );

            if count < self.options.per_page as usize {
                break;
            }
            if page == self.options.max_comment_pages {
                tracing::debug!(pull_request = %pr, page, "stopped listing comments at page cap");
            }
        }

        Ok(signatures)
    }
}
