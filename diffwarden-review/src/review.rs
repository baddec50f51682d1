//! Reviewing a pull request end to end

use crate::diff::PositionedPatch;
use crate::github::{PullRequestRef, PullRequestSource, ReviewApi};
use crate::report::{FileSummary, ReviewReport};
use crate::{AnnotationPoster, ReviewError};
use diffwarden_rules::{Finding, RuleChecker, RuleStore};

/// Review `pr` against `store` and post the findings through `poster`
///
/// A live review without credentials fails before any request is made.
/// Files without a patch, without added lines or without applicable rules
/// are skipped. Findings are anchored to diff positions before they reach
/// the poster. With `dry_run` the poster only reports what it would post.
///
/// # Errors
///
/// [`ReviewError::MissingCredentials`] for a live review without a token.
/// Otherwise fails if the pull request cannot be fetched or the poster fails; see
/// [`AnnotationPoster::post`].
pub async fn review_pull_request<S, A>(
    source: &S,
    poster: &AnnotationPoster<A>,
    store: &RuleStore,
    pr: &PullRequestRef,
    dry_run: bool,
) -> Result<ReviewReport, ReviewError>
where
    S: PullRequestSource + ?Sized,
    A: ReviewApi,
{
    tracing::info!(
        pull_request = %pr,
        rules = store.clause_count(),
        dry_run,
        "reviewing pull request"
    );

    if !dry_run && !poster.api().is_authenticated() {
        return Err(ReviewError::missing_credentials(pr));
    }

    let pull = source
        .fetch_pull_request(pr)
        .await
        .map_err(|e| ReviewError::fetch(pr, e))?;

    let checker = RuleChecker::new();
    let mut findings: Vec<Finding> = Vec::new();
    let mut files = Vec::new();

    for file in &pull.files {
        let Some(patch) = file.patch.as_deref() else {
            tracing::debug!(
                path = %file.filename,
                status = %file.status,
                "skipping file without patch"
            );
            continue;
        };

        let positioned = PositionedPatch::map(patch);
        if positioned.is_empty() {
            tracing::debug!(path = %file.filename, "skipping file without added lines");
            continue;
        }

        let clauses = store.rules_for_file(&file.filename);
        if clauses.is_empty() {
            tracing::debug!(path = %file.filename, "no rules apply");
            continue;
        }

        let line_findings = checker.evaluate(&file.filename, &positioned.added_lines(), &clauses);
        let anchored = positioned.anchor(line_findings);
        tracing::debug!(
            path = %file.filename,
            added_lines = positioned.len(),
            findings = anchored.len(),
            "evaluated file"
        );

        files.push(FileSummary {
            path: file.filename.clone(),
            added_lines: positioned.len(),
            findings: anchored.len(),
        });
        findings.extend(anchored);
    }

    let outcome = poster.post(pr, &findings, dry_run).await?;

    Ok(ReviewReport {
        pull_request: pr.clone(),
        title: pull.title,
        state: pull.state,
        files_changed: pull.files.len(),
        files_reviewed: files.len(),
        rule_documents: store.len(),
        rule_clauses: store.clause_count(),
        files,
        findings,
        outcome,
    })
}
