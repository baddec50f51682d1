//! diffwarden review - review a pull request.

use crate::list::load_rules;
use diffwarden_config::ReviewConfig;
use diffwarden_review::{
    review_pull_request, AnnotationPoster, GitHubClient, PosterOptions, PullRequestRef,
    ReviewReport,
};

/// Review `pull_request` with the rules and GitHub settings from `config`.
///
/// Posts only when `config.dry_run` is false.
pub async fn run_review(config: &ReviewConfig, pull_request: &str) -> anyhow::Result<ReviewReport> {
    let pr = PullRequestRef::parse(
        pull_request,
        config.github.default_owner.as_deref(),
        config.github.default_repo.as_deref(),
    )?;

    let client = GitHubClient::new(config.github.api_url.clone(), config.github.token.clone());
    let poster = AnnotationPoster::new(client.clone()).with_options(poster_options(config));
    let store = load_rules(config);

    let report = review_pull_request(&client, &poster, &store, &pr, config.dry_run).await?;
    Ok(report)
}

/// Render a report as text, or as pretty JSON with `json`.
pub fn render_report(report: &ReviewReport, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

fn poster_options(config: &ReviewConfig) -> PosterOptions {
    PosterOptions {
        batch_size: config.posting.batch_size,
        per_page: config.posting.per_page,
        max_comment_pages: config.posting.max_comment_pages,
    }
}
