//! HTTP client for the GitHub REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};

use super::error::GitHubError;
use super::types::*;
use super::{PullRequestSource, ReviewApi};

/// Default API URL -- the single source of truth.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size used when listing changed files.
const FILES_PER_PAGE: u32 = 100;

/// Upper bound on changed-file pages; GitHub stops at 3000 files.
const MAX_FILE_PAGES: u32 = 30;

const USER_AGENT: &str = concat!("diffwarden/", env!("CARGO_PKG_VERSION"));

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then falls back to the raw body.
fn extract_error_description(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    body.to_string()
}

/// Client for the pull request endpoints of the GitHub API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}

impl GitHubClient {
    /// Create a client against `api_url`. An empty token counts as none.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            api_url,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Base URL requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the authorization header value, if authenticated.
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    /// Start a request with the headers every GitHub call carries.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match self.auth_header() {
            Some(auth) => builder.header("Authorization", auth),
            None => builder,
        }
    }

    fn pull_url(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_url,
            urlencoding::encode(&pr.owner),
            urlencoding::encode(&pr.repo),
            pr.number
        )
    }

    /// Map an HTTP response to a `GitHubError` based on status code.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_description(&body);

        match status_code {
            401 => Err(GitHubError::Unauthorized(message)),
            404 => Err(GitHubError::NotFound(message)),
            _ => Err(GitHubError::Api {
                status: status_code,
                body: message,
            }),
        }
    }

    /// Get pull request metadata.
    pub async fn pull_request(
        &self,
        pr: &PullRequestRef,
    ) -> Result<PullRequestResponse, GitHubError> {
        let url = self.pull_url(pr);
        let response = self.request(Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    /// List one page of changed files.
    pub async fn list_files(
        &self,
        pr: &PullRequestRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChangedFile>, GitHubError> {
        let url = format!(
            "{}/files?per_page={}&page={}",
            self.pull_url(pr),
            per_page,
            page
        );
        let response = self.request(Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn fetch_pull_request(&self, pr: &PullRequestRef) -> Result<PullRequest, GitHubError> {
        let meta = self.pull_request(pr).await?;

        let mut files = Vec::new();
        for page in 1..=MAX_FILE_PAGES {
            let batch = self.list_files(pr, page, FILES_PER_PAGE).await?;
            let count = batch.len();
            files.extend(batch);
            if count < FILES_PER_PAGE as usize {
                break;
            }
        }
        tracing::debug!(pull_request = %pr, files = files.len(), "fetched pull request");

        Ok(PullRequest {
            number: meta.number,
            title: meta.title,
            body: meta.body.unwrap_or_default(),
            state: meta.state,
            files,
        })
    }
}

#[async_trait]
impl ReviewApi for GitHubClient {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn list_review_comments(
        &self,
        pr: &PullRequestRef,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ReviewComment>, GitHubError> {
        let url = format!(
            "{}/comments?per_page={}&page={}",
            self.pull_url(pr),
            per_page,
            page
        );
        let response = self.request(Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        let result = response.json().await?;
        Ok(result)
    }

    async fn create_review(
        &self,
        pr: &PullRequestRef,
        comments: &[DraftComment],
    ) -> Result<(), GitHubError> {
        let url = format!("{}/reviews", self.pull_url(pr));
        let body = CreateReviewRequest {
            event: "COMMENT",
            comments,
        };
        let response = self.request(Method::POST, &url).json(&body).send().await?;
        self.check_response(response).await?;
        Ok(())
    }
}
