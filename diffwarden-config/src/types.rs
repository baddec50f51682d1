//! Typed diffwarden configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default rules directory, relative to the working directory
pub const DEFAULT_RULES_DIR: &str = "rules";
/// Default GitHub REST endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default number of comments per submitted review
pub const DEFAULT_BATCH_SIZE: usize = 50;
/// Default page size when listing existing comments
pub const DEFAULT_PER_PAGE: u32 = 100;
/// Largest page size GitHub accepts
pub const MAX_PER_PAGE: u32 = 100;
/// Default cap on pages of existing comments
pub const DEFAULT_MAX_COMMENT_PAGES: u32 = 10;

/// Configuration for a review run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Directory of rule documents
    pub rules_dir: PathBuf,
    /// Whether the embedded rule documents are loaded as well
    pub builtin_rules: bool,
    /// Report what would be posted without posting
    pub dry_run: bool,
    /// GitHub access
    pub github: GitHubConfig,
    /// Review submission tuning
    pub posting: PostingConfig,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            rules_dir: PathBuf::from(DEFAULT_RULES_DIR),
            builtin_rules: true,
            dry_run: true,
            github: GitHubConfig::default(),
            posting: PostingConfig::default(),
        }
    }
}

impl ReviewConfig {
    /// Check values that parse but cannot be used
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a zero batch size or page cap, or a
    /// page size outside `1..=100`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.posting.batch_size == 0 {
            return Err(ConfigError::invalid(
                "posting.batch_size",
                "must be at least 1",
            ));
        }
        if self.posting.per_page == 0 || self.posting.per_page > MAX_PER_PAGE {
            return Err(ConfigError::invalid(
                "posting.per_page",
                format!("must be between 1 and {MAX_PER_PAGE}"),
            ));
        }
        if self.posting.max_comment_pages == 0 {
            return Err(ConfigError::invalid(
                "posting.max_comment_pages",
                "must be at least 1",
            ));
        }
        if self.github.api_url.trim().is_empty() {
            return Err(ConfigError::invalid("github.api_url", "must not be empty"));
        }
        Ok(())
    }
}

/// GitHub access settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,
    /// Bearer token; required only for live posting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Owner used when a pull request is given as a bare number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,
    /// Repository used when a pull request is given as a bare number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repo: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            default_owner: None,
            default_repo: None,
        }
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("default_owner", &self.default_owner)
            .field("default_repo", &self.default_repo)
            .finish()
    }
}

/// Review submission settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingConfig {
    /// Comments per submitted review
    pub batch_size: usize,
    /// Page size when listing existing comments
    pub per_page: u32,
    /// Maximum pages of existing comments to scan
    pub max_comment_pages: u32,
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            per_page: DEFAULT_PER_PAGE,
            max_comment_pages: DEFAULT_MAX_COMMENT_PAGES,
        }
    }
}
