//! # diffwarden configuration
//!
//! Layered configuration for diffwarden, built on figment. Sources are merged
//! in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. global file `~/.diffwarden/config.{toml,yaml,yml,json}`
//! 3. project file `./.diffwarden/config.{toml,yaml,yml,json}`
//! 4. `DIFFWARDEN_*` environment variables, `__` separating nested keys
//!    (`DIFFWARDEN_POSTING__BATCH_SIZE=20`)
//! 5. `GITHUB_TOKEN`
//! 6. command-line overrides
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! rules_dir = "review-rules"
//! builtin_rules = true
//! dry_run = false
//!
//! [github]
//! default_owner = "acme"
//! default_repo = "widgets"
//!
//! [posting]
//! batch_size = 20
//! ```
//!
//! ```no_run
//! use diffwarden_config::{load_configuration, ConfigOverrides};
//!
//! let config = load_configuration(&ConfigOverrides::default())?;
//! println!("rules from {}", config.rules_dir.display());
//! # Ok::<(), diffwarden_config::ConfigError>(())
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod provider;
mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use error::ConfigError;
pub use provider::{ConfigOverrides, ConfigProvider, ENV_PREFIX};
pub use types::{
    GitHubConfig, PostingConfig, ReviewConfig, DEFAULT_BATCH_SIZE, DEFAULT_GITHUB_API_URL,
    DEFAULT_MAX_COMMENT_PAGES, DEFAULT_PER_PAGE, DEFAULT_RULES_DIR, MAX_PER_PAGE,
};

/// Load configuration from the standard locations
///
/// # Errors
///
/// See [`ConfigProvider::load`].
pub fn load_configuration(overrides: &ConfigOverrides) -> Result<ReviewConfig, ConfigError> {
    ConfigProvider::new().load(overrides)
}
