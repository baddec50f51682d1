//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::ConfigError;
use crate::types::ReviewConfig;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Prefix for diffwarden environment variables; `__` separates nested keys
pub const ENV_PREFIX: &str = "DIFFWARDEN_";

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    /// Overrides `rules_dir`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_dir: Option<PathBuf>,
    /// Overrides `builtin_rules`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_rules: Option<bool>,
    /// Overrides `dry_run`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

/// Loads [`ReviewConfig`] from all sources
///
/// Sources, later overriding earlier:
/// 1. built-in defaults
/// 2. `~/.diffwarden/config.*`
/// 3. `./.diffwarden/config.*`
/// 4. `DIFFWARDEN_*` environment variables
/// 5. `GITHUB_TOKEN`, as `github.token`
/// 6. [`ConfigOverrides`]
///
/// Nothing is cached; every load reads the sources again.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Provider reading the standard configuration directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider reading configuration files through `discovery`
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseError`] when a source is malformed or a value has
    /// the wrong type, [`ConfigError::InvalidValue`] when validation fails.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<ReviewConfig, ConfigError> {
        let config: ReviewConfig = self.build_figment(overrides).extract()?;
        config.validate()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn build_figment(&self, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ReviewConfig::default()));

        for file in self.discovery.discover_all() {
            trace!(
                path = %file.path.display(),
                format = ?file.format,
                "merging configuration file"
            );
            figment = figment.merge(Self::file_provider(&file));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["GITHUB_TOKEN"]).map(|_| "github.token".into()))
            .merge(Serialized::defaults(overrides))
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
            ConfigFormat::Json => Figment::from(Json::file(&file.path)),
        }
    }
}
