//! Configuration file discovery
//!
//! Looks for `config.{toml,yaml,yml,json}` in the global `~/.diffwarden/`
//! directory and the project `./.diffwarden/` directory. Project files take
//! precedence over global ones.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Name of the configuration directory, both globally and per project
pub const CONFIG_DIR_NAME: &str = ".diffwarden";

/// Candidate file names, in merge order within one directory
const FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Format detected from the extension
    pub format: ConfigFormat,
    /// Where the file was found
    pub scope: ConfigScope,
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration scope indicating where the file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// `~/.diffwarden/`
    Global,
    /// `./.diffwarden/`
    Project,
}

/// Finds configuration files in the global and project directories
///
/// Directories are resolved at discovery time unless set explicitly, so a
/// change of working directory between creation and use is honored.
#[derive(Debug, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discover from `~/.diffwarden/` and `./.diffwarden/`
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover from explicit directories instead of the standard ones
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// All configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        let mut files = Vec::new();
        if let Some(ref dir) = global_dir {
            files.extend(self.search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = project_dir {
            files.extend(self.search_directory(dir, ConfigScope::Project));
        }

        debug!(count = files.len(), "discovered configuration files");
        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            trace!(dir = %dir.display(), "configuration directory does not exist");
            return Vec::new();
        }
        if !dir.is_dir() {
            warn!(path = %dir.display(), "configuration path exists but is not a directory");
            return Vec::new();
        }

        FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|path| {
                let format = ConfigFormat::from_extension(path.extension()?.to_str()?)?;
                trace!(path = %path.display(), ?format, ?scope, "found configuration file");
                Some(ConfigFile {
                    path,
                    format,
                    scope,
                })
            })
            .collect()
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        Some(std::env::current_dir().ok()?.join(CONFIG_DIR_NAME))
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(CONFIG_DIR_NAME))
    }
}
