//! diffwarden - rule-driven pull request review.
//!
//! The `diffwarden` binary wires three libraries together:
//! - `diffwarden-config` for layered configuration
//! - `diffwarden-rules` for rule documents and line evaluation
//! - `diffwarden-review` for diff positions, GitHub access and posting
//!
//! This crate holds the command handlers so they can be tested without the
//! binary.

pub mod cli;
pub mod list;
pub mod review;

pub use cli::{Cli, Commands, RuleSourceArgs};

use diffwarden_config::ConfigOverrides;

/// Configuration overrides implied by the command-line flags of `command`.
pub fn config_overrides(command: &Commands) -> ConfigOverrides {
    let (rules, dry_run) = match command {
        Commands::Review { rules, post, .. } => (rules, post.then_some(false)),
        Commands::Rules { rules, .. } => (rules, None),
    };
    ConfigOverrides {
        rules_dir: rules.rules_dir.clone(),
        builtin_rules: rules.no_builtin.then_some(false),
        dry_run,
    }
}
