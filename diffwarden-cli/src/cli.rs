//! CLI definition for the diffwarden command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// diffwarden - rule-driven pull request review
///
/// Checks the lines a pull request adds against markdown rule documents and
/// posts each finding once as an inline review comment.
#[derive(Parser, Debug)]
#[command(name = "diffwarden")]
#[command(version)]
#[command(about = "Rule-driven pull request review")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where rules come from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSourceArgs {
    /// Directory of rule documents (overrides `rules_dir`)
    #[arg(long, value_name = "DIR")]
    pub rules_dir: Option<PathBuf>,
    /// Do not load the built-in rule documents
    #[arg(long)]
    pub no_builtin: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review a pull request and post findings as review comments
    ///
    /// Runs as a dry run unless --post is given or `dry_run = false` is
    /// configured.
    Review {
        /// Pull request: https://github.com/<owner>/<repo>/pull/<n>, <owner>/<repo>#<n>,
        /// or a number when github.default_owner and github.default_repo are configured
        pull_request: String,
        /// Post the findings instead of reporting what would be posted
        #[arg(long)]
        post: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        rules: RuleSourceArgs,
    },
    /// List the loaded rule documents
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        rules: RuleSourceArgs,
    },
}
