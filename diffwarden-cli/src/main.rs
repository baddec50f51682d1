//! diffwarden CLI - rule-driven pull request review.
//!
//! Commands:
//! - `diffwarden review <PR>`: Review a pull request (dry run unless `--post`)
//! - `diffwarden rules`: List the loaded rule documents
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use diffwarden::list::run_rules;
use diffwarden::review::{render_report, run_review};
use diffwarden::{config_overrides, Cli, Commands};
use diffwarden_config::load_configuration;

/// Filter used with `--debug`.
const DEBUG_FILTER: &str =
    "diffwarden=debug,diffwarden_rules=debug,diffwarden_review=debug,diffwarden_config=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match dispatch_command(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
async fn dispatch_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_configuration(&config_overrides(&cli.command))?;
    tracing::debug!(?config, "effective configuration");

    match cli.command {
        Commands::Review {
            pull_request, json, ..
        } => {
            let report = run_review(&config, &pull_request).await?;
            println!("{}", render_report(&report, json)?);
        }
        Commands::Rules { json, .. } => run_rules(&config, json)?,
    }
    Ok(())
}
