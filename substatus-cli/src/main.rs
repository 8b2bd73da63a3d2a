// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Substatus CLI - debrid subscription monitoring from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Show status for every configured provider
//! substatus
//!
//! # Tokens via flags instead of the environment
//! substatus status --rd-token TOKEN --pm-key KEY
//!
//! # Only the accounts that need attention
//! substatus status --expiring-only
//!
//! # JSON output
//! substatus --format json --pretty
//!
//! # List providers
//! substatus providers
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{providers, status};

// ============================================================================
// CLI Definition
// ============================================================================

/// Substatus CLI - debrid subscription monitoring.
#[derive(Parser)]
#[command(name = "substatus")]
#[command(about = "Debrid subscription status CLI")]
#[command(long_about = r#"
Substatus checks debrid account subscriptions and days remaining.

Supported providers:
  • Real-Debrid (realdebrid)
  • AllDebrid (alldebrid)
  • Premiumize (premiumize)
  • TorBox (torbox)
  • Debrid-Link (debridlink)

Tokens come from flags or the environment:
  RD_TOKEN, AD_KEY, PM_KEY, TB_TOKEN, DL_KEY

Examples:
  substatus                        # All configured providers
  substatus status --expiring-only # Accounts needing attention
  substatus --format json          # JSON output
  substatus providers              # List providers
"#)]
#[command(version)]
#[command(author = "Substatus Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'status' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check subscription status (default if no command specified).
    #[command(visible_alias = "s")]
    Status(status::StatusArgs),

    /// List available providers.
    #[command(visible_alias = "p")]
    Providers,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No provider resolved any account data.
    NoData = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("substatus=debug,info")
    } else {
        EnvFilter::new("substatus=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Status(args)) => status::run(args, &cli).await,
        Some(Commands::Providers) => providers::run(&cli),
        None => {
            // Default to status command
            status::run(&status::StatusArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
