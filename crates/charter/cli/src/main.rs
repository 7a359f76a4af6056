//! Charter CLI - evaluate features against the constitution
//!
//! This CLI gives operators and CI pipelines a terminal interface to:
//! - Check a feature's declared optimization targets against policy
//! - Evaluate the permanent invariants
//! - Compute drift scores and maintenance reports
//! - Gate changes with the maintenance preflight
//! - Validate history claims into an append-only ledger
//!
//! Results go to stdout; logs go to stderr.

use std::path::PathBuf;

use charter_report::get_safe_mode_fallback;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;
mod output;

use commands::{constitution, evaluate, history, Context, EXIT_OK, EXIT_SAFE_MODE};
use config::CliConfig;
use error::CliResult;

/// Charter CLI application
#[derive(Parser)]
#[command(name = "charter")]
#[command(about = "Charter - constitutional policy, invariant and drift evaluation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CHARTER_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate a feature against the constitution's non-goals
    Policy {
        /// Feature input file (JSON or YAML)
        input: PathBuf,
    },

    /// Evaluate the permanent invariants for a feature
    Invariants {
        /// Feature input file (JSON or YAML)
        input: PathBuf,
    },

    /// Compute a drift score from observed counts
    Drift {
        /// Drift counts file (JSON or YAML)
        input: PathBuf,
    },

    /// Build a maintenance report
    Report {
        /// Report input file (JSON or YAML)
        input: PathBuf,
    },

    /// Run the maintenance preflight gate (exit code 2 on FAIL)
    Preflight {
        /// Feature input file (JSON or YAML)
        input: PathBuf,
    },

    /// Preflight, report and safe-mode fallback in one pass (exit code 2 when halted)
    Run {
        /// Report input file (JSON or YAML)
        input: PathBuf,
    },

    /// Append history claims to a fresh ledger and gate usage requests
    History {
        /// Claims file (JSON or YAML)
        input: PathBuf,
    },

    /// Show the constitution and invariant registry
    Constitution,
}

fn init_tracing(verbose: bool, config: &CliConfig) {
    let fallback = if verbose {
        "debug"
    } else {
        config.log_filter.as_deref().unwrap_or("info")
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config);

    let format = cli.output.or(config.output).unwrap_or_default();
    let ctx = Context { config, format };

    let result = match &cli.command {
        Commands::Policy { input } => evaluate::policy(input, &ctx),
        Commands::Invariants { input } => evaluate::invariants(input, &ctx),
        Commands::Drift { input } => evaluate::drift(input, &ctx),
        Commands::Report { input } => evaluate::report(input, &ctx),
        Commands::Preflight { input } => evaluate::preflight(input, &ctx),
        Commands::Run { input } => evaluate::run(input, &ctx),
        Commands::History { input } => history::execute(input, &ctx),
        Commands::Constitution => constitution::execute(&ctx),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) if err.is_input_error() => {
            output::print_error(&err.to_string());
            let fallback = get_safe_mode_fallback(err.to_string());
            output::print_single(&fallback, ctx.format)?;
            EXIT_SAFE_MODE
        }
        Err(err) => return Err(err),
    };

    if code != EXIT_OK {
        std::process::exit(code);
    }
    Ok(())
}
