//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::solve;
use crate::input::Config;

#[derive(Parser)]
#[command(name = "munkres")]
#[command(author, version, about = "Minimum-cost assignment solver with a step-by-step trace")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the project .munkres.toml
    #[arg(long, global = true, env = "MUNKRES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip recording the step trace
    #[arg(long, global = true)]
    pub no_steps: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve an assignment problem
    ///
    /// Examples:
    ///   munkres solve costs.json
    ///   cat costs.json | munkres solve -
    Solve {
        /// Problem file (.json, .yaml, .toml) or - for JSON on stdin
        input: String,
    },

    /// Show the step-by-step trace of a solve
    Trace {
        /// Problem file (.json, .yaml, .toml) or - for JSON on stdin
        input: String,

        /// Show only this step (1-based)
        #[arg(long, short)]
        step: Option<usize>,
    },

    /// Validate a problem file without solving it
    Check {
        /// Problem file (.json, .yaml, .toml) or - for JSON on stdin
        input: String,
    },

    /// Solve the built-in 5 agent x 4 task example
    Demo,
}

/// Installs the stderr log subscriber; RUST_LOG overrides --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "munkres_trace=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when run embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_with(path)?,
        None => Config::load()?,
    };
    let format = cli.format.unwrap_or(config.default_format);
    let output = Output::new(format, cli.verbose);
    let record_steps = config.trace.record_steps && !cli.no_steps;

    output.verbose("munkres starting");

    match cli.command {
        Commands::Solve { input } => {
            output.verbose_ctx("solve", &format!("Reading problem from: {}", input));
            solve::solve(&output, &config, &input, record_steps)?
        }
        Commands::Trace { input, step } => {
            output.verbose_ctx("trace", &format!("Reading problem from: {}, step: {:?}", input, step));
            solve::trace(&output, &config, &input, step)?
        }
        Commands::Check { input } => solve::check(&output, &input)?,
        Commands::Demo => solve::demo(&output, &config, record_steps)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
