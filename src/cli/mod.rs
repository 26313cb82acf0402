//! CLI command definitions and handlers

mod init;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Tierscope - scenario complexity validation
#[derive(Parser, Debug)]
#[command(name = "tierscope")]
#[command(
    version,
    about = "Validate generated scenarios against their intended difficulty tier",
    long_about = "Tierscope scores scenario text against four task-complexity frameworks \
(Wood, Campbell, Liu & Li, element interactivity), fuses them into a single tiered \
score, and reports which scenarios match their intended tier and which should be \
regenerated.\n\n\
Analysis is fully deterministic and local.",
    after_help = "\
Examples:
  tierscope validate scenarios.json                 Validate a scenario batch
  tierscope validate scenarios.json --format json   JSON output for scripting
  tierscope validate scenarios.json --strict        Require exact tier matches
  tierscope validate scenarios.json --explain       Per-scenario score breakdowns
  tierscope init                                    Write an example tierscope.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a tierscope.toml config file with example settings
    Init {
        /// Directory to write the config file into
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a batch of scenarios from a JSON file
    #[command(after_help = "\
The input file holds a JSON array of scenarios:
  [{\"id\": \"s-1\", \"intended_tier\": \"moderate\", \"content\": \"...\"}]

Optional per-scenario fields: calculation_steps, variables, relationships,
domain, regeneration_attempts.")]
    Validate {
        /// Path to a JSON file with an array of scenarios
        input: PathBuf,

        /// Path to a tierscope.toml config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Require exact tier matches (overrides config)
        #[arg(long)]
        strict: bool,

        /// Number of parallel workers (1-64)
        #[arg(long, default_value = "8", value_parser = parse_workers)]
        workers: usize,

        /// Print a per-scenario score breakdown
        #[arg(long)]
        explain: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => init::run(&path),
        Commands::Validate {
            input,
            config,
            format,
            output,
            strict,
            workers,
            explain,
        } => validate::run(validate::ValidateArgs {
            input,
            config,
            format,
            output,
            strict,
            workers,
            explain,
        }),
    }
}
