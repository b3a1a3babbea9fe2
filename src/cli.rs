// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::EmitFormat;

/// Command-line arguments for `randwire`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "randwire",
    version,
    about = "Generate random DAGs, plan their buffer liveness and execute them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the run configuration (TOML).
    #[arg(long, value_name = "PATH", default_value = "randwire.toml")]
    pub config: String,

    /// Override `[search].trials` (number of labelings to evaluate).
    #[arg(long, value_name = "N")]
    pub trials: Option<usize>,

    /// Output format for generated graphs.
    #[arg(long, value_enum, default_value_t = EmitFormat::Text)]
    pub emit: EmitFormat,

    /// Plan only; do not execute the schedules.
    #[arg(long)]
    pub no_exec: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RANDWIRE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the config and print it, but generate nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
