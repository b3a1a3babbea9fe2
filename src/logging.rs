// src/logging.rs

//! `tracing` subscriber setup for the binary.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to every target;
//! 2. `RANDWIRE_LOG`, parsed as an `EnvFilter` directive string, so
//!    `RANDWIRE_LOG=info,randwire::exec=trace` works;
//! 3. `info`.
//!
//! Everything is written to stderr; stdout is reserved for summaries and
//! JSON graphs.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const ENV_VAR: &str = "RANDWIRE_LOG";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => match std::env::var(ENV_VAR) {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
                .with_context(|| format!("invalid {ENV_VAR} value {directives:?}"))?,
            _ => EnvFilter::new("info"),
        },
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
