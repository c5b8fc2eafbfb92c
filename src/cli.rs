// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `hnpipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hnpipe",
    version,
    about = "Run the Hacker News keyword pipeline: cached, dependency-ordered tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Hnpipe.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Hnpipe.toml")]
    pub config: String,

    /// Print the result of this task instead of the terminal one.
    ///
    /// Only materialized results can be printed; streaming results are
    /// consumed during the run.
    #[arg(long, value_name = "NAME")]
    pub task: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HNPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print tasks in execution order, but don't execute.
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
