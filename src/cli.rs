// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `procstore`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procstore",
    version,
    about = "Resolve trigger-scoped workflow processes from an on-disk process store.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the settings file (TOML).
    ///
    /// Default: `Procstore.toml` in the current working directory. The file
    /// is optional; `--store-root` or `PROCSTORE_ROOT` alone are enough.
    #[arg(long, value_name = "PATH", default_value = "Procstore.toml")]
    pub config: String,

    /// Root directory of the process store.
    ///
    /// Overrides `PROCSTORE_ROOT` and `[store] root` from the settings file.
    #[arg(long, value_name = "DIR")]
    pub store_root: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCSTORE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve all processes for a trigger under a project identifier.
    Resolve {
        /// Event trigger name (file-name prefix in the store).
        trigger: String,

        /// Colon-delimited project identifier, e.g. `Group:SubGroup:Project`.
        project: String,

        /// Emit a JSON array instead of the human-readable listing.
        #[arg(long)]
        json: bool,
    },

    /// Print the inheritance chain for a project identifier, ancestor first.
    Chain {
        /// Colon-delimited project identifier.
        project: String,

        /// Emit JSON instead of the human-readable listing.
        #[arg(long)]
        json: bool,
    },

    /// Audit the whole store: cycles, dangling parents, invalid JSON,
    /// orphan merge fragments. Exits nonzero if any error is found.
    Check,
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
