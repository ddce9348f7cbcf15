//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// duiadns: DUIA DNS dynamic address updater
///
/// Publishes the host's current public IPv4/IPv6 addresses to DUIA DNS,
/// skipping hostnames whose addresses have not changed since the last run.
#[derive(Debug, Parser)]
#[command(name = "duiadns")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML configuration to run with
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Decide what to update and log it, without contacting the provider
    /// or writing the cache
    #[arg(long)]
    pub dry_run: bool,

    /// Log decisions at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

/// Operations other than an update run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a commented configuration template
    Init {
        /// Where to write the template
        #[arg(long, short, default_value = "duiadns.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
