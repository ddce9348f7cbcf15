//! Configuration layer for duiadns.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Sources
//!
//! Account, hostname and endpoint settings come only from the TOML file
//! named on the command line. The CLI contributes the run mode
//! (`--dry-run`) and logging verbosity.
//!
//! Optional settings fall back to [`defaults`]; the DUIA DNS public endpoints
//! are the defaults for every URL.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
