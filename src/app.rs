//! Process-level plumbing for the binary: exit codes, log setup, hints.

use duiadns::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Process exit statuses.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including runs where some hosts failed to update.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing file, missing or invalid fields.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - cache unreadable, corrupt or unwritable.
    ///
    /// `ExitCode::from` is not const, hence a function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Suggests `duiadns init` when no usable configuration file was found.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::CONFIG => {
            eprintln!("\nUsage: duiadns <CONFIG>");
            eprintln!("Run 'duiadns init' to generate a configuration template.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'duiadns init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`.
/// Logs go to stderr; stdout carries the per-host outcome lines.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
