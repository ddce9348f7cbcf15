//! duiadns: publishes this machine's public addresses to DUIA DNS.

use duiadns::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Parses arguments, loads the configuration and performs one update run.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_update(config)
}

/// Writes the starter configuration for `duiadns init`.
fn handle_init(output: &Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Wrote configuration template to {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Drives [`run::execute`] on a single-threaded runtime.
#[cfg(not(tarpaulin_include))]
fn run_update(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("ERROR: Cannot start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            exit_code::runtime_error()
        }
    }
}
