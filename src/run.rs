//! Application execution logic.
//!
//! Wires the production resolver, interface fetcher, provider and cache
//! store together and runs a single update cycle.

use std::io::{self, Write};

use thiserror::Error;

use duiadns::cache::{CacheError, CacheStore, FileCacheStore};
use duiadns::config::ValidatedConfig;
use duiadns::http::{HttpError, ReqwestClient};
use duiadns::network::AddressFetcher;
use duiadns::network::platform::PlatformFetcher;
use duiadns::provider::{DuiaProvider, DynDnsProvider};
use duiadns::resolver::{AddressResolver, PublicAddressResolver};
use duiadns::update::{CycleError, RunReport, Updater};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("{0}")]
    HttpClient(#[source] HttpError),

    /// The cache could not be loaded; nothing was sent.
    #[error("{0}")]
    CacheLoad(#[source] CacheError),

    /// Updates were sent but the cache could not be saved.
    #[error("{0}")]
    CacheSave(#[source] CacheError),
}

/// Runs one update cycle for every configured hostname.
///
/// Prints one outcome line per hostname to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - The cache file exists but cannot be read or parsed
/// - The cache file cannot be written
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to the real
/// DUIA DNS endpoints and the platform's interface tables.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::HttpClient)?;

    let resolver =
        PublicAddressResolver::new(client.clone(), config.lookup, config.user_agent.clone());
    let provider = DuiaProvider::new(client, config.update, config.credential, config.user_agent);

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - no updates will be sent");
    }

    let updater = Updater::new(
        resolver,
        PlatformFetcher::default(),
        provider,
        config.ip_version,
    )
    .with_dry_run(config.dry_run);

    let store = FileCacheStore::new(config.cache_path);
    tracing::debug!("Using cache {}", store.path().display());

    run_cycle(&updater, &config.hostnames, &store, &mut io::stdout().lock()).await
}

/// Runs a cycle and prints its outcome lines to `out`.
///
/// Outcome lines are printed even when saving the cache fails afterwards,
/// since the provider calls already happened.
async fn run_cycle<R, F, P, S>(
    updater: &Updater<R, F, P>,
    hosts: &[String],
    store: &S,
    out: &mut impl Write,
) -> Result<(), RunError>
where
    R: AddressResolver,
    F: AddressFetcher,
    P: DynDnsProvider,
    S: CacheStore,
{
    match updater.execute_cycle(hosts, store).await {
        Ok(report) => {
            print_report(&report, out);
            Ok(())
        }
        Err(CycleError::Load(e)) => Err(RunError::CacheLoad(e)),
        Err(CycleError::Save { report, source }) => {
            print_report(&report, out);
            Err(RunError::CacheSave(source))
        }
    }
}

fn print_report(report: &RunReport, out: &mut impl Write) {
    for host in &report.hosts {
        if let Err(e) = writeln!(out, "{host}") {
            tracing::warn!("Failed to print outcome for {}: {e}", host.host);
        }
    }
}
