//! Orchestration of one update cycle.

use thiserror::Error;

use crate::address::{Address, Family, IpVersion};
use crate::cache::{CacheError, CacheMap, CacheStore};
use crate::network::{AddressFetcher, stabilize};
use crate::provider::{AddressChange, DynDnsProvider};
use crate::resolver::AddressResolver;

use super::{HostOutcome, HostReport, RunReport, decide_update};

/// Error that ends a cycle.
///
/// Per-host provider failures are not errors; they are reported in the
/// [`RunReport`].
#[derive(Debug, Error)]
pub enum CycleError {
    /// The cache could not be loaded; no provider call was made.
    #[error(transparent)]
    Load(CacheError),

    /// Provider calls were made but the cache could not be saved.
    #[error("{source}")]
    Save {
        /// Outcomes of the hosts processed before the failure.
        report: RunReport,
        /// Why saving failed.
        #[source]
        source: CacheError,
    },
}

/// Drives the resolver, stabilizer and provider for a list of hostnames.
///
/// # Type Parameters
///
/// - `R`: Public address lookup
/// - `F`: Local interface enumeration, used to pick a stable IPv6 address
/// - `P`: The dynamic-DNS provider
#[derive(Debug)]
pub struct Updater<R, F, P> {
    resolver: R,
    fetcher: F,
    provider: P,
    ip_version: IpVersion,
    dry_run: bool,
}

impl<R, F, P> Updater<R, F, P> {
    /// Creates an updater publishing the families in `ip_version`.
    #[must_use]
    pub const fn new(resolver: R, fetcher: F, provider: P, ip_version: IpVersion) -> Self {
        Self {
            resolver,
            fetcher,
            provider,
            ip_version,
            dry_run: false,
        }
    }

    /// Enables or disables dry-run mode.
    ///
    /// In dry-run mode decisions are made and reported, but the provider is
    /// never called and the cache is never written.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<R, F, P> Updater<R, F, P>
where
    R: AddressResolver,
    F: AddressFetcher,
    P: DynDnsProvider,
{
    /// Runs a full cycle: load the cache, update every host, save the cache.
    ///
    /// The cache is saved once at the end, and not at all in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Load`] before any provider call if the cache is
    /// unusable, and [`CycleError::Save`] if it could not be written back.
    pub async fn execute_cycle<S: CacheStore>(
        &self,
        hosts: &[String],
        store: &S,
    ) -> Result<RunReport, CycleError> {
        let mut cache = store.load().map_err(CycleError::Load)?;

        let report = self.run(hosts, &mut cache).await;

        if self.dry_run {
            tracing::debug!("Dry run, cache not written");
            return Ok(report);
        }

        match store.save(&cache) {
            Ok(()) => Ok(report),
            Err(source) => Err(CycleError::Save { report, source }),
        }
    }

    /// Updates every host in order, recording confirmed changes in `cache`.
    ///
    /// A failure for one host never stops the others.
    pub async fn run(&self, hosts: &[String], cache: &mut CacheMap) -> RunReport {
        let mut report = RunReport::default();
        for host in hosts {
            report.hosts.push(self.update_host(host, cache).await);
        }
        tracing::info!("Run complete: {report}");
        report
    }

    /// Updates a single host.
    ///
    /// The cache entry for `host` is only modified after the provider
    /// confirmed the update.
    pub async fn update_host(&self, host: &str, cache: &mut CacheMap) -> HostReport {
        let record = cache.get(host);

        let v4 = if self.ip_version.includes_v4() {
            let current = self.current_v4().await;
            decide_update(current.as_ref(), record.and_then(|r| r.cached(Family::V4))).address()
        } else {
            None
        };

        let v6 = if self.ip_version.includes_v6() {
            let current = self.current_v6().await;
            decide_update(current.as_ref(), record.and_then(|r| r.cached(Family::V6))).address()
        } else {
            None
        };

        let Some(change) = AddressChange::from_parts(v4, v6) else {
            tracing::debug!("No change for {host}");
            return HostReport::new(host, HostOutcome::Skipped);
        };

        if self.dry_run {
            tracing::debug!("[DRY-RUN] Skipping provider call for {host}");
            return HostReport::new(host, HostOutcome::DryRun(change));
        }

        match self.provider.update(host, &change).await {
            Ok(()) => {
                let entry = cache.entry(host);
                for addr in change.ipv4().into_iter().chain(change.ipv6()) {
                    entry.record(addr);
                }
                tracing::debug!("Provider confirmed {host} at {change}");
                HostReport::new(host, HostOutcome::Updated(change))
            }
            Err(error) => {
                tracing::warn!("Update of {host} to {change} failed: {error}");
                HostReport::new(host, HostOutcome::Failed { change, error })
            }
        }
    }

    async fn current_v4(&self) -> Option<Address> {
        self.resolver.resolve(Family::V4).await.into_address()
    }

    /// The public IPv6 address, swapped for a stable one on the same interface.
    async fn current_v6(&self) -> Option<Address> {
        let public = self.resolver.resolve(Family::V6).await.into_address();
        stabilize(public.as_ref(), &self.fetcher)
    }
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
