//! Outcomes of an update run.

use std::fmt;

use crate::provider::{AddressChange, UpdateError};

/// What happened to one hostname.
#[derive(Debug)]
pub enum HostOutcome {
    /// Nothing changed; no provider call was made.
    Skipped,
    /// The provider confirmed the change and the cache was updated.
    Updated(AddressChange),
    /// The provider call failed; the cache was left alone.
    Failed {
        /// The change that was attempted.
        change: AddressChange,
        /// Why it failed.
        error: UpdateError,
    },
    /// Dry run: the change would have been sent.
    DryRun(AddressChange),
}

/// Outcome of one hostname, ready to print.
///
/// `Display` renders the one-line summary shown to the user.
#[derive(Debug)]
pub struct HostReport {
    /// The hostname.
    pub host: String,
    /// What happened.
    pub outcome: HostOutcome,
}

impl HostReport {
    /// Creates a report for `host`.
    #[must_use]
    pub fn new(host: impl Into<String>, outcome: HostOutcome) -> Self {
        Self {
            host: host.into(),
            outcome,
        }
    }

    /// Returns true if the provider call failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, HostOutcome::Failed { .. })
    }
}

impl fmt::Display for HostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = &self.host;
        match &self.outcome {
            HostOutcome::Skipped => write!(f, "Update unnecessary for {host}"),
            HostOutcome::Updated(change) => write!(f, "Successful update for {host} {change}"),
            HostOutcome::Failed { change, .. } => write!(f, "Update failed for {host} {change}"),
            HostOutcome::DryRun(change) => write!(f, "Would update {host} {change}"),
        }
    }
}

/// Per-host reports of a whole run, in hostname order of the configuration.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One report per configured hostname.
    pub hosts: Vec<HostReport>,
}

impl RunReport {
    /// Number of hosts whose update was confirmed.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Updated(_)))
    }

    /// Number of hosts needing no update.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Skipped))
    }

    /// Number of hosts whose update failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::Failed { .. }))
    }

    /// Number of hosts that would have been updated in a dry run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.count(|o| matches!(o, HostOutcome::DryRun(_)))
    }

    fn count(&self, pred: impl Fn(&HostOutcome) -> bool) -> usize {
        self.hosts.iter().filter(|h| pred(&h.outcome)).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged, {} failed",
            self.updated(),
            self.skipped(),
            self.failed()
        )?;
        let pending = self.pending();
        if pending > 0 {
            write!(f, ", {pending} pending (dry run)")?;
        }
        Ok(())
    }
}
