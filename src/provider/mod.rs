//! Dynamic-DNS provider layer.
//!
//! This module provides:
//! - The set of addresses pushed in one call ([`AddressChange`])
//! - The provider abstraction ([`DynDnsProvider`])
//! - The DUIA DNS implementation ([`DuiaProvider`])
//! - Update errors ([`UpdateError`])

mod change;
mod duia;
mod error;

pub use change::AddressChange;
pub use duia::{Credential, DuiaProvider, UpdateEndpoints};
pub use error::UpdateError;

/// Trait for pushing new addresses for a hostname to a dynamic-DNS service.
///
/// One call per hostname per run; implementations do not retry.
pub trait DynDnsProvider: Send + Sync {
    /// Publishes `change` for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] if the request could not be sent or the
    /// service did not confirm the update.
    fn update(
        &self,
        host: &str,
        change: &AddressChange,
    ) -> impl std::future::Future<Output = Result<(), UpdateError>> + Send;
}
