//! Interface enumeration trait and error types.

use std::path::PathBuf;

use super::InterfaceSnapshot;
use thiserror::Error;

/// Local address enumeration failed.
///
/// The stabilizer treats every variant as "no stable address this cycle".
#[derive(Debug, Error)]
pub enum FetchError {
    /// `GetAdaptersAddresses` returned an error.
    #[cfg(windows)]
    #[error("GetAdaptersAddresses failed: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Reading an OS-provided address table failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// The table that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other OS-level failure.
    #[error("Interface enumeration failed: {message}")]
    Platform {
        /// Description from the platform layer.
        message: String,
    },
}

/// Lists the addresses bound to local interfaces.
///
/// Implementations return every interface they see and leave selection to
/// [`super::stabilize`]. Addresses keep the order the OS reports them in, and
/// flag metadata is attached only when the platform actually provides it.
/// Readers for each OS live in [`super::platform`].
pub trait AddressFetcher: Send + Sync {
    /// Fetches the current addresses of all network interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the OS refuses to enumerate or an address
    /// table cannot be read.
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError>;
}

impl<T: AddressFetcher + ?Sized> AddressFetcher for &T {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        (**self).fetch()
    }
}
