//! Platform-specific interface enumeration.
//!
//! Each platform provides an [`AddressFetcher`](super::AddressFetcher)
//! implementation, re-exported as [`PlatformFetcher`].
//!
//! # Platform Support
//!
//! - **Linux**: Reads `/proc/net/if_inet6`, with temporary/deprecated flags.
//! - **Windows**: Uses `GetAdaptersAddresses` via the `windows` crate, with
//!   suffix-origin and DAD-state flags.
//! - **Other**: Uses `netdev`; no flag metadata is available.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(windows)]
mod windows;
#[cfg(not(any(windows, target_os = "linux")))]
mod fallback;

#[cfg(target_os = "linux")]
pub use linux::{LinuxFetcher, LinuxFetcher as PlatformFetcher, parse_if_inet6};

#[cfg(windows)]
pub use windows::{WindowsFetcher, WindowsFetcher as PlatformFetcher};

#[cfg(not(any(windows, target_os = "linux")))]
pub use fallback::{NetdevFetcher, NetdevFetcher as PlatformFetcher};
