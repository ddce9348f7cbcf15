//! Network layer for local interface addresses.
//!
//! This module provides types and traits for:
//! - Representing interface snapshots ([`InterfaceSnapshot`], [`InterfaceAddress`])
//! - Optional per-address flag metadata ([`AddressFlags`])
//! - Fetching interface information ([`AddressFetcher`])
//! - Platform-specific implementations ([`platform`])
//! - Choosing a stable IPv6 address to publish ([`stabilize`])

mod fetcher;
mod interface;
pub mod platform;
mod stabilize;

pub use fetcher::{AddressFetcher, FetchError};
pub use interface::{AddressFlags, InterfaceAddress, InterfaceSnapshot};
pub use stabilize::{select_stable, stabilize};

#[cfg(test)]
pub use fetcher::mock;
