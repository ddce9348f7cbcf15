//! Interface enumeration for platforms without flag reporting (macOS, BSD).
//!
//! `netdev` lists interfaces and their addresses but exposes no
//! temporary/deprecated metadata, so every record carries `flags: None` and
//! the stabilizer treats all non-link-local, non-loopback addresses as stable.

use crate::address::Family;
use crate::network::{AddressFetcher, FetchError, InterfaceAddress, InterfaceSnapshot};

/// [`AddressFetcher`] backed by `netdev::get_interfaces`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetdevFetcher;

impl NetdevFetcher {
    /// Creates a new fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AddressFetcher for NetdevFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let interfaces = netdev::get_interfaces()
            .into_iter()
            .map(|iface| {
                let v4 = iface
                    .ipv4
                    .iter()
                    .map(|net| InterfaceAddress::new(net.addr().to_string(), Family::V4));
                let v6 = iface.ipv6.iter().map(|net| {
                    let addr = net.addr();
                    if addr.is_unicast_link_local() {
                        InterfaceAddress::v6(format!("{addr}%{}", iface.name))
                    } else {
                        InterfaceAddress::v6(addr.to_string())
                    }
                });
                InterfaceSnapshot::new(iface.name.clone(), v4.chain(v6).collect())
            })
            .collect();

        Ok(interfaces)
    }
}
