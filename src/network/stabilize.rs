//! Selection of a stable IPv6 address to publish.
//!
//! An external lookup service sees whichever source address the host used for
//! the request, which with privacy extensions enabled is usually a temporary
//! address that rotates every few hours. Publishing that address in DNS would
//! break as soon as it rotates. Instead, the interface carrying the public
//! address is located and a stable address on the same interface is chosen.

use crate::address::Address;

use super::{AddressFetcher, InterfaceAddress, InterfaceSnapshot};

/// Finds a stable address on the interface that carries `public`.
///
/// Returns `None` without touching the fetcher when `public` is absent.
/// Enumeration failures degrade to `None` with a warning.
pub fn stabilize<F: AddressFetcher + ?Sized>(
    public: Option<&Address>,
    fetcher: &F,
) -> Option<Address> {
    let public = public?;

    match fetcher.fetch() {
        Ok(interfaces) => select_stable(public, &interfaces),
        Err(e) => {
            tracing::warn!("Failed to enumerate local interfaces: {e}");
            None
        }
    }
}

/// Pure selection step of [`stabilize`].
///
/// Only the first interface containing `public` is examined. On it, `public`
/// itself is returned if stable, otherwise the first stable address in
/// enumeration order, otherwise `None`.
#[must_use]
pub fn select_stable(public: &Address, interfaces: &[InterfaceSnapshot]) -> Option<Address> {
    for interface in interfaces {
        let candidates: Vec<(Address, bool)> =
            interface.ipv6_addresses().filter_map(classify).collect();

        let Some(&(_, public_is_stable)) = candidates.iter().find(|(addr, _)| addr == public)
        else {
            continue;
        };

        if public_is_stable {
            tracing::debug!("Public address {public} is stable on {}", interface.name);
            return Some(*public);
        }

        let chosen = candidates
            .iter()
            .find_map(|&(addr, stable)| stable.then_some(addr));

        match chosen {
            Some(addr) => {
                tracing::debug!(
                    "Public address {public} is temporary on {}, using {addr}",
                    interface.name
                );
            }
            None => {
                tracing::debug!(
                    "No stable address on {} alongside {public}",
                    interface.name
                );
            }
        }
        return chosen;
    }

    tracing::debug!("Public address {public} is not bound to any local interface");
    None
}

/// Parses a record and decides whether it may be published.
///
/// Records whose text does not parse are dropped.
fn classify(record: &InterfaceAddress) -> Option<(Address, bool)> {
    let addr = match record.address() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::debug!("Skipping unparseable interface address: {e}");
            return None;
        }
    };

    let stable = !addr.is_excluded() && !record.flags.is_some_and(|f| f.is_unstable());
    Some((addr, stable))
}
