//! Local interface address records as reported by the operating system.

use crate::address::{Address, Family, InvalidAddress, split_zone};

/// Per-address flag metadata.
///
/// Only some platforms report these flags. Where they are unavailable the
/// record carries `None` and the address is treated as stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressFlags {
    /// Privacy-extension address that rotates periodically.
    pub temporary: bool,
    /// Address whose preferred lifetime has expired.
    pub deprecated: bool,
}

impl AddressFlags {
    /// Flags for an address that is neither temporary nor deprecated.
    pub const STABLE: Self = Self {
        temporary: false,
        deprecated: false,
    };

    /// Flags for a temporary (privacy-extension) address.
    pub const TEMPORARY: Self = Self {
        temporary: true,
        deprecated: false,
    };

    /// Flags for a deprecated address.
    pub const DEPRECATED: Self = Self {
        temporary: false,
        deprecated: true,
    };

    /// Returns true if either flag rules the address out for publication.
    #[must_use]
    pub const fn is_unstable(self) -> bool {
        self.temporary || self.deprecated
    }
}

/// One address bound to one interface.
///
/// The raw text is kept as reported, including any `%zone` suffix; it is
/// parsed on demand and never cached between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// Address text as reported by the OS (may carry `%zone`).
    pub raw: String,
    /// Address family.
    pub family: Family,
    /// Flag metadata, if the platform reports any.
    pub flags: Option<AddressFlags>,
}

impl InterfaceAddress {
    /// Creates a record without flag metadata.
    #[must_use]
    pub fn new(raw: impl Into<String>, family: Family) -> Self {
        Self {
            raw: raw.into(),
            family,
            flags: None,
        }
    }

    /// Shorthand for an IPv6 record without flag metadata.
    #[must_use]
    pub fn v6(raw: impl Into<String>) -> Self {
        Self::new(raw, Family::V6)
    }

    /// Attaches flag metadata.
    #[must_use]
    pub const fn with_flags(mut self, flags: AddressFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Parses the raw text, dropping any zone suffix.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if the OS reported text that does not parse.
    pub fn address(&self) -> Result<Address, InvalidAddress> {
        Address::parse(&self.raw, self.family)
    }

    /// Returns the zone suffix, if present.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        split_zone(&self.raw).1
    }
}

/// A snapshot of a single interface's addresses at a point in time.
///
/// Address order is the order the OS enumerated them in, and matters:
/// the stabilizer picks the first suitable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    /// Interface name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// All addresses bound to this interface.
    pub addresses: Vec<InterfaceAddress>,
}

impl InterfaceSnapshot {
    /// Creates a new interface snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<InterfaceAddress>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    /// Iterates over the IPv6 records of this interface.
    pub fn ipv6_addresses(&self) -> impl Iterator<Item = &InterfaceAddress> {
        self.addresses.iter().filter(|a| a.family == Family::V6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_strips_zone() {
        let record = InterfaceAddress::v6("fe80::abcd%eth0");
        assert_eq!(record.address().unwrap().to_string(), "fe80::abcd");
        assert_eq!(record.zone(), Some("eth0"));
    }

    #[test]
    fn address_reports_invalid_text() {
        let record = InterfaceAddress::v6("not-an-address");
        assert!(record.address().is_err());
    }

    #[test]
    fn new_record_has_no_flags() {
        let record = InterfaceAddress::v6("2001:db8::1");
        assert_eq!(record.flags, None);
        assert_eq!(record.zone(), None);
    }

    #[test]
    fn with_flags_attaches_metadata() {
        let record = InterfaceAddress::v6("2001:db8::1").with_flags(AddressFlags::TEMPORARY);
        assert_eq!(record.flags, Some(AddressFlags::TEMPORARY));
    }

    #[test]
    fn flags_instability() {
        assert!(!AddressFlags::STABLE.is_unstable());
        assert!(AddressFlags::TEMPORARY.is_unstable());
        assert!(AddressFlags::DEPRECATED.is_unstable());
    }

    #[test]
    fn ipv6_addresses_skips_ipv4_records() {
        let snapshot = InterfaceSnapshot::new(
            "eth0",
            vec![
                InterfaceAddress::new("192.0.2.1", Family::V4),
                InterfaceAddress::v6("2001:db8::1"),
            ],
        );

        let v6: Vec<_> = snapshot.ipv6_addresses().map(|a| a.raw.as_str()).collect();
        assert_eq!(v6, ["2001:db8::1"]);
    }
}
