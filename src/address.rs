//! Validated IP addresses and their canonical form.
//!
//! Every address that flows through the updater is an [`Address`]: a parsed
//! IPv4 or IPv6 value. Text that does not parse never becomes an `Address`;
//! callers get an [`InvalidAddress`] instead and decide how to degrade.
//!
//! Equality is numeric, so `2001:DB8::1`, `2001:db8:0:0::1` and
//! `2001:db8::1%eth0` all compare equal.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use thiserror::Error;

/// A single IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Which address families a run should publish.
///
/// There is no "neither" variant; a configuration that enables no family is
/// rejected before an `IpVersion` is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// Publish IPv4 addresses only.
    V4,
    /// Publish IPv6 addresses only.
    V6,
    /// Publish both IPv4 and IPv6 addresses.
    Both,
}

impl IpVersion {
    /// Builds an `IpVersion` from two independent enable flags.
    ///
    /// Returns `None` when both flags are off.
    #[must_use]
    pub const fn from_flags(ipv4: bool, ipv6: bool) -> Option<Self> {
        match (ipv4, ipv6) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::V4),
            (false, true) => Some(Self::V6),
            (false, false) => None,
        }
    }

    /// Returns true if this version includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this version includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// Text that could not be turned into an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {} address '{text}'", .expected.map_or_else(|| "IP".to_string(), |f| f.to_string()))]
pub struct InvalidAddress {
    /// The rejected input, verbatim.
    pub text: String,
    /// The family the caller asked for, if any.
    pub expected: Option<Family>,
}

impl InvalidAddress {
    fn new(text: &str, expected: Option<Family>) -> Self {
        Self {
            text: text.to_string(),
            expected,
        }
    }
}

/// A validated IPv4 or IPv6 address.
///
/// The `Display` form is the canonical text (lowercase, RFC 5952 zero
/// compression, no zone suffix) and is what gets stored and sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(IpAddr);

impl Address {
    /// Parses `text` as an address of the given family.
    ///
    /// An IPv6 `%zone` suffix is accepted and dropped. No whitespace
    /// trimming is performed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if the text is not an address of `family`.
    pub fn parse(text: &str, family: Family) -> Result<Self, InvalidAddress> {
        let invalid = || InvalidAddress::new(text, Some(family));
        match family {
            Family::V4 => text
                .parse::<Ipv4Addr>()
                .map(Self::from)
                .map_err(|_| invalid()),
            Family::V6 => split_zone(text)
                .0
                .parse::<Ipv6Addr>()
                .map(Self::from)
                .map_err(|_| invalid()),
        }
    }

    /// Parses `text` as an address of either family.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if the text is neither an IPv4 nor an IPv6
    /// address.
    pub fn parse_any(text: &str) -> Result<Self, InvalidAddress> {
        Self::parse(text, Family::V4)
            .or_else(|_| Self::parse(text, Family::V6))
            .map_err(|_| InvalidAddress::new(text, None))
    }

    /// Returns the family of this address.
    #[must_use]
    pub const fn family(&self) -> Family {
        match self.0 {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Returns true for loopback and IPv6 link-local (`fe80::/10`) addresses.
    ///
    /// Such addresses are never published.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        match self.0 {
            IpAddr::V4(v4) => v4.is_loopback(),
            IpAddr::V6(v6) => v6.is_loopback() || is_link_local_v6(&v6),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(IpAddr::V4(addr))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self(IpAddr::V6(addr))
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        Self(addr)
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_any(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Splits `addr%zone` into the address part and the optional zone.
#[must_use]
pub fn split_zone(text: &str) -> (&str, Option<&str>) {
    match text.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (text, None),
    }
}

const fn is_link_local_v6(addr: &Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xffc0) == 0xfe80
}
