//! The set of addresses carried by one provider call.

use std::fmt;

use crate::address::Address;

/// Addresses to publish for a hostname in a single update.
///
/// A change with neither address cannot be built, so an empty provider call
/// is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressChange {
    /// Only the IPv4 address changed.
    V4(Address),
    /// Only the IPv6 address changed.
    V6(Address),
    /// Both addresses changed.
    Dual {
        /// New IPv4 address.
        v4: Address,
        /// New IPv6 address.
        v6: Address,
    },
}

impl AddressChange {
    /// Combines per-family decisions into one change.
    ///
    /// Returns `None` when neither family needs updating.
    #[must_use]
    pub const fn from_parts(v4: Option<Address>, v6: Option<Address>) -> Option<Self> {
        match (v4, v6) {
            (Some(v4), Some(v6)) => Some(Self::Dual { v4, v6 }),
            (Some(v4), None) => Some(Self::V4(v4)),
            (None, Some(v6)) => Some(Self::V6(v6)),
            (None, None) => None,
        }
    }

    /// Returns the IPv4 address carried, if any.
    #[must_use]
    pub const fn ipv4(&self) -> Option<&Address> {
        match self {
            Self::V4(v4) | Self::Dual { v4, .. } => Some(v4),
            Self::V6(_) => None,
        }
    }

    /// Returns the IPv6 address carried, if any.
    #[must_use]
    pub const fn ipv6(&self) -> Option<&Address> {
        match self {
            Self::V6(v6) | Self::Dual { v6, .. } => Some(v6),
            Self::V4(_) => None,
        }
    }
}

/// Space-separated addresses, IPv4 first.
impl fmt::Display for AddressChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(addr) | Self::V6(addr) => write!(f, "{addr}"),
            Self::Dual { v4, v6 } => write!(f, "{v4} {v6}"),
        }
    }
}
