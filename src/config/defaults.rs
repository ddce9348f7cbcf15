//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// `User-Agent` sent with every lookup and update request.
pub const USER_AGENT: &str = "DUIA-DNS-UPDATER/1.0";

/// Network timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Endpoint answering with the caller's public IPv4 address.
pub const IPV4_LOOKUP_URL: &str = "http://ipv4.duiadns.net";

/// Endpoint answering with the caller's public IPv6 address.
pub const IPV6_LOOKUP_URL: &str = "http://ipv6.duiadns.net";

/// Update endpoint when only the IPv4 address changed.
pub const IPV4_UPDATE_URL: &str = "http://ipv4.duiadns.net/dynamic.duia";

/// Update endpoint when only the IPv6 address changed.
pub const IPV6_UPDATE_URL: &str = "http://ipv6.duiadns.net/dynamic.duia";

/// Update endpoint when both addresses changed.
pub const DUAL_UPDATE_URL: &str = "http://ip.duiadns.net/dynamic.duia";

/// Default network timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
