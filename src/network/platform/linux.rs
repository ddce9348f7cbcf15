//! Linux interface enumeration using `/proc/net/if_inet6`.
//!
//! Each line of the table describes one IPv6 address:
//!
//! ```text
//! 20010db8000000000000000000000001 02 40 00 80     eth0
//! ^ address (hex)                  ^ifindex ^scope ^name
//!                                     ^prefix  ^flags
//! ```
//!
//! The flags column carries the kernel's `IFA_F_*` bits, which is where
//! temporary and deprecated addresses are identified.

use std::net::Ipv6Addr;
use std::path::{Path, PathBuf};

use crate::network::{AddressFetcher, AddressFlags, FetchError, InterfaceAddress, InterfaceSnapshot};

/// Default location of the kernel's IPv6 address table.
const IF_INET6_PATH: &str = "/proc/net/if_inet6";

/// `IFA_F_TEMPORARY` from `linux/if_addr.h`.
const IFA_F_TEMPORARY: u32 = 0x01;

/// `IFA_F_DEPRECATED` from `linux/if_addr.h`.
const IFA_F_DEPRECATED: u32 = 0x20;

/// `IPV6_ADDR_LINKLOCAL` scope value as printed in the table.
const SCOPE_LINK: u32 = 0x20;

/// Linux implementation of [`AddressFetcher`].
///
/// Reports IPv6 addresses only, each with flag metadata.
#[derive(Debug, Clone)]
pub struct LinuxFetcher {
    path: PathBuf,
}

impl LinuxFetcher {
    /// Creates a fetcher reading the standard `/proc` table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(IF_INET6_PATH)
    }

    /// Creates a fetcher reading an alternative table (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the table path this fetcher reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for LinuxFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressFetcher for LinuxFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            // No IPv6 support in this kernel: no addresses at all.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(FetchError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(parse_if_inet6(&content))
    }
}

/// Parses the table into per-interface snapshots.
///
/// Interfaces appear in order of first occurrence; addresses keep table order.
/// Malformed lines are skipped.
#[must_use]
pub fn parse_if_inet6(content: &str) -> Vec<InterfaceSnapshot> {
    let mut interfaces: Vec<InterfaceSnapshot> = Vec::new();

    for line in content.lines() {
        let Some((name, record)) = parse_line(line) else {
            if !line.trim().is_empty() {
                tracing::debug!("Skipping malformed if_inet6 line: {line:?}");
            }
            continue;
        };

        match interfaces.iter_mut().find(|i| i.name == name) {
            Some(interface) => interface.addresses.push(record),
            None => interfaces.push(InterfaceSnapshot::new(name, vec![record])),
        }
    }

    interfaces
}

fn parse_line(line: &str) -> Option<(&str, InterfaceAddress)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [addr_hex, _index, _prefix, scope, flags, name] = fields.as_slice() else {
        return None;
    };

    if addr_hex.len() != 32 {
        return None;
    }
    let addr = Ipv6Addr::from(u128::from_str_radix(addr_hex, 16).ok()?);
    let scope = u32::from_str_radix(scope, 16).ok()?;
    let flags = u32::from_str_radix(flags, 16).ok()?;

    let raw = if scope == SCOPE_LINK {
        format!("{addr}%{name}")
    } else {
        addr.to_string()
    };

    let record = InterfaceAddress::v6(raw).with_flags(AddressFlags {
        temporary: flags & IFA_F_TEMPORARY != 0,
        deprecated: flags & IFA_F_DEPRECATED != 0,
    });

    Some((*name, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
00000000000000000000000000000001 01 80 10 80       lo
20010db8000000000000000000000001 02 40 00 80     eth0
20010db800000000a1b2c3d4e5f60718 02 40 00 01     eth0
fe800000000000000000000000000001 02 40 20 80     eth0
20010db8000000000000000000000abc 03 40 00 a0    wlan0
";

    #[test]
    fn groups_addresses_by_interface_in_order() {
        let interfaces = parse_if_inet6(SAMPLE);

        let names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["lo", "eth0", "wlan0"]);
        assert_eq!(interfaces[1].addresses.len(), 3);
    }

    #[test]
    fn decodes_hex_address() {
        let interfaces = parse_if_inet6(SAMPLE);
        assert_eq!(interfaces[1].addresses[0].raw, "2001:db8::1");
        assert_eq!(interfaces[0].addresses[0].raw, "::1");
    }

    #[test]
    fn permanent_address_is_stable() {
        let interfaces = parse_if_inet6(SAMPLE);
        assert_eq!(interfaces[1].addresses[0].flags, Some(AddressFlags::STABLE));
    }

    #[test]
    fn temporary_flag_is_decoded() {
        let interfaces = parse_if_inet6(SAMPLE);
        let record = &interfaces[1].addresses[1];
        assert_eq!(record.raw, "2001:db8::a1b2:c3d4:e5f6:718");
        assert_eq!(record.flags, Some(AddressFlags::TEMPORARY));
    }

    #[test]
    fn deprecated_flag_is_decoded() {
        let interfaces = parse_if_inet6(SAMPLE);
        let flags = interfaces[2].addresses[0].flags.unwrap();
        assert!(flags.deprecated);
        assert!(!flags.temporary);
    }

    #[test]
    fn link_local_carries_zone() {
        let interfaces = parse_if_inet6(SAMPLE);
        let record = &interfaces[1].addresses[2];
        assert_eq!(record.raw, "fe80::1%eth0");
        assert_eq!(record.zone(), Some("eth0"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let content = "garbage\n\nzz0db8000000000000000000000001 02 40 00 80 eth0\n\
                       20010db8000000000000000000000001 02 40 00 80 eth0\n";
        let interfaces = parse_if_inet6(content);

        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].addresses.len(), 1);
    }

    #[test]
    fn empty_table_yields_no_interfaces() {
        assert!(parse_if_inet6("").is_empty());
    }

    #[test]
    fn fetch_reads_alternative_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fetcher = LinuxFetcher::with_path(file.path());
        let interfaces = fetcher.fetch().unwrap();

        assert_eq!(interfaces.len(), 3);
    }

    #[test]
    fn fetch_missing_table_yields_no_interfaces() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = LinuxFetcher::with_path(dir.path().join("absent"));

        assert!(fetcher.fetch().unwrap().is_empty());
    }

    #[test]
    fn default_reads_proc() {
        assert_eq!(LinuxFetcher::default().path(), Path::new("/proc/net/if_inet6"));
    }
}
