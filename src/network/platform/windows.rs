//! Windows-specific interface enumeration using `GetAdaptersAddresses`.
//!
//! Temporary addresses are recognized by their random suffix origin
//! (`IpSuffixOriginRandom`), deprecated ones by their DAD state
//! (`IpDadStateDeprecated`).

use crate::address::Family;
use crate::network::{AddressFetcher, AddressFlags, FetchError, InterfaceAddress, InterfaceSnapshot};
use std::net::{Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IP_ADAPTER_ADDRESSES_LH, IP_ADAPTER_UNICAST_ADDRESS_LH,
};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, IpDadStateDeprecated, IpSuffixOriginRandom, SOCKADDR_IN,
    SOCKADDR_IN6,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`AddressFetcher`] using `GetAdaptersAddresses`.
///
/// Reports IPv4 and IPv6 unicast addresses; IPv6 entries carry flag metadata.
#[derive(Debug, Clone, Default)]
pub struct WindowsFetcher {
    _private: (),
}

impl WindowsFetcher {
    /// Creates a new Windows interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressFetcher for WindowsFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        fetch_interfaces()
    }
}

fn fetch_interfaces() -> Result<Vec<InterfaceSnapshot>, FetchError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut interfaces = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list is valid as long as `raw_adapters` is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(snapshot) = parse_adapter(adapter) {
            interfaces.push(snapshot);
        }

        current = adapter.Next;
    }

    Ok(interfaces)
}

/// Calls `GetAdaptersAddresses`, growing the buffer once if the hint was too small.
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: The buffer is valid for `size` bytes; the API updates `size`
    // with the required length.
    let mut result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(size as usize, 0);
        // SAFETY: Same as above, with the size the API asked for.
        result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        };
    }

    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(buffer)
}

/// Returns `None` if the adapter name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<InterfaceSnapshot> {
    // SAFETY: FriendlyName is a valid wide string while the buffer is alive.
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };
    let addresses = collect_addresses(adapter);
    Some(InterfaceSnapshot::new(name, addresses))
}

/// Collects unicast addresses in the order Windows lists them.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<InterfaceAddress> {
    let mut addresses = Vec::new();
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        if let Some(record) = parse_unicast(entry) {
            addresses.push(record);
        }

        unicast = entry.Next;
    }

    addresses
}

#[allow(clippy::cast_ptr_alignment)]
fn parse_unicast(entry: &IP_ADAPTER_UNICAST_ADDRESS_LH) -> Option<InterfaceAddress> {
    // SAFETY: lpSockaddr points to a SOCKADDR_IN or SOCKADDR_IN6 for unicast entries.
    let sockaddr = unsafe { entry.Address.lpSockaddr.as_ref() }?;

    match sockaddr.sa_family {
        f if f == AF_INET => {
            // SAFETY: The family is AF_INET, so this is a valid cast.
            let sockaddr_in = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
            // SAFETY: sin_addr holds the IPv4 address bytes in network order.
            let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
            let addr = Ipv4Addr::new(octets.s_b1, octets.s_b2, octets.s_b3, octets.s_b4);
            Some(InterfaceAddress::new(addr.to_string(), Family::V4))
        }
        f if f == AF_INET6 => {
            // SAFETY: The family is AF_INET6, so this is a valid cast.
            let sockaddr_in6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
            // SAFETY: The union holds the IPv6 address bytes.
            let addr = Ipv6Addr::from(unsafe { sockaddr_in6.sin6_addr.u.Byte });
            // SAFETY: sin6_scope_id is the active member for unicast addresses.
            let scope_id = unsafe { sockaddr_in6.Anonymous.sin6_scope_id };

            let raw = if addr.is_unicast_link_local() {
                format!("{addr}%{scope_id}")
            } else {
                addr.to_string()
            };

            let flags = AddressFlags {
                temporary: entry.SuffixOrigin == IpSuffixOriginRandom,
                deprecated: entry.DadState == IpDadStateDeprecated,
            };
            Some(InterfaceAddress::v6(raw).with_flags(flags))
        }
        _ => None,
    }
}
