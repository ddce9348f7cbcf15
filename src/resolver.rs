//! Discovery of the externally visible IPv4/IPv6 address.
//!
//! Each family has its own lookup endpoint that answers a plain GET with the
//! caller's address as the response body. Anything short of a clean,
//! parseable answer is reported as [`Lookup::Unavailable`]; the updater then
//! simply skips that family for the current run.

use std::future::Future;

use http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::address::{Address, Family, InvalidAddress};
use crate::http::{HttpClient, HttpError, HttpRequest};

/// Why a lookup produced no address.
#[derive(Debug, Error)]
pub enum Unavailable {
    /// The request never produced a response.
    #[error("lookup request failed: {0}")]
    Transport(#[from] HttpError),

    /// The service answered with a non-success status.
    #[error("lookup service returned HTTP {0}")]
    Status(http::StatusCode),

    /// The body was not valid UTF-8.
    #[error("lookup response is not valid UTF-8")]
    NonUtf8Body,

    /// The body was not an address of the requested family.
    #[error("lookup response is not usable: {0}")]
    Invalid(#[from] InvalidAddress),
}

/// Outcome of a public address lookup.
#[derive(Debug)]
pub enum Lookup {
    /// The service reported this address.
    Found(Address),
    /// No address could be determined.
    Unavailable(Unavailable),
}

impl Lookup {
    /// Returns the found address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        match self {
            Self::Found(addr) => Some(addr),
            Self::Unavailable(_) => None,
        }
    }

    /// Consumes the lookup, returning the found address, if any.
    #[must_use]
    pub fn into_address(self) -> Option<Address> {
        match self {
            Self::Found(addr) => Some(addr),
            Self::Unavailable(_) => None,
        }
    }
}

/// Source of the machine's public address for a family.
///
/// Implementations never fail: every problem becomes [`Lookup::Unavailable`].
pub trait AddressResolver: Send + Sync {
    /// Looks up the public address of the given family.
    fn resolve(&self, family: Family) -> impl Future<Output = Lookup> + Send;
}

/// Lookup endpoints, one per family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEndpoints {
    /// Endpoint answering with the caller's IPv4 address.
    pub ipv4: Url,
    /// Endpoint answering with the caller's IPv6 address.
    pub ipv6: Url,
}

impl LookupEndpoints {
    /// Returns the endpoint for `family`.
    #[must_use]
    pub const fn for_family(&self, family: Family) -> &Url {
        match family {
            Family::V4 => &self.ipv4,
            Family::V6 => &self.ipv6,
        }
    }
}

/// [`AddressResolver`] querying HTTP lookup endpoints.
#[derive(Debug)]
pub struct PublicAddressResolver<H> {
    client: H,
    endpoints: LookupEndpoints,
    user_agent: HeaderValue,
}

impl<H> PublicAddressResolver<H> {
    /// Creates a resolver sending `user_agent` with every lookup.
    #[must_use]
    pub const fn new(client: H, endpoints: LookupEndpoints, user_agent: HeaderValue) -> Self {
        Self {
            client,
            endpoints,
            user_agent,
        }
    }
}

impl<H: HttpClient> PublicAddressResolver<H> {
    /// Looks up the public IPv4 address.
    pub async fn resolve_v4(&self) -> Lookup {
        self.lookup(Family::V4).await
    }

    /// Looks up the public IPv6 address.
    pub async fn resolve_v6(&self) -> Lookup {
        self.lookup(Family::V6).await
    }

    async fn lookup(&self, family: Family) -> Lookup {
        match self.try_lookup(family).await {
            Ok(addr) => {
                tracing::debug!("Public {family} address is {addr}");
                Lookup::Found(addr)
            }
            Err(reason) => {
                tracing::warn!("Public {family} address unavailable: {reason}");
                Lookup::Unavailable(reason)
            }
        }
    }

    async fn try_lookup(&self, family: Family) -> Result<Address, Unavailable> {
        let request = HttpRequest::get(self.endpoints.for_family(family).clone())
            .with_user_agent(self.user_agent.clone());

        let response = self.client.request(request).await?;
        if !response.is_success() {
            return Err(Unavailable::Status(response.status));
        }

        let body = response.body_text().ok_or(Unavailable::NonUtf8Body)?;
        Ok(Address::parse(body.trim(), family)?)
    }
}

impl<H: HttpClient> AddressResolver for PublicAddressResolver<H> {
    async fn resolve(&self, family: Family) -> Lookup {
        self.lookup(family).await
    }
}

/// Mock resolver for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// A mock [`AddressResolver`] with one fixed answer per family.
    ///
    /// A family without an answer resolves to [`Lookup::Unavailable`].
    #[derive(Debug, Default)]
    pub struct MockResolver {
        v4: Option<Address>,
        v6: Option<Address>,
        calls: Mutex<Vec<Family>>,
    }

    impl MockResolver {
        /// Creates a resolver answering with the given addresses.
        #[must_use]
        pub fn new(v4: Option<Address>, v6: Option<Address>) -> Self {
            Self {
                v4,
                v6,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Returns the families looked up so far, in order.
        #[must_use]
        pub fn calls(&self) -> Vec<Family> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AddressResolver for MockResolver {
        async fn resolve(&self, family: Family) -> Lookup {
            self.calls.lock().unwrap().push(family);
            let answer = match family {
                Family::V4 => self.v4,
                Family::V6 => self.v6,
            };
            answer.map_or(
                Lookup::Unavailable(Unavailable::Status(http::StatusCode::SERVICE_UNAVAILABLE)),
                Lookup::Found,
            )
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
