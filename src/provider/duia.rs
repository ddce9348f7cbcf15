//! DUIA DNS update client.

use std::fmt;

use http::HeaderValue;
use url::Url;

use crate::http::{HttpClient, HttpRequest};

use super::{AddressChange, DynDnsProvider, UpdateError};

/// Update endpoints, selected by which families a change carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEndpoints {
    /// Used for [`AddressChange::V4`].
    pub ipv4: Url,
    /// Used for [`AddressChange::V6`].
    pub ipv6: Url,
    /// Used for [`AddressChange::Dual`].
    pub dual: Url,
}

impl UpdateEndpoints {
    /// Returns the endpoint matching `change`.
    #[must_use]
    pub const fn for_change(&self, change: &AddressChange) -> &Url {
        match change {
            AddressChange::V4(_) => &self.ipv4,
            AddressChange::V6(_) => &self.ipv6,
            AddressChange::Dual { .. } => &self.dual,
        }
    }
}

/// The pre-hashed account password sent with every update.
///
/// `Debug` never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps an already hashed password.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the value to put on the wire.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// [`DynDnsProvider`] speaking the DUIA DNS `dynamic.duia` protocol.
///
/// Each update is a single GET:
///
/// ```text
/// GET {endpoint}?host=H&password=P[&ip4=A][&ip6=B]
/// ```
///
/// Only HTTP 200 counts as success.
#[derive(Debug)]
pub struct DuiaProvider<H> {
    client: H,
    endpoints: UpdateEndpoints,
    credential: Credential,
    user_agent: HeaderValue,
}

impl<H> DuiaProvider<H> {
    /// Creates a provider sending `user_agent` with every update.
    #[must_use]
    pub const fn new(
        client: H,
        endpoints: UpdateEndpoints,
        credential: Credential,
        user_agent: HeaderValue,
    ) -> Self {
        Self {
            client,
            endpoints,
            credential,
            user_agent,
        }
    }

    /// Builds the update URL for `host` and `change`.
    #[must_use]
    pub fn update_url(&self, host: &str, change: &AddressChange) -> Url {
        let mut url = self.endpoints.for_change(change).clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("host", host)
                .append_pair("password", self.credential.expose());
            if let Some(v4) = change.ipv4() {
                query.append_pair("ip4", &v4.to_string());
            }
            if let Some(v6) = change.ipv6() {
                query.append_pair("ip6", &v6.to_string());
            }
        }
        url
    }
}

impl<H: HttpClient> DynDnsProvider for DuiaProvider<H> {
    async fn update(&self, host: &str, change: &AddressChange) -> Result<(), UpdateError> {
        let request =
            HttpRequest::get(self.update_url(host, change)).with_user_agent(self.user_agent.clone());

        tracing::debug!("Sending update for {host}: {change}");
        let response = self.client.request(request).await?;

        if response.status == http::StatusCode::OK {
            Ok(())
        } else {
            Err(UpdateError::Rejected {
                status: response.status,
                body: response.body_text().map(str::to_string),
            })
        }
    }
}

#[cfg(test)]
#[path = "duia_tests.rs"]
mod tests;
