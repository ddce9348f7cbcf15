//! Request and response values exchanged with an [`HttpClient`].

use std::future::Future;

use http::header::USER_AGENT;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use url::Url;

use super::HttpError;

/// Outgoing request.
///
/// Every call this client makes is a `GET` whose parameters travel in the
/// query string, so there is no request body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: Method,
    /// Full target URL, query included
    pub url: Url,
    /// Headers sent with the request
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// `GET` request for `url` with no headers.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Sets the `User-Agent` header, replacing any previous value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: HeaderValue) -> Self {
        self.headers.insert(USER_AGENT, user_agent);
        self
    }
}

/// Buffered response: status plus the raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status line code
    pub status: StatusCode,
    /// Entire response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response with the given status and body.
    #[must_use]
    pub fn with_body(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as text, or `None` if it is not UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Transport used by the address resolver and the DNS provider.
///
/// Only transport failures are errors. Any status the server answers with,
/// including 4xx and 5xx, comes back as an [`HttpResponse`] for the caller to
/// interpret.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the full response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response was received: connection
    /// failure, timeout, or a URL the transport refuses.
    fn request(&self, req: HttpRequest) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}
