//! Per-family comparison of a fresh address with the cached one.

use crate::address::Address;

/// Whether one family of one hostname needs publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The provider already has this address, or there is nothing to send.
    Unnecessary,
    /// The provider must be told about this address.
    Update(Address),
}

impl UpdateDecision {
    /// Returns the address to publish, if any.
    #[must_use]
    pub const fn address(self) -> Option<Address> {
        match self {
            Self::Unnecessary => None,
            Self::Update(addr) => Some(addr),
        }
    }
}

/// Compares a freshly determined address with the cached text.
///
/// - No fresh address: nothing to publish.
/// - Cached text parses to the same address: already published.
/// - Otherwise, including unparseable cached text: publish `new`.
#[must_use]
pub fn decide_update(new: Option<&Address>, cached: Option<&str>) -> UpdateDecision {
    let Some(new) = new else {
        return UpdateDecision::Unnecessary;
    };

    let previous = cached.and_then(|text| match Address::parse(text, new.family()) {
        Ok(addr) => Some(addr),
        Err(e) => {
            tracing::debug!("Ignoring cached value: {e}");
            None
        }
    });

    if previous.as_ref() == Some(new) {
        UpdateDecision::Unnecessary
    } else {
        UpdateDecision::Update(*new)
    }
}
