//! Configuration failures. Every variant maps to exit code 1.

use std::path::PathBuf;

use thiserror::Error;

/// Why the configuration could not be loaded, validated or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file is missing or unreadable.
    #[error("Cannot read configuration '{}': {source}", path.display())]
    FileRead {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected keys.
    #[error("Malformed configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write configuration '{}': {source}", path.display())]
    FileWrite {
        /// Destination of the template
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A mandatory setting is absent or empty.
    #[error("{field} is required. {hint}")]
    MissingRequired {
        /// Dotted key, see [`field`]
        field: &'static str,
        /// What the user should add
        hint: &'static str,
    },

    /// Neither `duia.ipv4` nor `duia.ipv6` is enabled.
    #[error("At least one of duia.ipv4 and duia.ipv6 must be true")]
    NoFamilyEnabled,

    /// A hostname entry is empty or contains whitespace.
    #[error("Invalid hostname '{value}': must be non-empty and contain no whitespace")]
    InvalidHostname {
        /// The offending entry
        value: String,
    },

    /// Invalid URL provided.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the field
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The user agent cannot be sent as a header value.
    #[error("Invalid user agent '{value}': {reason}")]
    InvalidUserAgent {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The cache path refers to a home directory that cannot be determined.
    #[error("Cannot expand cache path '{path}': home directory is unknown")]
    UnknownHomeDir {
        /// The path as written in the config file
        path: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The configuration file argument.
    pub const CONFIG: &str = "config";
    /// The hostname list.
    pub const HOSTNAMES: &str = "duia.hostnames";
    /// The hashed account password.
    pub const PASSWORD: &str = "duia.password";
    /// The cache file path.
    pub const CACHE: &str = "duia.cache";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
