//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// Every field is optional at this stage; missing required values are
/// reported by validation with the name of the field.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Account and hostname configuration
    #[serde(default)]
    pub duia: DuiaSection,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpSection,

    /// Endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointsSection,
}

/// Account and hostname section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuiaSection {
    /// Hostnames to keep up to date
    #[serde(default)]
    pub hostnames: Vec<String>,

    /// MD5 hash of the account password
    pub password: Option<String>,

    /// Path of the address cache file
    pub cache: Option<String>,

    /// Publish the IPv4 address
    #[serde(default)]
    pub ipv4: bool,

    /// Publish the IPv6 address
    #[serde(default)]
    pub ipv6: bool,
}

/// HTTP client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// `User-Agent` header value
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Endpoint overrides section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    /// Public IPv4 lookup endpoint
    pub ipv4_lookup: Option<String>,

    /// Public IPv6 lookup endpoint
    pub ipv6_lookup: Option<String>,

    /// Update endpoint for IPv4-only changes
    pub ipv4_update: Option<String>,

    /// Update endpoint for IPv6-only changes
    pub ipv6_update: Option<String>,

    /// Update endpoint for changes of both families
    pub dual_update: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# duiadns configuration file

[duia]
# Hostnames to keep up to date (required)
hostnames = ["myhost.duia.in"]

# MD5 hash of the DUIA DNS account password (required)
# Generate with: printf '%s' 'your-password' | md5sum
password = ""

# Where the last published addresses are remembered (required)
# A leading ~ is expanded to the home directory.
cache = "~/.cache/duiadns.json"

# Address families to publish; at least one must be true
ipv4 = true
ipv6 = false

[http]
# User-Agent header sent with every request (default: DUIA-DNS-UPDATER/1.0)
# user_agent = "DUIA-DNS-UPDATER/1.0"

# Request timeout in seconds (default: 30)
# timeout = 30

[endpoints]
# Overrides for the DUIA DNS service endpoints
# ipv4_lookup = "http://ipv4.duiadns.net"
# ipv6_lookup = "http://ipv6.duiadns.net"
# ipv4_update = "http://ipv4.duiadns.net/dynamic.duia"
# ipv6_update = "http://ipv6.duiadns.net/dynamic.duia"
# dual_update = "http://ip.duiadns.net/dynamic.duia"
"#
    .to_string()
}
