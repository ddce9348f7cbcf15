//! Validated configuration built from the CLI and the TOML file.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::address::IpVersion;
use crate::provider::{Credential, UpdateEndpoints};
use crate::resolver::LookupEndpoints;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{EndpointsSection, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and a parsed
/// TOML config, or [`ValidatedConfig::load`] to read the file named on the
/// command line.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Hostnames to update, in configuration order (never empty)
    pub hostnames: Vec<String>,

    /// Hashed account password
    pub credential: Credential,

    /// Cache file path, with `~` expanded
    pub cache_path: PathBuf,

    /// Address families to publish
    pub ip_version: IpVersion,

    /// `User-Agent` for lookups and updates
    pub user_agent: HeaderValue,

    /// Timeout for every network request
    pub timeout: Duration,

    /// Public address lookup endpoints
    pub lookup: LookupEndpoints,

    /// Provider update endpoints
    pub update: UpdateEndpoints,

    /// Dry-run mode (decide and log, but never call the provider)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ hostnames: [{}], ip_version: {}, cache: {}, timeout: {}s, dry_run: {} }}",
            self.hostnames.join(", "),
            self.ip_version,
            self.cache_path.display(),
            self.timeout.as_secs(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and a TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`hostnames`, `password`, `cache`)
    /// - No address family is enabled
    /// - A hostname, URL, user agent or timeout is invalid
    pub fn from_raw(cli: &Cli, toml: &TomlConfig) -> Result<Self, ConfigError> {
        let hostnames = resolve_hostnames(&toml.duia.hostnames)?;

        let password = toml
            .duia
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::PASSWORD,
                    "Set duia.password to the MD5 hash of the account password",
                )
            })?;

        let cache = toml
            .duia
            .cache
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(field::CACHE, "Set duia.cache to a writable file path")
            })?;
        let cache_path = expand_home(cache)?;

        let ip_version = IpVersion::from_flags(toml.duia.ipv4, toml.duia.ipv6)
            .ok_or(ConfigError::NoFamilyEnabled)?;

        let user_agent = resolve_user_agent(toml.http.user_agent.as_deref())?;
        let timeout = resolve_timeout(toml.http.timeout)?;
        let (lookup, update) = resolve_endpoints(&toml.endpoints)?;

        Ok(Self {
            hostnames,
            credential: Credential::new(password),
            cache_path,
            ip_version,
            user_agent,
            timeout,
            lookup,
            update,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads the configuration file named on the command line and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No configuration file was given
    /// - The config file cannot be read or parsed
    /// - The configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.as_deref().ok_or_else(|| {
            ConfigError::missing(field::CONFIG, "Pass the path of a configuration file")
        })?;

        let toml = TomlConfig::load(path)?;
        Self::from_raw(cli, &toml)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_hostnames(raw: &[String]) -> Result<Vec<String>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::missing(
            field::HOSTNAMES,
            "Set duia.hostnames to a list of at least one hostname",
        ));
    }

    raw.iter()
        .map(|host| {
            if host.is_empty() || host.chars().any(char::is_whitespace) {
                Err(ConfigError::InvalidHostname {
                    value: host.clone(),
                })
            } else {
                Ok(host.clone())
            }
        })
        .collect()
}

/// Expands a leading `~` to the current user's home directory.
fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with(['/', '\\']) => &rest[1..],
        _ => return Ok(PathBuf::from(path)),
    };

    let home = dirs::home_dir().ok_or_else(|| ConfigError::UnknownHomeDir {
        path: path.to_string(),
    })?;

    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn resolve_user_agent(raw: Option<&str>) -> Result<HeaderValue, ConfigError> {
    let value = raw.unwrap_or(defaults::USER_AGENT);
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidUserAgent {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn resolve_timeout(raw: Option<u64>) -> Result<Duration, ConfigError> {
    match raw {
        None => Ok(defaults::timeout()),
        Some(0) => Err(ConfigError::InvalidDuration {
            field: "http.timeout",
            reason: "must be greater than 0".to_string(),
        }),
        Some(secs) => Ok(Duration::from_secs(secs)),
    }
}

fn resolve_endpoints(
    section: &EndpointsSection,
) -> Result<(LookupEndpoints, UpdateEndpoints), ConfigError> {
    let lookup = LookupEndpoints {
        ipv4: parse_url(
            "endpoints.ipv4_lookup",
            section.ipv4_lookup.as_deref(),
            defaults::IPV4_LOOKUP_URL,
        )?,
        ipv6: parse_url(
            "endpoints.ipv6_lookup",
            section.ipv6_lookup.as_deref(),
            defaults::IPV6_LOOKUP_URL,
        )?,
    };

    let update = UpdateEndpoints {
        ipv4: parse_url(
            "endpoints.ipv4_update",
            section.ipv4_update.as_deref(),
            defaults::IPV4_UPDATE_URL,
        )?,
        ipv6: parse_url(
            "endpoints.ipv6_update",
            section.ipv6_update.as_deref(),
            defaults::IPV6_UPDATE_URL,
        )?,
        dual: parse_url(
            "endpoints.dual_update",
            section.dual_update.as_deref(),
            defaults::DUAL_UPDATE_URL,
        )?,
    };

    Ok((lookup, update))
}

fn parse_url(field: &'static str, raw: Option<&str>, default: &str) -> Result<Url, ConfigError> {
    let value = raw.unwrap_or(default);
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason: e.to_string(),
    })
}
