//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `EMPLOYEE_API_*` environment variables over
//! configuration files. The timeout carries its default in the config layer;
//! the remaining fields are optional and accessors apply their defaults,
//! validating so malformed values fail at startup rather than on first use.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::upstream::{UpstreamAuth, UpstreamHttpSourceBuildError};

/// Public dummy employee API used when no upstream is configured.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://dummy.restapiexample.com/api/v1";
const DEFAULT_AUTH_HEADER: &str = "Cookie";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The upstream base URL could not be parsed.
    #[error("invalid upstream base URL `{value}`: {source}")]
    InvalidUpstreamUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The bind address is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The upstream credential header could not be built.
    #[error(transparent)]
    InvalidAuth(#[from] UpstreamHttpSourceBuildError),
}

/// Settings for the employee API process.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEE_API")]
pub struct EmployeeApiSettings {
    /// Base URL of the upstream employee service.
    pub upstream_base_url: Option<String>,
    /// Header used to present the upstream credential.
    pub upstream_auth_header: Option<String>,
    /// Upstream credential; omitted entirely when unset.
    pub upstream_auth_value: Option<String>,
    /// Per-request upstream timeout in seconds.
    #[ortho_config(default = 10)]
    pub upstream_timeout_secs: u64,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL for the mirror store; in-memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
}

impl fmt::Debug for EmployeeApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeApiSettings")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("upstream_auth_header", &self.upstream_auth_header)
            .field(
                "upstream_auth_value",
                &self.upstream_auth_value.as_ref().map(|_| "<redacted>"),
            )
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_max_connections", &self.database_max_connections)
            .finish()
    }
}

impl EmployeeApiSettings {
    /// Parse the upstream base URL, falling back to the public dummy API.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidUpstreamUrl`] when the value does not
    /// parse.
    pub fn upstream_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .upstream_base_url
            .as_deref()
            .unwrap_or(DEFAULT_UPSTREAM_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidUpstreamUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Build the upstream credential when a value is configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidAuth`] when the header name or value is
    /// not valid HTTP.
    pub fn upstream_auth(&self) -> Result<Option<UpstreamAuth>, SettingsError> {
        let Some(value) = self.upstream_auth_value.as_deref() else {
            return Ok(None);
        };
        let header = self
            .upstream_auth_header
            .as_deref()
            .unwrap_or(DEFAULT_AUTH_HEADER);
        Ok(Some(UpstreamAuth::new(header, Zeroizing::new(value.to_owned()))?))
    }

    /// Upstream request timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Parse the bind address.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Database pool settings, or `None` to use the in-memory mirror.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let max_size = self
            .database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        Some(PoolConfig::new(url).with_max_size(max_size))
    }
}
