//! Application settings loaded via OrthoConfig and the immutable server
//! configuration derived from them.
//!
//! Settings layer CLI flags, `EMPLOYEE_API_*` environment variables and
//! configuration files. They are validated once, before the server starts.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8112/api/v1/employee";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8111";

/// Configuration values controlling the upstream client and the listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEE_API")]
pub struct AppSettings {
    /// Base collection URL of the upstream employee directory.
    pub upstream_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Timeout applied to every upstream request, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl AppSettings {
    /// Return the configured upstream URL, falling back to the default.
    pub fn upstream_url(&self) -> &str {
        self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL)
    }

    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }
}

/// Errors raised while turning [`AppSettings`] into a [`ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid upstream url {value:?}: {source}")]
    InvalidUpstreamUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("upstream url {value:?} must be an http(s) URL")]
    UnsupportedUpstreamUrl { value: String },
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("request timeout must be greater than zero seconds")]
    ZeroTimeout,
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// Immutable configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) upstream_url: Url,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Validate settings and build the server configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the upstream URL, bind address or timeout
    /// is unusable.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        let raw_url = settings.upstream_url();
        let upstream_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidUpstreamUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        if !matches!(upstream_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedUpstreamUrl {
                value: raw_url.to_owned(),
            });
        }

        let raw_addr = settings.bind_addr();
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.to_owned(),
                source,
            })?;

        let timeout_secs = settings.request_timeout_secs;
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            upstream_url,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
