//! Service configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SENDGRID_API_KEY` | (none) | SendGrid API key. Empty counts as unset. |
//! | `SENDGRID_BASE_URL` | `https://api.sendgrid.com/v3` | Override the API endpoint |
//! | `HOST` | `0.0.0.0` | Bind address |
//! | `PORT` | `8080` | Bind port |
//! | `MAX_BODY_BYTES` | `1048576` | Largest request body accepted |
//!
//! A missing API key is not an error here. The server still starts and
//! answers every send with "Email service not configured".

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::MailError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Config {
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match non_empty("HOST") {
            Some(h) => h
                .parse()
                .map_err(|_| MailError::Configuration(format!("HOST is not an IP address: {h}")))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match non_empty("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| MailError::Configuration(format!("PORT is not a valid port: {p}")))?,
            None => DEFAULT_PORT,
        };

        let max_body_bytes = match non_empty("MAX_BODY_BYTES") {
            Some(n) => n.parse().map_err(|_| {
                MailError::Configuration(format!("MAX_BODY_BYTES is not a number: {n}"))
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            sendgrid_api_key: non_empty("SENDGRID_API_KEY"),
            sendgrid_base_url: non_empty("SENDGRID_BASE_URL"),
            host,
            port,
            max_body_bytes,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether a provider key is present.
    pub fn is_configured(&self) -> bool {
        self.sendgrid_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sendgrid_api_key: None,
            sendgrid_base_url: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "sendgrid_api_key",
                &self.sendgrid_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("sendgrid_base_url", &self.sendgrid_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
