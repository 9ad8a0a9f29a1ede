//! Process configuration, read from environment variables.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid PAGE_SIZE '{0}': expected a positive integer")]
    PageSize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HS256 secret shared with the token issuer.
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    /// Rows per page in list responses.
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Read `JWT_SECRET`, `BIND_ADDR` and `PAGE_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        let page_size = match lookup("PAGE_SIZE") {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::PageSize(raw)),
            },
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            page_size,
        })
    }
}
