//! Process configuration, read once from the environment at startup.
//!
//! - `JWT_SECRET` (required): token signing secret.
//! - `BIND_ADDR` (default `0.0.0.0`)
//! - `PORT` (default `8080`)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use gatehouse_auth::{AuthConfig, ConfigError};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    jwt_secret: SecretString,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(SettingsError::Missing("JWT_SECRET"))?;

        let ip = match lookup("BIND_ADDR") {
            Some(value) => value.parse::<IpAddr>().map_err(|_| SettingsError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| SettingsError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            jwt_secret: SecretString::from(jwt_secret),
        })
    }

    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        AuthConfig::new(self.jwt_secret.expose_secret().as_bytes().to_vec())
    }
}
