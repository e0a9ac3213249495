// src/config.rs
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{HeartGuardError, Result};

/// Listener and request limits for the HTTP server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind; all interfaces by default.
    pub host: String,
    pub port: u16,

    /// Number of actix workers; the default is a single worker thread.
    pub workers: usize,

    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: 1,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// High-level application configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from defaults, an optional TOML file named by
    /// `HEARTGUARD_CONFIG`, then `HEARTGUARD_*` overrides resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("HEARTGUARD_CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = lookup("HEARTGUARD_HOST") {
            config.server.host = host;
        }
        // Hosting platforms hand the port over as plain `PORT`.
        let port = match parse_var(&lookup, "HEARTGUARD_PORT")? {
            Some(port) => Some(port),
            None => parse_var(&lookup, "PORT")?,
        };
        if let Some(port) = port {
            config.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "HEARTGUARD_WORKERS")? {
            config.server.workers = workers;
        }
        if let Some(limit) = parse_var(&lookup, "HEARTGUARD_MAX_BODY_BYTES")? {
            config.server.max_body_bytes = limit;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Address in the `host:port` form accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(HeartGuardError::Config("workers must be at least 1".to_string()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(HeartGuardError::Config(
                "max_body_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HeartGuardError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(None),
    }
}
