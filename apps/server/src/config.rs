use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use liveness::probe::DEFAULT_PROBE_TIMEOUT;

use crate::error::AppError;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Server settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// JSON or TOML project list; built-in projects when unset
    pub projects_file: Option<PathBuf>,
    pub probe_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
            projects_file: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| AppError::Config(format!("{name}={raw} is not valid"))),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read `BIND`, `PORT`, `PROJECTS_FILE` and `PROBE_TIMEOUT_MS`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let timeout_ms =
            parse_var(&lookup, "PROBE_TIMEOUT_MS", defaults.probe_timeout.as_millis() as u64)?;
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(AppError::Config(format!(
                "PROBE_TIMEOUT_MS must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}, got {timeout_ms}"
            )));
        }

        Ok(Self {
            bind: lookup("BIND").unwrap_or(defaults.bind),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            projects_file: lookup("PROJECTS_FILE").filter(|p| !p.is_empty()).map(PathBuf::from),
            probe_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(format!("{}:{}", self.bind, self.port).parse()?)
    }
}
