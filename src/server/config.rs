//! Application configuration read from the environment.

use std::{str::FromStr, time::Duration};

use crate::server::error::config::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RATE_LIMIT: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 1_000;
const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Calls allowed per channel within one window
    pub rate_limit: u32,
    pub rate_limit_window: Duration,
    /// Upper bound on a single channel adapter call
    pub adapter_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let config = Self {
            database_url,
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            rate_limit: parse_or(&lookup, "RATE_LIMIT", DEFAULT_RATE_LIMIT)?,
            rate_limit_window: Duration::from_millis(parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_MS",
                DEFAULT_RATE_LIMIT_WINDOW_MS,
            )?),
            adapter_timeout: Duration::from_millis(parse_or(
                &lookup,
                "ADAPTER_TIMEOUT_MS",
                DEFAULT_ADAPTER_TIMEOUT_MS,
            )?),
        };

        if config.rate_limit == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "RATE_LIMIT".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if config.rate_limit_window.is_zero() {
            return Err(ConfigError::InvalidEnvValue {
                var: "RATE_LIMIT_WINDOW_MS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
    }
}
