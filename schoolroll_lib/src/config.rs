//! Runtime configuration read from the environment.

use std::time::Duration;

use schoolroll_api::{Client, DEFAULT_BASE_URL};

use crate::error::SchoolError;

pub const API_URL_VAR: &str = "SCHOOLROLL_API_URL";
pub const TIMEOUT_VAR: &str = "SCHOOLROLL_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, SchoolError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchoolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    SchoolError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { base_url, timeout })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn client(&self) -> Client {
        let client = Client::with_base_url(&self.base_url);
        match self.timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }
}
