use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const API_URL_VAR: &str = "TUBEMIND_API_URL";
const TIMEOUT_VAR: &str = "TUBEMIND_REQUEST_TIMEOUT_SECS";

/// Where the backend lives and how long a request may take.
///
/// No timeout is set unless configured; the HTTP client's own failure
/// signalling is what ends a stuck request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?;
                if secs == 0 {
                    anyhow::bail!("{TIMEOUT_VAR} must be positive");
                }
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }
}
