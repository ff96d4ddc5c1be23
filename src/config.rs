use anyhow::{Context, Result, bail};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.solcast.com.au";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable read by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "SOLCAST_API_KEY";

/// Everything a [`crate::Client`] needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL, normally [`DEFAULT_BASE_URL`].
    pub url: String,
    /// API key, sent as the basic-auth username with an empty password.
    pub key: String,
    /// Timeout applied to calls that do not pass their own.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default settings for the given API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            key: key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Default settings with the key taken from `SOLCAST_API_KEY`.
    pub fn from_env() -> crate::Result<Self> {
        let key = api_key_from(|name| std::env::var(name).ok())?;
        Ok(Self::new(key))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn api_key_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let key = lookup(API_KEY_ENV)
        .with_context(|| format!("Missing configuration: set {} to your Solcast API key", API_KEY_ENV))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("Missing configuration: {} is empty", API_KEY_ENV);
    }
    Ok(key.to_string())
}
