//! Credentials and endpoint configuration for the Prolific API

use reqwest::Url;

use crate::error::{ProlificError, Result};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "PROLIFIC_TOKEN";

/// Environment variable overriding the API base URL
pub const URL_ENV: &str = "PROLIFIC_URL";

/// Production endpoint used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.prolific.co";

/// Prolific credentials, validated once at startup
#[derive(Clone)]
pub struct ProlificConfig {
    token: String,
    base_url: Url,
}

impl ProlificConfig {
    /// Build a config from an explicit token and optional base URL.
    ///
    /// Fails when the token is empty or the URL is not an absolute http(s) URL.
    pub fn new(token: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ProlificError::Config(format!(
                "{} environment variable is required",
                TOKEN_ENV
            )));
        }

        let raw = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw)
            .map_err(|e| ProlificError::Config(format!("invalid {} '{}': {}", URL_ENV, raw, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ProlificError::Config(format!(
                "invalid {} '{}': expected an http(s) URL",
                URL_ENV, raw
            )));
        }

        Ok(Self { token, base_url })
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).unwrap_or_default();
        let base_url = std::env::var(URL_ENV).ok();
        Self::new(token, base_url.as_deref())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl std::fmt::Debug for ProlificConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProlificConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
