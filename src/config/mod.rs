//! Configuration module for the MultiViz client.
//!
//! Holds the base URL and API key the client is constructed with, plus the
//! few transport knobs that can be tuned.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::auth::key_hint;
use crate::errors::{MultivizError, MultivizResult};

/// Environment variable holding the base URL.
pub const ENV_BASE_URL: &str = "MULTIVIZ_BASE_URL";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "MULTIVIZ_API_KEY";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "MULTIVIZ_TIMEOUT";

/// Configuration for the MultiViz client.
#[derive(Clone)]
pub struct MultivizConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl MultivizConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> MultivizConfigBuilder {
        MultivizConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MULTIVIZ_BASE_URL` (required): Base URL of the MultiViz API
    /// - `MULTIVIZ_API_KEY` (required): API key for authentication
    /// - `MULTIVIZ_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> MultivizResult<Self> {
        let base_url = std::env::var(ENV_BASE_URL).map_err(|_| {
            MultivizError::configuration(format!("{} environment variable not set", ENV_BASE_URL))
        })?;

        let mut builder = MultivizConfigBuilder::new()
            .base_url(base_url)
            .api_key_from_env(ENV_API_KEY)?;

        if let Ok(timeout_str) = std::env::var(ENV_TIMEOUT) {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            } else {
                tracing::warn!(value = %timeout_str, "Ignoring unparsable {}", ENV_TIMEOUT);
            }
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for MultivizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultivizConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `MultivizConfig`.
#[derive(Default)]
pub struct MultivizConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl MultivizConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> MultivizResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| {
            MultivizError::configuration(format!("Environment variable {} not set", var_name))
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> MultivizResult<MultivizConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| MultivizError::configuration("API key is required"))?;

        if api_key.is_empty() {
            return Err(MultivizError::configuration("API key cannot be empty"));
        }

        let base_url = self
            .base_url
            .ok_or_else(|| MultivizError::configuration("Base URL is required"))?
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MultivizError::configuration(format!(
                "Unsupported URL scheme '{}', expected http or https",
                parsed.scheme()
            )));
        }

        if parsed.scheme() == "http" {
            tracing::debug!(base_url = %base_url, "Using plain HTTP for MultiViz API");
        }

        Ok(MultivizConfig {
            api_key: SecretString::new(api_key),
            base_url,
            timeout: self.timeout,
            custom_headers: self.custom_headers,
        })
    }
}
