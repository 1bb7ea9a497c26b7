//! MultiViz API client.
//!
//! Provides the main client interface for interacting with the MultiViz API.

pub(crate) mod dispatcher;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{MultivizConfig, MultivizConfigBuilder};
use crate::errors::{MultivizError, MultivizResult};
use crate::observability::{Logger, TracingLogger};
use crate::services::{MeasurementsService, SourcesService};
use crate::transport::{HttpTransport, HttpTransportImpl};

use self::dispatcher::Dispatcher;

/// The MultiViz client.
///
/// Every call issues exactly one HTTP request (two for a create-source
/// conflict that is resolved by fetching the existing source) and awaits it.
/// The client holds no mutable state after construction, so a shared
/// reference can be used from several tasks at once; connection handling is
/// left to the transport.
///
/// # Example
///
/// ```rust,no_run
/// use multiviz_client::{CreateOptions, MultivizClient, WaveformSourceMeta, CreateSourceRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MultivizClient::builder()
///         .base_url("https://multiviz.example.com/api")
///         .api_key("mv_your_api_key")
///         .build()?;
///
///     let source = CreateSourceRequest::new(
///         "pump-1-de",
///         WaveformSourceMeta::new("Plant A", "Pump 1", "DE bearing", "Acceleration"),
///     );
///     let created = client
///         .sources()
///         .create(&source, CreateOptions::ignore_existing())
///         .await?;
///     println!("{}", created["source_id"]);
///     Ok(())
/// }
/// ```
pub struct MultivizClient {
    config: MultivizConfig,
    sources_service: SourcesService,
    measurements_service: MeasurementsService,
}

impl MultivizClient {
    /// Creates a new client builder.
    pub fn builder() -> MultivizClientBuilder {
        MultivizClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `MULTIVIZ_BASE_URL`, `MULTIVIZ_API_KEY` and optionally
    /// `MULTIVIZ_TIMEOUT`.
    pub fn from_env() -> MultivizResult<Self> {
        let config = MultivizConfig::from_env()?;
        MultivizClientBuilder::from_config(config).build()
    }

    /// Creates a client from a base URL and an API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> MultivizResult<Self> {
        MultivizClientBuilder::new()
            .base_url(base_url)
            .api_key(api_key)
            .build()
    }

    /// Returns the sources service.
    pub fn sources(&self) -> &SourcesService {
        &self.sources_service
    }

    /// Returns the measurements service.
    pub fn measurements(&self) -> &MeasurementsService {
        &self.measurements_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MultivizConfig {
        &self.config
    }
}

impl std::fmt::Debug for MultivizClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultivizClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the MultiViz client.
pub struct MultivizClientBuilder {
    config_builder: MultivizConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    logger: Option<Arc<dyn Logger>>,
}

impl MultivizClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: MultivizConfigBuilder::new(),
            transport: None,
            auth: None,
            logger: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: MultivizConfig) -> Self {
        let mut config_builder = MultivizConfigBuilder::new()
            .api_key(config.api_key())
            .base_url(&config.base_url);
        if let Some(timeout) = config.timeout {
            config_builder = config_builder.timeout(timeout);
        }
        for (name, value) in config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            ..Self::new()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> MultivizResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the sink for warning and error log lines.
    ///
    /// Defaults to [`TracingLogger`].
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    pub fn build(self) -> MultivizResult<MultivizClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout)
                    .map_err(|e| MultivizError::configuration(e.to_string()))?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let logger: Arc<dyn Logger> = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));

        let dispatcher = Arc::new(Dispatcher::new(
            transport,
            auth,
            logger,
            config.custom_headers.clone(),
        ));

        Ok(MultivizClient {
            sources_service: SourcesService::new(Arc::clone(&dispatcher)),
            measurements_service: MeasurementsService::new(dispatcher),
            config,
        })
    }
}

impl Default for MultivizClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key_and_base_url() {
        assert!(MultivizClientBuilder::new().build().is_err());
        assert!(MultivizClientBuilder::new()
            .api_key("mv_test_key")
            .build()
            .is_err());
        assert!(MultivizClientBuilder::new()
            .base_url("https://multiviz.example.com")
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_with_defaults() {
        let client = MultivizClient::new("https://multiviz.example.com/api/", "mv_test_key_12345")
            .unwrap();

        assert_eq!(client.config().base_url, "https://multiviz.example.com/api");
        assert_eq!(client.config().timeout, None);

        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("mv_test_key_12345"));
    }

    #[test]
    fn test_from_config_keeps_settings() {
        let config = MultivizConfig::builder()
            .api_key("mv_test_key")
            .base_url("http://localhost:8000")
            .timeout_secs(5)
            .header("X-Request-Source", "tests")
            .build()
            .unwrap();

        let client = MultivizClientBuilder::from_config(config).build().unwrap();

        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.config().custom_headers.len(), 1);
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MultivizClient>();
    }
}
