use std::sync::Arc;
use std::time::Duration;

use candela_core::{CandelaError, TwelveDataConfig};

use crate::TwelveDataConnector;
use crate::adapter::HttpTransport;

/// User agent sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!("candela/", env!("CARGO_PKG_VERSION"));

/// Builder for a [`TwelveDataConnector`] backed by the `reqwest` transport.
#[derive(Debug, Clone)]
pub struct TwelveDataConnectorBuilder {
    config: TwelveDataConfig,
    user_agent: String,
}

impl Default for TwelveDataConnectorBuilder {
    fn default() -> Self {
        Self::from_config(TwelveDataConfig::default())
    }
}

impl TwelveDataConnectorBuilder {
    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: TwelveDataConfig) -> Self {
        Self {
            config,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// API key sent with every request. Required.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Endpoint root; `/time_series` is appended.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Overall per-request timeout enforced by the HTTP client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// User agent header value.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the API key or base URL is blank, or
    /// `Transport` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<TwelveDataConnector, CandelaError> {
        if self.config.api_key.trim().is_empty() {
            return Err(CandelaError::InvalidArg("api key must not be empty".into()));
        }
        if self.config.base_url.trim().is_empty() {
            return Err(CandelaError::InvalidArg("base url must not be empty".into()));
        }
        let transport = HttpTransport::new(
            &self.config.base_url,
            self.config.timeout,
            &self.user_agent,
        )?;
        Ok(TwelveDataConnector::from_transport(
            Arc::new(transport),
            self.config.api_key,
        ))
    }
}

impl TwelveDataConnector {
    /// Returns a builder with the default endpoint and timeout.
    ///
    /// Set at least the API key before calling `.build()`.
    #[must_use]
    pub fn builder() -> TwelveDataConnectorBuilder {
        TwelveDataConnectorBuilder::default()
    }

    /// Build a connector from `TWELVEDATA_API_KEY` and, when set,
    /// `TWELVEDATA_BASE_URL`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the API key variable is unset or empty, or
    /// `Transport` if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, CandelaError> {
        let config = TwelveDataConfig::from_env().ok_or_else(|| {
            CandelaError::InvalidArg(format!("{} is not set", TwelveDataConfig::API_KEY_ENV))
        })?;
        TwelveDataConnectorBuilder::from_config(config).build()
    }
}
