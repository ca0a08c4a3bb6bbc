//! Configuration types shared across the synchronizer and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Wire format requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseFormat {
    /// Structured JSON object with a `values` array.
    #[default]
    Json,
    /// Tabular CSV with a header row.
    Csv,
}

impl ResponseFormat {
    /// Value sent in the `format` query parameter.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

/// Defaults applied when building query descriptors through the synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum number of candles requested per page (`outputsize`).
    pub page_size: u32,
    /// Wire format requested from the provider.
    pub format: ResponseFormat,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: 5_000,
            format: ResponseFormat::Json,
        }
    }
}

/// Connection settings for the Twelve Data time-series endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct TwelveDataConfig {
    /// Base URL; the connector appends `/time_series`.
    pub base_url: String,
    /// API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Overall timeout applied by the HTTP client to each request.
    pub timeout: Duration,
}

impl TwelveDataConfig {
    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "TWELVEDATA_API_KEY";
    /// Environment variable overriding the base URL.
    pub const BASE_URL_ENV: &'static str = "TWELVEDATA_BASE_URL";
    /// Production endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twelvedata.com";

    /// Build a config from the process environment.
    ///
    /// Returns `None` when the API key variable is unset or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let mut cfg = Self {
            api_key,
            ..Self::default()
        };
        if let Ok(url) = std::env::var(Self::BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            cfg.base_url = url;
        }
        Some(cfg)
    }
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

// The API key never reaches logs.
impl std::fmt::Debug for TwelveDataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwelveDataConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
