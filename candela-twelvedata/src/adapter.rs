#[cfg(feature = "test-adapters")]
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use candela_core::CandelaError;

/// Body and status of one time-series response, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport abstraction (so we can inject canned bodies in tests).
///
/// `params` are the query parameters of the `/time_series` request, in the
/// order they are sent.
#[async_trait]
pub trait TimeSeriesTransport: Send + Sync {
    /// Issue one request and return the raw response.
    async fn get(&self, params: &[(&'static str, String)]) -> Result<RawResponse, CandelaError>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a client with the given timeout and user agent, targeting
    /// `{base_url}/time_series`.
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, CandelaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| CandelaError::transport(None, e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/time_series", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn from_reqwest(e: &reqwest::Error) -> CandelaError {
    CandelaError::transport(e.status().map(|s| s.as_u16()), e.to_string())
}

#[async_trait]
impl TimeSeriesTransport for HttpTransport {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<RawResponse, CandelaError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| from_reqwest(&e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| from_reqwest(&e))?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(feature = "test-adapters")]
impl dyn TimeSeriesTransport {
    /// Build a `TimeSeriesTransport` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn TimeSeriesTransport>
    where
        F: Send
            + Sync
            + 'static
            + Fn(Vec<(&'static str, String)>) -> Result<RawResponse, CandelaError>,
    {
        struct FnTransport<F>(F);

        #[async_trait]
        impl<F> TimeSeriesTransport for FnTransport<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(Vec<(&'static str, String)>) -> Result<RawResponse, CandelaError>,
        {
            async fn get(
                &self,
                params: &[(&'static str, String)],
            ) -> Result<RawResponse, CandelaError> {
                (self.0)(params.to_vec())
            }
        }

        Arc::new(FnTransport(f))
    }
}
