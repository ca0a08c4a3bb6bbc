//! candela-twelvedata
//!
//! Page provider that implements `PageProvider` on top of the Twelve Data
//! `/time_series` endpoint. One call is one GET; the payload is requested as
//! JSON or CSV and decoded by the pure functions in [`parse`].
#![warn(missing_docs)]

/// Transport definitions and the production transport backed by `reqwest`.
pub mod adapter;
mod builder;
/// Decoders for JSON and CSV time-series payloads.
pub mod parse;

use std::sync::Arc;

use adapter::TimeSeriesTransport;
use async_trait::async_trait;
use candela_core::{CandelaError, CandleMap, ConnectorKey, PageProvider, QueryDescriptor};

pub use builder::TwelveDataConnectorBuilder;

/// Longest slice of an error body carried into a `Transport` error.
const MAX_ERROR_BODY: usize = 512;

/// Public connector type. Production users construct it with
/// `TwelveDataConnector::builder()` or `TwelveDataConnector::from_env()`.
#[derive(Clone)]
pub struct TwelveDataConnector {
    transport: Arc<dyn TimeSeriesTransport>,
    api_key: String,
}

impl std::fmt::Debug for TwelveDataConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwelveDataConnector")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TwelveDataConnector {
    /// Static connector key used in logs and observer events.
    pub const KEY: ConnectorKey = ConnectorKey::new("candela-twelvedata");

    /// Build from an explicit transport, e.g. one returning canned bodies.
    pub fn from_transport(
        transport: Arc<dyn TimeSeriesTransport>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
        }
    }

    /// Query parameters for one page request, in wire order.
    #[must_use]
    pub fn request_params(&self, query: &QueryDescriptor) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.clone()),
            ("interval", query.interval().as_str().to_string()),
            ("symbol", query.symbol().to_string()),
            ("start_date", query.start_key()),
            ("end_date", query.end_key()),
            ("format", query.format().as_query_value().to_string()),
            ("outputsize", query.page_size().to_string()),
        ]
    }
}

fn error_excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[async_trait]
impl PageProvider for TwelveDataConnector {
    fn key(&self) -> ConnectorKey {
        Self::KEY
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela_twelvedata::fetch_page",
            skip(self, query),
            fields(
                symbol = %query.symbol(),
                interval = %query.interval(),
                start = %query.start_key(),
                end = %query.end_key(),
            ),
        )
    )]
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError> {
        let params = self.request_params(query);
        let raw = self.transport.get(&params).await?;
        if !raw.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = raw.status, "time series request failed");
            return Err(CandelaError::transport(
                Some(raw.status),
                error_excerpt(&raw.body),
            ));
        }
        let page = parse::parse_body(query.format(), &raw.body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(received = page.len(), "time series page decoded");
        Ok(page)
    }
}
