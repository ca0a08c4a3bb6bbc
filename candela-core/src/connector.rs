use async_trait::async_trait;

use crate::{CacheDocument, CandelaError, CandleMap, ConnectorKey, QueryDescriptor};

/// Remote source of candle pages.
///
/// One call is one network request for `[query.start(), query.end()]`, capped
/// at `query.page_size()` candles. Providers that page newest-first return the
/// newest candles of the range; the synchronizer walks backward from there.
#[async_trait]
pub trait PageProvider: Send + Sync {
    /// Typed key used in logs and observer events.
    fn key(&self) -> ConnectorKey;

    /// Fetch one page of observed candles.
    ///
    /// An empty map is a valid answer meaning the provider has no data for the
    /// range. Every returned candle is non-synthetic.
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError>;
}

/// Durable key to document persistence, keyed by symbol.
///
/// Implementations must accept arbitrary keys and return, after `save`, a
/// document with the same contents from `get`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Load the document stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<CacheDocument>, CandelaError>;

    /// Persist `doc` under `key`, replacing any previous document.
    async fn save(&self, key: &str, doc: &CacheDocument) -> Result<(), CandelaError>;
}
