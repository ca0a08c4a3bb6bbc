//! candela-mock
//!
//! CI-safe page providers with deterministic data.
//!
//! - [`MockProvider`]: answers every range from a generated lattice of bars,
//!   newest first and capped at the page size, like the real endpoint.
//! - [`DynamicMockProvider`]: per-symbol behaviors driven by a controller,
//!   for failure, stall, and misbehaving-provider scenarios.
#![warn(missing_docs)]

mod dynamic;
mod fixtures;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use candela_core::{
    CandelaError, CandleMap, ConnectorKey, NaiveDateTime, PageProvider, QueryDescriptor,
};
use tokio::sync::Mutex;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Symbol that always fails with a transport error.
pub const FAIL_SYMBOL: &str = "FAIL";
/// Symbol that never has data.
pub const EMPTY_SYMBOL: &str = "EMPTY";

/// Mock provider serving deterministic bars for any symbol.
///
/// Bars exist on the interval lattice from `listed_since` (unbounded by
/// default) onward, except at configured holes.
#[derive(Debug, Default)]
pub struct MockProvider {
    listed_since: Option<NaiveDateTime>,
    holes: BTreeSet<NaiveDateTime>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(NaiveDateTime, NaiveDateTime)>>,
}

impl MockProvider {
    /// Provider key.
    pub const KEY: ConnectorKey = ConnectorKey::new("candela-mock");

    /// Provider with no holes and no listing date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No bars exist before `t`.
    #[must_use]
    pub const fn listed_since(mut self, t: NaiveDateTime) -> Self {
        self.listed_since = Some(t);
        self
    }

    /// Bars at these timestamps are never returned.
    #[must_use]
    pub fn with_holes(mut self, holes: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.holes.extend(holes);
        self
    }

    /// Number of `fetch_page` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requested `(start, end)` ranges in call order.
    pub async fn requests(&self) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PageProvider for MockProvider {
    fn key(&self) -> ConnectorKey {
        Self::KEY
    }

    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .await
            .push((query.start(), query.end()));

        match query.symbol() {
            FAIL_SYMBOL => {
                return Err(CandelaError::transport(
                    Some(500),
                    "forced failure: fetch_page",
                ));
            }
            EMPTY_SYMBOL => return Ok(CandleMap::new()),
            _ => {}
        }

        let start = self
            .listed_since
            .map_or(query.start(), |since| since.max(query.start()));
        let limit = usize::try_from(query.page_size()).unwrap_or(usize::MAX);
        Ok(fixtures::newest_first(
            start,
            query.end(),
            query.interval().duration(),
            limit,
            |t| self.holes.contains(&t),
        ))
    }
}
