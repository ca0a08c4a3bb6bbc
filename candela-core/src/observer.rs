use chrono::NaiveDateTime;

use crate::{ConnectorKey, Interval};

/// Progress event emitted while synchronizing one symbol/interval.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncEvent<'a> {
    /// A contiguous span of the grid is absent from the cache.
    MissingRange {
        /// Symbol being synchronized.
        symbol: &'a str,
        /// Interval being synchronized.
        interval: Interval,
        /// First missing timestamp.
        start: NaiveDateTime,
        /// Last missing timestamp.
        end: NaiveDateTime,
    },
    /// One provider page came back.
    PageFetched {
        /// Provider that served the page.
        provider: ConnectorKey,
        /// Symbol being synchronized.
        symbol: &'a str,
        /// Requested range start.
        start: NaiveDateTime,
        /// Requested range end.
        end: NaiveDateTime,
        /// Number of candles in the page.
        received: usize,
    },
    /// Synthetic candles were written into the bucket.
    GapsFilled {
        /// Symbol being synchronized.
        symbol: &'a str,
        /// Interval being synchronized.
        interval: Interval,
        /// Number of synthetic candles added.
        filled: usize,
    },
    /// The cache document was saved.
    Persisted {
        /// Store key (the symbol).
        symbol: &'a str,
    },
}

/// Injected sink for synchronization progress.
///
/// Implementations must be cheap and must not block; they run inline on the
/// synchronizing task.
pub trait SyncObserver: Send + Sync {
    /// Receive one event.
    fn on_event(&self, event: &SyncEvent<'_>);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_event(&self, _event: &SyncEvent<'_>) {}
}

/// Observer that forwards every event to `tracing` at debug level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent<'_>) {
        use crate::timestamp::format_key;
        match event {
            SyncEvent::MissingRange {
                symbol,
                interval,
                start,
                end,
            } => tracing::debug!(
                symbol = %symbol,
                interval = %interval,
                start = %format_key(*start),
                end = %format_key(*end),
                "missing range"
            ),
            SyncEvent::PageFetched {
                provider,
                symbol,
                start,
                end,
                received,
            } => tracing::debug!(
                provider = %provider,
                symbol = %symbol,
                start = %format_key(*start),
                end = %format_key(*end),
                received,
                "page fetched"
            ),
            SyncEvent::GapsFilled {
                symbol,
                interval,
                filled,
            } => tracing::debug!(symbol = %symbol, interval = %interval, filled, "gaps filled"),
            SyncEvent::Persisted { symbol } => tracing::debug!(symbol = %symbol, "persisted"),
        }
    }
}
