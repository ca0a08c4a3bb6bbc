use candela_core::timestamp::tick;
use candela_core::{
    CandelaError, CandleMap, NaiveDateTime, QueryDescriptor, SyncEvent, merge_page,
    oldest_timestamp,
};
use tokio_util::sync::CancellationToken;

use crate::Synchronizer;

/// Result of walking one missing range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Every candle received, last write wins on repeated timestamps.
    pub candles: CandleMap,
    /// Number of provider requests issued.
    pub pages: usize,
}

impl Synchronizer {
    /// Fetch `[range_start, range_end]` backward, one page at a time.
    ///
    /// Each request ends one tick before the oldest candle of the previous
    /// page. The walk stops when a page is empty, when it reaches
    /// `range_start`, or when its oldest candle is not older than the previous
    /// page's, which guards against providers that ignore the requested range.
    ///
    /// # Errors
    /// Propagates the first provider failure, or `Cancelled`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::walker::walk_range",
            skip(self, query, cancel),
            fields(symbol = %query.symbol(), interval = %query.interval()),
            err,
        )
    )]
    pub async fn walk_range(
        &self,
        query: &QueryDescriptor,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
        cancel: &CancellationToken,
    ) -> Result<WalkOutcome, CandelaError> {
        let mut out = WalkOutcome::default();
        let mut current_end = range_end;
        let mut previous_oldest: Option<NaiveDateTime> = None;

        loop {
            let page_query = query.narrowed(range_start, current_end)?;
            let page =
                Self::until_cancelled(cancel, self.provider.fetch_page(&page_query)).await?;
            out.pages += 1;
            self.emit(&SyncEvent::PageFetched {
                provider: self.provider.key(),
                symbol: query.symbol(),
                start: page_query.start(),
                end: page_query.end(),
                received: page.len(),
            });

            let Some(oldest) = oldest_timestamp(&page) else {
                break;
            };
            merge_page(&mut out.candles, page);

            if oldest <= range_start {
                break;
            }
            if previous_oldest.is_some_and(|prev| oldest >= prev) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol = %query.symbol(),
                    "provider made no backward progress; stopping walk"
                );
                break;
            }
            previous_oldest = Some(oldest);
            current_end = oldest - tick();
        }
        Ok(out)
    }
}
