use candela_core::timestamp::tick;
use candela_core::{
    CandelaError, CandleMap, NaiveDateTime, QueryDescriptor, merge_page, oldest_timestamp,
};
use tokio_util::sync::CancellationToken;

use crate::Synchronizer;
use crate::series::Refresh;

impl Synchronizer {
    /// Candles immediately older than `batch`, within `query`'s range.
    ///
    /// Synchronizes `[query.start(), oldest(batch) - 1s]`. Returns an empty
    /// map when `batch` is empty or already reaches `query.start()`.
    ///
    /// # Errors
    /// As [`get_series`](Self::get_series).
    pub async fn get_next_series(
        &self,
        query: &QueryDescriptor,
        batch: &CandleMap,
    ) -> Result<CandleMap, CandelaError> {
        self.get_next_series_with_cancel(query, batch, &CancellationToken::new())
            .await
    }

    /// [`get_next_series`](Self::get_next_series) with cooperative
    /// cancellation.
    ///
    /// # Errors
    /// As `get_next_series`, plus `Cancelled`.
    pub async fn get_next_series_with_cancel(
        &self,
        query: &QueryDescriptor,
        batch: &CandleMap,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        match oldest_timestamp(batch) {
            Some(oldest) => self.pass_before(query, oldest, cancel).await,
            None => Ok(CandleMap::new()),
        }
    }

    /// Every candle of `query`'s range: one `get_series` followed by
    /// `get_next_series` until a batch comes back empty or stops moving
    /// backward.
    ///
    /// # Errors
    /// As [`get_series`](Self::get_series).
    pub async fn get_all_series(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError> {
        self.get_all_series_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// [`get_all_series`](Self::get_all_series) with cooperative cancellation.
    ///
    /// # Errors
    /// As `get_all_series`, plus `Cancelled`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "candela::sync",
            skip(self, query, cancel),
            fields(symbol = %query.symbol(), interval = %query.interval()),
            err,
        )
    )]
    pub async fn get_all_series_with_cancel(
        &self,
        query: &QueryDescriptor,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        self.traverse(query, Refresh::AsCached, cancel).await
    }

    /// [`get_all_series`](Self::get_all_series) over a widened range.
    ///
    /// The range is extended forward to `now` and backward to the oldest
    /// observed candle already cached for the symbol and interval. Synthetic
    /// candles newer than the newest observed one are discarded first, so
    /// slots filled while the market had not yet printed them are fetched
    /// again.
    ///
    /// # Errors
    /// As [`get_series`](Self::get_series).
    pub async fn get_all_series_extended(
        &self,
        query: &QueryDescriptor,
        now: NaiveDateTime,
    ) -> Result<CandleMap, CandelaError> {
        self.get_all_series_extended_with_cancel(query, now, &CancellationToken::new())
            .await
    }

    /// [`get_all_series_extended`](Self::get_all_series_extended) with
    /// cooperative cancellation.
    ///
    /// # Errors
    /// As `get_all_series_extended`, plus `Cancelled`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "candela::sync",
            skip(self, query, cancel),
            fields(symbol = %query.symbol(), interval = %query.interval()),
            err,
        )
    )]
    pub async fn get_all_series_extended_with_cancel(
        &self,
        query: &QueryDescriptor,
        now: NaiveDateTime,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        self.traverse(query, Refresh::Extend { now }, cancel).await
    }

    async fn traverse(
        &self,
        query: &QueryDescriptor,
        refresh: Refresh,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        let first = self.sync_pass(query, refresh, cancel).await?;
        let query = first.query;
        let mut acc = first.candles;
        let mut oldest = oldest_timestamp(&acc);
        while let Some(batch_oldest) = oldest {
            let next = self.pass_before(&query, batch_oldest, cancel).await?;
            let Some(next_oldest) = oldest_timestamp(&next) else {
                break;
            };
            if next_oldest >= batch_oldest {
                break;
            }
            merge_page(&mut acc, next);
            oldest = Some(next_oldest);
        }
        Ok(acc)
    }

    /// Synchronize the part of `query`'s range strictly older than `oldest`.
    async fn pass_before(
        &self,
        query: &QueryDescriptor,
        oldest: NaiveDateTime,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        if oldest <= query.start() {
            return Ok(CandleMap::new());
        }
        let older = query.narrowed(query.start(), oldest - tick())?;
        let pass = self.sync_pass(&older, Refresh::AsCached, cancel).await?;
        Ok(pass.candles)
    }
}
