use candela_core::timestamp::truncate_subsec;
use candela_core::{
    CacheDocument, CandelaError, CandleMap, Grid, NaiveDateTime, QueryDescriptor, SyncEvent,
    detect_gaps, fill_gaps,
};
use tokio_util::sync::CancellationToken;

use crate::Synchronizer;

/// How a single synchronization pass treats the cached bucket before diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refresh {
    /// Diff the bucket as cached.
    AsCached,
    /// Widen the range back to the oldest observed cached candle and forward
    /// to `now`, after dropping synthetic candles newer than the newest
    /// observed one so those slots are fetched again.
    Extend {
        /// Upper bound of the widened range.
        now: NaiveDateTime,
    },
}

/// Outcome of one locked pass.
pub(crate) struct Pass {
    /// Range actually synchronized; wider than requested under `Extend`.
    pub(crate) query: QueryDescriptor,
    /// Bucket contents within `query`.
    pub(crate) candles: CandleMap,
}

impl Synchronizer {
    /// Return the candles of `query`'s range, fetching only what the cache
    /// is missing.
    ///
    /// Missing grid spans are walked against the provider, merged into the
    /// cached bucket, and any slot still empty is filled with a synthetic
    /// copy of its nearest known neighbor. The document is saved only when
    /// something was fetched or filled, so repeating a call is free.
    ///
    /// # Errors
    /// Propagates provider and store failures; nothing is saved in that case.
    pub async fn get_series(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError> {
        self.get_series_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// [`get_series`](Self::get_series) that stops at the next suspension
    /// point once `cancel` fires.
    ///
    /// # Errors
    /// As `get_series`, plus `Cancelled`; a cancelled call saves nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "candela::sync",
            skip(self, query, cancel),
            fields(
                symbol = %query.symbol(),
                interval = %query.interval(),
                start = %query.start_key(),
                end = %query.end_key(),
            ),
            err,
        )
    )]
    pub async fn get_series_with_cancel(
        &self,
        query: &QueryDescriptor,
        cancel: &CancellationToken,
    ) -> Result<CandleMap, CandelaError> {
        let pass = self.sync_pass(query, Refresh::AsCached, cancel).await?;
        Ok(pass.candles)
    }

    pub(crate) async fn sync_pass(
        &self,
        query: &QueryDescriptor,
        refresh: Refresh,
        cancel: &CancellationToken,
    ) -> Result<Pass, CandelaError> {
        let symbol = query.symbol();
        let interval = query.interval();

        let lock = self.symbol_lock(symbol).await;
        let acquire = async { Ok::<_, CandelaError>(lock.lock().await) };
        let _guard = Self::until_cancelled(cancel, acquire).await?;

        let mut doc = Self::until_cancelled(cancel, self.store.get(symbol))
            .await?
            .unwrap_or_else(|| CacheDocument::new(symbol));
        let bucket = doc.bucket_mut(interval);
        let mut dirty = false;

        let query = match refresh {
            Refresh::AsCached => query.clone(),
            Refresh::Extend { now } => {
                dirty |= bucket.drop_synthetic_tail() > 0;
                let start = bucket
                    .first_real()
                    .map_or(query.start(), |c| c.ts.min(query.start()));
                let end = truncate_subsec(now).max(query.end());
                query.narrowed(start, end)?
            }
        };

        let grid = Grid::for_query(&query);
        for (start, end) in detect_gaps(grid.clone(), bucket) {
            self.emit(&SyncEvent::MissingRange {
                symbol,
                interval,
                start,
                end,
            });
            let walked = self.walk_range(&query, start, end, cancel).await?;
            bucket.merge(walked.candles);
            dirty = true;
        }

        let filled = fill_gaps(grid, bucket);
        if filled > 0 {
            self.emit(&SyncEvent::GapsFilled {
                symbol,
                interval,
                filled,
            });
            dirty = true;
        }

        let out = bucket.slice(query.start()..=query.end());

        if dirty {
            // The save itself is not raced: once started it runs to completion.
            if cancel.is_cancelled() {
                return Err(CandelaError::Cancelled);
            }
            self.store.save(symbol, &doc).await?;
            self.emit(&SyncEvent::Persisted { symbol });
        }
        Ok(Pass {
            query,
            candles: out,
        })
    }
}
