use chrono::NaiveDateTime;

use crate::CandleMap;

/// Fold `page` into `acc`; on duplicate timestamps the page wins.
///
/// Returns how many timestamps were new to `acc`.
pub fn merge_page(acc: &mut CandleMap, page: CandleMap) -> usize {
    let mut added = 0usize;
    for (ts, candle) in page {
        if acc.insert(ts, candle).is_none() {
            added += 1;
        }
    }
    added
}

/// Oldest timestamp of a series, if any.
#[must_use]
pub fn oldest_timestamp(series: &CandleMap) -> Option<NaiveDateTime> {
    series.keys().next().copied()
}
