//! Helpers for consumers that only want observed candles at the edges.
//!
//! Interior synthetic candles are kept in every case: they hold the series on
//! its regular grid.

use crate::CandleMap;

/// Remove the synthetic prefix.
#[must_use]
pub fn drop_leading_synthetic(series: &CandleMap) -> CandleMap {
    series
        .iter()
        .skip_while(|(_, c)| c.synthetic)
        .map(|(ts, c)| (*ts, c.clone()))
        .collect()
}

/// Remove the synthetic suffix.
#[must_use]
pub fn drop_trailing_synthetic(series: &CandleMap) -> CandleMap {
    let last_real = series.iter().rev().find(|(_, c)| c.is_real());
    let Some((&last_real, _)) = last_real else {
        return CandleMap::new();
    };
    series
        .range(..=last_real)
        .map(|(ts, c)| (*ts, c.clone()))
        .collect()
}

/// Remove both the synthetic prefix and the synthetic suffix.
#[must_use]
pub fn drop_synthetic_edges(series: &CandleMap) -> CandleMap {
    drop_trailing_synthetic(&drop_leading_synthetic(series))
}
