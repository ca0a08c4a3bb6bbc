#![allow(dead_code)]

use candela_core::{Candle, CandleMap, Decimal, IntervalBucket, NaiveDateTime, TimeDelta};
use chrono::NaiveDate;

/// Midnight 2024-01-01, the anchor used across these tests.
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn at_hours(h: i64) -> NaiveDateTime {
    t0() + TimeDelta::hours(h)
}

pub fn real(ts: NaiveDateTime, px: i64) -> Candle {
    let p = Decimal::new(px, 2);
    Candle::new(ts, p, p, p, p)
}

pub fn synth(ts: NaiveDateTime, px: i64) -> Candle {
    real(ts, px).synthetic_at(ts)
}

pub fn bucket_of(candles: impl IntoIterator<Item = Candle>) -> IntervalBucket {
    let mut b = IntervalBucket::new();
    for c in candles {
        b.insert(c);
    }
    b
}

pub fn map_of(candles: impl IntoIterator<Item = Candle>) -> CandleMap {
    candles.into_iter().map(|c| (c.ts, c)).collect()
}
