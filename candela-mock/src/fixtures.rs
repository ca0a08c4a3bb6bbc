//! Deterministic candle generator.
//!
//! Bars sit on multiples of the interval duration counted from the Unix epoch,
//! and each bar's prices are a pure function of its position on that lattice.

use candela_core::{Candle, CandleMap, Decimal, NaiveDateTime, TimeDelta};
use chrono::{DateTime, Utc};

fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Latest lattice point at or before `t`.
pub(crate) fn floor_to_step(t: NaiveDateTime, step: TimeDelta) -> NaiveDateTime {
    let step_s = step.num_seconds().max(1);
    let offset = (t - epoch()).num_seconds();
    epoch() + TimeDelta::seconds(offset.div_euclid(step_s) * step_s)
}

/// Prices for the bar at `ts`; `close` drifts up by one cent per bar and wraps.
pub(crate) fn candle_at(ts: NaiveDateTime, step: TimeDelta) -> Candle {
    let idx = (ts - epoch()).num_seconds() / step.num_seconds().max(1);
    let cents = 10_000 + idx.rem_euclid(1_000);
    let open = Decimal::new(cents, 2);
    let close = Decimal::new(cents + 1, 2);
    let high = Decimal::new(cents + 5, 2);
    let low = Decimal::new(cents - 5, 2);
    Candle::new(ts, open, high, low, close)
}

/// Up to `limit` bars in `[start, end]`, newest first, skipping any `ts` for
/// which `skip` is true.
pub(crate) fn newest_first<F>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: TimeDelta,
    limit: usize,
    skip: F,
) -> CandleMap
where
    F: Fn(NaiveDateTime) -> bool,
{
    let mut out = CandleMap::new();
    if step <= TimeDelta::zero() || start > end {
        return out;
    }
    let mut t = floor_to_step(end, step);
    while t >= start && out.len() < limit {
        if !skip(t) {
            out.insert(t, candle_at(t, step));
        }
        t -= step;
    }
    out
}
