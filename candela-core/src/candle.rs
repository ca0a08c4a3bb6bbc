use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered mapping from timestamp to candle, as returned by every sync operation.
pub type CandleMap = BTreeMap<NaiveDateTime, Candle>;

/// One OHLC price record for a fixed time bucket.
///
/// `synthetic` marks a placeholder manufactured by the gap filler; its prices
/// are copied from the nearest known candle. Candles parsed from a provider
/// payload are never synthetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, second precision.
    #[serde(rename = "datetime", with = "crate::timestamp::serde_key")]
    pub ts: NaiveDateTime,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// True when forward/backward filled rather than observed.
    #[serde(default)]
    pub synthetic: bool,
}

impl Candle {
    /// Build an observed (non-synthetic) candle.
    #[must_use]
    pub fn new(
        ts: NaiveDateTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            ts: crate::timestamp::truncate_subsec(ts),
            open,
            high,
            low,
            close,
            synthetic: false,
        }
    }

    /// Copy of this candle's prices placed at `ts` and flagged synthetic.
    #[must_use]
    pub fn synthetic_at(&self, ts: NaiveDateTime) -> Self {
        Self {
            ts: crate::timestamp::truncate_subsec(ts),
            synthetic: true,
            ..self.clone()
        }
    }

    /// True when the candle was observed at the provider.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        !self.synthetic
    }
}
