use std::collections::BTreeMap;
use std::ops::RangeBounds;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Interval;
use crate::candle::{Candle, CandleMap};
use crate::timestamp::{format_key, parse_key, truncate_subsec};

/// Ordered store of candles for one (symbol, interval) pair.
///
/// Keys are second-precision timestamps; on the wire each key is its canonical
/// `yyyy-MM-dd HH:mm:ss` string. A candle is always stored under its own `ts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalBucket {
    candles: CandleMap,
}

impl IntervalBucket {
    /// Create an empty bucket.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            candles: BTreeMap::new(),
        }
    }

    /// Number of stored candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// True when a candle exists at `ts`.
    #[must_use]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.candles.contains_key(&ts)
    }

    /// Candle stored at `ts`, if any.
    #[must_use]
    pub fn get(&self, ts: NaiveDateTime) -> Option<&Candle> {
        self.candles.get(&ts)
    }

    /// Insert a candle under its own timestamp, replacing any previous entry.
    pub fn insert(&mut self, mut candle: Candle) -> Option<Candle> {
        candle.ts = truncate_subsec(candle.ts);
        self.candles.insert(candle.ts, candle)
    }

    /// Remove the candle stored at `ts`.
    pub fn remove(&mut self, ts: NaiveDateTime) -> Option<Candle> {
        self.candles.remove(&ts)
    }

    /// Merge a fetched page into the bucket; later writes win.
    ///
    /// Returns the number of timestamps that were not present before.
    pub fn merge(&mut self, page: CandleMap) -> usize {
        let mut added = 0;
        for candle in page.into_values() {
            if self.insert(candle).is_none() {
                added += 1;
            }
        }
        added
    }

    /// Iterate candles in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Candle> {
        self.candles.values()
    }

    /// Copy the candles whose timestamps fall in `range`.
    #[must_use]
    pub fn slice<R: RangeBounds<NaiveDateTime>>(&self, range: R) -> CandleMap {
        self.candles
            .range(range)
            .map(|(k, v)| (*k, v.clone()))
            .collect()
    }

    /// Oldest non-synthetic candle.
    #[must_use]
    pub fn first_real(&self) -> Option<&Candle> {
        self.iter().find(|c| c.is_real())
    }

    /// Newest non-synthetic candle.
    #[must_use]
    pub fn last_real(&self) -> Option<&Candle> {
        self.iter().rev().find(|c| c.is_real())
    }

    /// Remove synthetic candles newer than the newest real candle.
    ///
    /// Returns how many were dropped.
    pub fn drop_synthetic_tail(&mut self) -> usize {
        let stale: Vec<NaiveDateTime> = self
            .candles
            .iter()
            .rev()
            .take_while(|(_, c)| c.synthetic)
            .map(|(ts, _)| *ts)
            .collect();
        for ts in &stale {
            self.candles.remove(ts);
        }
        stale.len()
    }

    /// Borrow the underlying ordered map.
    #[must_use]
    pub const fn as_map(&self) -> &CandleMap {
        &self.candles
    }
}

impl From<CandleMap> for IntervalBucket {
    fn from(map: CandleMap) -> Self {
        let mut bucket = Self::new();
        for c in map.into_values() {
            bucket.insert(c);
        }
        bucket
    }
}

impl Serialize for IntervalBucket {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(self.candles.iter().map(|(ts, c)| (format_key(*ts), c)))
    }
}

impl<'de> Deserialize<'de> for IntervalBucket {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Candle>::deserialize(d)?;
        let mut candles = CandleMap::new();
        for (key, candle) in raw {
            let ts = parse_key(&key).map_err(D::Error::custom)?;
            if candle.ts != ts {
                return Err(D::Error::custom(format!(
                    "candle under key {key} carries timestamp {}",
                    format_key(candle.ts)
                )));
            }
            candles.insert(ts, candle);
        }
        Ok(Self { candles })
    }
}

/// Everything cached for one symbol: one bucket per interval name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    /// Symbol this document belongs to; also its store key.
    pub symbol: String,
    /// Buckets keyed by interval wire name.
    #[serde(default)]
    pub intervals: BTreeMap<String, IntervalBucket>,
}

impl CacheDocument {
    /// Create an empty document for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            intervals: BTreeMap::new(),
        }
    }

    /// Bucket for `interval`, if one exists.
    #[must_use]
    pub fn bucket(&self, interval: Interval) -> Option<&IntervalBucket> {
        self.intervals.get(interval.as_str())
    }

    /// Bucket for `interval`, created empty when absent.
    pub fn bucket_mut(&mut self, interval: Interval) -> &mut IntervalBucket {
        self.intervals
            .entry(interval.as_str().to_string())
            .or_default()
    }
}
