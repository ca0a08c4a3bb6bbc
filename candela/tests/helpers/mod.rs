#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use candela::{
    CacheDocument, Candle, CandleMap, Decimal, Interval, IntervalBucket, NaiveDateTime,
    PageProvider, SyncEvent, SyncObserver, Synchronizer, TimeDelta,
};
use candela_store::MemoryStore;
use chrono::NaiveDate;

pub const AAPL: &str = "AAPL";

/// Midnight 2024-01-01.
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn h(hours: i64) -> NaiveDateTime {
    t0() + TimeDelta::hours(hours)
}

pub fn real(ts: NaiveDateTime, px: i64) -> Candle {
    let p = Decimal::new(px, 2);
    Candle::new(ts, p, p, p, p)
}

/// Document for `symbol` holding `candles` in the hourly bucket.
pub fn hourly_doc(symbol: &str, candles: impl IntoIterator<Item = Candle>) -> CacheDocument {
    let mut doc = CacheDocument::new(symbol);
    let bucket: &mut IntervalBucket = doc.bucket_mut(Interval::Hour1);
    for c in candles {
        bucket.insert(c);
    }
    doc
}

pub fn synthetic_hours(series: &CandleMap) -> Vec<i64> {
    series
        .values()
        .filter(|c| c.synthetic)
        .map(|c| (c.ts - t0()).num_hours())
        .collect()
}

pub fn hours_of(series: &CandleMap) -> Vec<i64> {
    series.keys().map(|ts| (*ts - t0()).num_hours()).collect()
}

/// Observer that keeps a readable log of every event.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

impl SyncObserver for Recorder {
    fn on_event(&self, event: &SyncEvent<'_>) {
        let line = match event {
            SyncEvent::MissingRange { start, end, .. } => {
                format!("missing {}..{}", (*start - t0()).num_hours(), (*end - t0()).num_hours())
            }
            SyncEvent::PageFetched {
                provider, received, ..
            } => format!("page {received} from {provider}"),
            SyncEvent::GapsFilled { filled, .. } => format!("filled {filled}"),
            SyncEvent::Persisted { symbol } => format!("persisted {symbol}"),
            _ => "other".to_string(),
        };
        self.events.lock().unwrap().push(line);
    }
}

pub struct Harness {
    pub sync: Synchronizer,
    pub store: Arc<MemoryStore>,
    pub recorder: Arc<Recorder>,
}

/// Synchronizer over `provider` with a counting in-memory store.
pub fn harness(provider: Arc<dyn PageProvider>, page_size: u32) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let recorder = Arc::new(Recorder::default());
    let sync = Synchronizer::builder()
        .provider(provider)
        .store(store.clone())
        .observer(recorder.clone())
        .page_size(page_size)
        .build()
        .unwrap();
    Harness {
        sync,
        store,
        recorder,
    }
}
