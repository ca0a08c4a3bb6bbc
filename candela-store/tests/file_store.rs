use std::path::PathBuf;

use candela_core::{CacheDocument, CacheStore, CandelaError, Candle, Decimal, Interval};
use candela_store::FileStore;
use chrono::NaiveDate;

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("candela-store-{tag}-{:016x}", rand::random::<u64>()))
}

fn sample_doc(symbol: &str) -> CacheDocument {
    let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let px = Decimal::new(18_512, 2);
    let mut doc = CacheDocument::new(symbol);
    let bucket = doc.bucket_mut(Interval::Min30);
    bucket.insert(Candle::new(ts, px, px, px, px));
    bucket.insert(Candle::new(ts, px, px, px, px).synthetic_at(ts + chrono::TimeDelta::minutes(30)));
    doc
}

#[tokio::test]
async fn missing_key_loads_as_none() {
    let store = FileStore::new(scratch_dir("missing"));
    assert_eq!(store.get("AAPL").await.unwrap(), None);
}

#[tokio::test]
async fn save_then_get_returns_same_document() {
    let dir = scratch_dir("roundtrip");
    let store = FileStore::new(&dir);
    let doc = sample_doc("BTC/USD");

    store.save("BTC/USD", &doc).await.unwrap();
    assert!(store.path_for("BTC/USD").ends_with("BTC_USD.json"));
    assert_eq!(store.get("BTC/USD").await.unwrap(), Some(doc.clone()));

    // Overwrite replaces the document and leaves no temporary files behind.
    let mut next = doc;
    next.bucket_mut(Interval::Day1);
    store.save("BTC/USD", &next).await.unwrap();
    assert_eq!(store.get("BTC/USD").await.unwrap(), Some(next));

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec!["BTC_USD.json".to_string()]);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn corrupt_document_is_a_store_error() {
    let dir = scratch_dir("corrupt");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let store = FileStore::new(&dir);
    tokio::fs::write(store.path_for("AAPL"), b"{ not json").await.unwrap();

    let err = store.get("AAPL").await.unwrap_err();
    assert!(matches!(err, CandelaError::Store(_)));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
