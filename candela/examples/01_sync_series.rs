mod common;
use std::sync::Arc;

use candela::{Interval, Synchronizer, TimeDelta};
use candela_store::FileStore;
use chrono::{NaiveTime, Utc};
use common::{get_provider, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // 1. Cache documents live under the system temp directory.
    let root = std::env::temp_dir().join("candela-example-cache");
    let store = Arc::new(FileStore::new(&root));

    // 2. Build the synchronizer with a modest page size.
    let sync = Synchronizer::builder()
        .provider(get_provider())
        .store(store.clone())
        .page_size(500)
        .build()?;

    // 3. One week of hourly candles ending yesterday.
    let today = Utc::now().date_naive();
    let start = (today - TimeDelta::days(8)).and_time(NaiveTime::MIN);
    let end = start + TimeDelta::days(7);
    let q = sync.query("AAPL", start, end, Interval::Hour1)?;

    println!(
        "Syncing {} {} from {} to {}...",
        q.symbol(),
        q.interval(),
        q.start_key(),
        q.end_key()
    );
    let first = sync.get_series(&q).await?;
    let synthetic = first.values().filter(|c| c.synthetic).count();
    println!("{} candles ({} synthetic)", first.len(), synthetic);

    // 4. The same call again is served entirely from the cache.
    let second = sync.get_series(&q).await?;
    println!(
        "second call returned {} candles from {}",
        second.len(),
        store.path_for("AAPL").display()
    );

    for candle in first.values().rev().take(5) {
        println!(
            " - {} O:{} H:{} L:{} C:{}{}",
            candle.ts,
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            if candle.synthetic { " (filled)" } else { "" }
        );
    }
    Ok(())
}
