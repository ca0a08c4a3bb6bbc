mod common;
use std::sync::Arc;

use candela::{Interval, Synchronizer, TimeDelta, drop_synthetic_edges};
use candela_store::MemoryStore;
use chrono::Utc;
use common::{get_provider, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let sync = Synchronizer::builder()
        .provider(get_provider())
        .store(Arc::new(MemoryStore::new()))
        .page_size(1_000)
        .build()?;

    let now = Utc::now().naive_utc();
    let q = sync.query("EUR/USD", now - TimeDelta::days(30), now, Interval::Hour4)?;

    // Walks the whole range and extends it up to `now`.
    let all = sync.get_all_series_extended(&q, now).await?;
    let observed = drop_synthetic_edges(&all);

    println!(
        "{} candles in range, {} between first and last observed",
        all.len(),
        observed.len()
    );
    if let (Some(first), Some(last)) = (observed.values().next(), observed.values().last()) {
        println!("first: {} close {}", first.ts, first.close);
        println!("last:  {} close {}", last.ts, last.close);
    }
    Ok(())
}
