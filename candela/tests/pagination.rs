mod helpers;

use candela::{CandelaError, CandleMap, Interval};
use candela_mock::{DynamicMockProvider, EMPTY_SYMBOL, MockBehavior, MockProvider};
use helpers::{AAPL, h, harness, real, synthetic_hours};
use std::sync::Arc;

#[tokio::test]
async fn provider_ignoring_the_range_stops_after_no_progress() {
    let (provider, controller) = DynamicMockProvider::new_with_controller("stuck");
    let page: CandleMap = [6, 7, 8].map(|i| (h(i), real(h(i), 500))).into_iter().collect();
    controller.set_behavior(AAPL, MockBehavior::Return(page)).await;
    let hx = harness(provider, 5_000);

    let q = hx.sync.query(AAPL, h(0), h(10), Interval::Hour1).unwrap();
    let out = hx.sync.get_series(&q).await.unwrap();

    let requests = controller.requests(AAPL).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].end(), h(6) - candela::TimeDelta::seconds(1));
    // Leading slots take the first observed candle.
    assert_eq!(synthetic_hours(&out), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(out.len(), 9);
}

#[tokio::test]
async fn empty_page_ends_the_walk() {
    let provider = Arc::new(MockProvider::new());
    let hx = harness(provider.clone(), 5_000);
    let q = hx.sync.query(EMPTY_SYMBOL, h(0), h(10), Interval::Hour1).unwrap();

    let out = hx.sync.get_series(&q).await.unwrap();
    assert!(out.is_empty());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn walk_stops_below_listing_date() {
    let provider = Arc::new(MockProvider::new().listed_since(h(4)));
    let hx = harness(provider.clone(), 3);
    let q = hx.sync.query(AAPL, h(0), h(10), Interval::Hour1).unwrap();

    let out = hx.sync.get_series(&q).await.unwrap();
    // 8,7,6 then 5,4 then nothing older than the listing date.
    assert_eq!(provider.calls(), 3);
    assert_eq!(synthetic_hours(&out), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn failure_mid_walk_discards_earlier_pages() {
    let (provider, controller) = DynamicMockProvider::new_with_controller("flaky");
    let err = CandelaError::transport(Some(502), "bad gateway");
    controller
        .set_behavior(AAPL, MockBehavior::FailAfter(1, err.clone()))
        .await;
    let hx = harness(provider, 4);

    let q = hx.sync.query(AAPL, h(0), h(10), Interval::Hour1).unwrap();
    assert_eq!(hx.sync.get_series(&q).await.unwrap_err(), err);
    assert_eq!(controller.requests(AAPL).await.len(), 2);
    assert_eq!(hx.store.writes(), 0);
}
