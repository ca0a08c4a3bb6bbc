use candela_core::{CandelaError, CandleMap, Interval, PageProvider, QueryDescriptor};
use candela_mock::{DynamicMockProvider, MockBehavior};
use chrono::NaiveDate;

fn query(symbol: &str) -> QueryDescriptor {
    let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    QueryDescriptor::builder(symbol)
        .range(d.and_hms_opt(0, 0, 0).unwrap(), d.and_hms_opt(5, 0, 0).unwrap())
        .interval(Interval::Hour1)
        .build()
        .unwrap()
}

#[tokio::test]
async fn unconfigured_symbol_gets_generated_bars() {
    let (mock, controller) = DynamicMockProvider::new_with_controller("P0");
    let page = mock.fetch_page(&query("AAPL")).await.unwrap();
    assert_eq!(page.len(), 6);
    assert_eq!(controller.requests("AAPL").await.len(), 1);
    assert_eq!(mock.key().as_str(), "P0");
}

#[tokio::test]
async fn fail_behavior_returns_the_error() {
    let (mock, controller) = DynamicMockProvider::new_with_controller("P0");
    let err = CandelaError::transport(Some(429), "slow down");
    controller
        .set_behavior("MSFT", MockBehavior::Fail(err.clone()))
        .await;
    assert_eq!(mock.fetch_page(&query("MSFT")).await.unwrap_err(), err);
}

#[tokio::test]
async fn fail_after_serves_then_fails() {
    let (mock, controller) = DynamicMockProvider::new_with_controller("P0");
    let err = CandelaError::transport(None, "reset");
    controller
        .set_behavior("X", MockBehavior::FailAfter(1, err.clone()))
        .await;
    assert!(mock.fetch_page(&query("X")).await.is_ok());
    assert_eq!(mock.fetch_page(&query("X")).await.unwrap_err(), err);
}

#[tokio::test]
async fn return_behavior_ignores_the_range() {
    let (mock, controller) = DynamicMockProvider::new_with_controller("P0");
    controller
        .set_behavior("Y", MockBehavior::Return(CandleMap::new()))
        .await;
    assert!(mock.fetch_page(&query("Y")).await.unwrap().is_empty());
    controller.clear_all().await;
    assert!(controller.requests("Y").await.is_empty());
    assert!(!mock.fetch_page(&query("Y")).await.unwrap().is_empty());
}

#[tokio::test]
async fn hang_never_completes() {
    let (mock, controller) = DynamicMockProvider::new_with_controller("P0");
    controller.set_behavior("Z", MockBehavior::Hang).await;
    let q = query("Z");
    let res = tokio::time::timeout(std::time::Duration::from_millis(50), mock.fetch_page(&q)).await;
    assert!(res.is_err());
}
