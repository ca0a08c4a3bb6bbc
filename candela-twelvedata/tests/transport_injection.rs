#![cfg(feature = "test-adapters")]

use candela_core::{CandelaError, Interval, PageProvider, QueryDescriptor};
use candela_twelvedata::TwelveDataConnector;
use candela_twelvedata::adapter::{RawResponse, TimeSeriesTransport};
use chrono::NaiveDate;

fn query() -> QueryDescriptor {
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    QueryDescriptor::builder("EUR/USD")
        .range(day.and_hms_opt(0, 0, 0).unwrap(), day.and_hms_opt(12, 0, 0).unwrap())
        .interval(Interval::Min15)
        .build()
        .unwrap()
}

#[tokio::test]
async fn fetch_uses_injected_transport() {
    let transport = <dyn TimeSeriesTransport>::from_fn(|params| {
        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            vec!["apikey", "interval", "symbol", "start_date", "end_date", "format", "outputsize"]
        );
        assert!(params.contains(&("symbol", "EUR/USD".to_string())));
        assert!(params.contains(&("interval", "15min".to_string())));
        assert!(params.contains(&("outputsize", "5000".to_string())));
        Ok(RawResponse {
            status: 200,
            body: r#"{"values":[
                {"datetime":"2024-01-02 10:15:00","open":"1.1","high":"1.2","low":"1.0","close":"1.15"},
                {"datetime":"2024-01-02 10:00:00","open":"1.0","high":"1.1","low":"0.9","close":"1.1"}
            ]}"#
            .into(),
        })
    });

    let connector = TwelveDataConnector::from_transport(transport, "k");
    let page = connector.fetch_page(&query()).await.unwrap();
    let keys: Vec<_> = page.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["2024-01-02 10:00:00", "2024-01-02 10:15:00"]);
}

#[tokio::test]
async fn transport_failure_propagates_unchanged() {
    let transport = <dyn TimeSeriesTransport>::from_fn(|_| {
        Err(CandelaError::transport(None, "connection reset"))
    });
    let connector = TwelveDataConnector::from_transport(transport, "k");
    let err = connector.fetch_page(&query()).await.unwrap_err();
    assert_eq!(err, CandelaError::transport(None, "connection reset"));
}
