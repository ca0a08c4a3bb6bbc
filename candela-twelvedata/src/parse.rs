//! Pure decoders for `/time_series` payloads.
//!
//! Both decoders produce observed (non-synthetic) candles keyed by their
//! timestamp; a timestamp repeated in one payload keeps the row read last.

use std::str::FromStr;

use candela_core::timestamp::parse_key;
use candela_core::{CandelaError, Candle, CandleMap, Decimal, ResponseFormat};
use serde::Deserialize;
use serde_json::Value;

/// Message prefix of the envelope returned when a range holds no candles.
const NO_DATA_PREFIX: &str = "No data is available";

/// Decode a payload in the given wire format.
///
/// # Errors
/// Returns `MalformedResponse` when required structure or fields are missing.
pub fn parse_body(format: ResponseFormat, body: &str) -> Result<CandleMap, CandelaError> {
    match format {
        ResponseFormat::Json => parse_json(body),
        ResponseFormat::Csv => parse_csv(body),
    }
}

/// Decode a tabular payload.
///
/// The first record is a header. Fields are split on `;` when the header
/// contains one and on `,` otherwise; quoted fields are honored. Blank lines
/// and records with fewer than five fields are skipped.
///
/// The provider reports errors as a JSON envelope even when CSV was
/// requested. Such a body decodes like a structured one: the no-data
/// envelope is empty, anything else is `MalformedResponse`.
///
/// # Errors
/// Returns `MalformedResponse` for an error envelope, a broken record, or an
/// unparseable datetime or price.
pub fn parse_csv(body: &str) -> Result<CandleMap, CandelaError> {
    if body.trim_start().starts_with('{') {
        return parse_error_envelope(body);
    }
    let header = body.lines().next().unwrap_or_default();
    let delimiter = if header.contains(';') { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(body.as_bytes());

    let mut out = CandleMap::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| CandelaError::malformed(format!("invalid time series row: {e}")))?;
        if record.len() < 5 {
            continue;
        }
        let candle = Candle::new(
            parse_key(record[0].trim())?,
            price("open", &record[1])?,
            price("high", &record[2])?,
            price("low", &record[3])?,
            price("close", &record[4])?,
        );
        out.insert(candle.ts, candle);
    }
    Ok(out)
}

fn parse_error_envelope(body: &str) -> Result<CandleMap, CandelaError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| CandelaError::malformed(format!("invalid time series body: {e}")))?;
    if envelope.is_no_data() {
        return Ok(CandleMap::new());
    }
    let detail = envelope.message.unwrap_or_else(|| "no message".into());
    Err(CandelaError::malformed(format!(
        "provider error in place of csv: {detail}"
    )))
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    values: Option<Vec<Row>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    fn is_no_data(&self) -> bool {
        self.status.as_deref() == Some("error")
            && self.code == Some(400)
            && self
                .message
                .as_deref()
                .is_some_and(|m| m.starts_with(NO_DATA_PREFIX))
    }
}

#[derive(Deserialize)]
struct Row {
    datetime: String,
    #[serde(default)]
    open: Option<Value>,
    #[serde(default)]
    high: Option<Value>,
    #[serde(default)]
    low: Option<Value>,
    #[serde(default)]
    close: Option<Value>,
}

/// Decode a structured payload.
///
/// The candles live in a `values` array. The provider's "no data" error
/// envelope decodes to an empty map.
///
/// # Errors
/// Returns `MalformedResponse` when the body is not an object, `values` is
/// missing outside the no-data envelope, or any row field is missing or
/// unparseable.
pub fn parse_json(body: &str) -> Result<CandleMap, CandelaError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| CandelaError::malformed(format!("invalid time series body: {e}")))?;
    if envelope.is_no_data() {
        return Ok(CandleMap::new());
    }
    let Some(rows) = envelope.values else {
        let detail = envelope.message.unwrap_or_else(|| "no values".into());
        return Err(CandelaError::malformed(format!(
            "missing values array: {detail}"
        )));
    };

    let mut out = CandleMap::new();
    for row in rows {
        let candle = Candle::new(
            parse_key(row.datetime.trim())?,
            json_price("open", row.open.as_ref())?,
            json_price("high", row.high.as_ref())?,
            json_price("low", row.low.as_ref())?,
            json_price("close", row.close.as_ref())?,
        );
        out.insert(candle.ts, candle);
    }
    Ok(out)
}

fn json_price(field: &str, v: Option<&Value>) -> Result<Decimal, CandelaError> {
    match v {
        Some(Value::String(s)) => price(field, s),
        Some(Value::Number(n)) => price(field, &n.to_string()),
        _ => Err(CandelaError::malformed(format!("missing {field} price"))),
    }
}

fn price(field: &str, raw: &str) -> Result<Decimal, CandelaError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(CandelaError::malformed(format!("blank {field} price")));
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| CandelaError::malformed(format!("unparseable {field} price: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn json_values_are_decoded() {
        let body = r#"{"meta":{"symbol":"AAPL"},"values":[
            {"datetime":"2024-01-02 10:00:00","open":"1.5","high":"2","low":"1","close":"1.75","volume":"10"},
            {"datetime":"2024-01-02 09:00:00","open":"1","high":"1","low":"1","close":"1"}
        ],"status":"ok"}"#;
        let out = parse_json(body).unwrap();
        assert_eq!(out.len(), 2);
        let first = out.values().next().unwrap();
        assert_eq!(first.close, dec("1"));
        let last = out.values().last().unwrap();
        assert_eq!(last.close, dec("1.75"));
        assert!(out.values().all(Candle::is_real));
    }

    #[test]
    fn empty_values_and_no_data_envelope_are_empty() {
        assert!(parse_json(r#"{"values":[]}"#).unwrap().is_empty());
        let envelope = r#"{"code":400,"message":"No data is available on the specified dates. Try setting different start/end dates.","status":"error"}"#;
        assert!(parse_json(envelope).unwrap().is_empty());
    }

    #[test]
    fn other_envelopes_are_malformed() {
        assert!(matches!(
            parse_json(r#"{"status":"ok"}"#),
            Err(CandelaError::MalformedResponse(_))
        ));
        let limit = r#"{"code":429,"message":"You have run out of API credits","status":"error"}"#;
        assert!(matches!(parse_json(limit), Err(CandelaError::MalformedResponse(_))));
        assert!(parse_json("[]").is_err());
        assert!(parse_json("not json").is_err());
    }

    #[test]
    fn json_blank_or_missing_price_is_malformed() {
        let blank = r#"{"values":[{"datetime":"2024-01-02","open":"","high":"1","low":"1","close":"1"}]}"#;
        assert!(parse_json(blank).is_err());
        let missing = r#"{"values":[{"datetime":"2024-01-02","open":"1","high":"1","low":"1"}]}"#;
        assert!(parse_json(missing).is_err());
        let bad_date = r#"{"values":[{"datetime":"yesterday","open":"1","high":"1","low":"1","close":"1"}]}"#;
        assert!(parse_json(bad_date).is_err());
    }

    #[test]
    fn json_numeric_prices_are_accepted() {
        let body = r#"{"values":[{"datetime":"2024-01-02","open":1.25,"high":2,"low":1,"close":1.5}]}"#;
        let out = parse_json(body).unwrap();
        assert_eq!(out.values().next().unwrap().open, dec("1.25"));
    }

    #[test]
    fn csv_skips_header_blank_and_short_rows() {
        let body = "datetime,open,high,low,close,volume\r\n\
                    2024-01-02 10:00:00,1.5,2,1,1.75,10\r\n\
                    \r\n\
                    2024-01-02 11:00:00,1,2\r\n\
                    2024-01-02 09:00:00,1,1,1,1\n";
        let out = parse_csv(body).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.values().last().unwrap().high, dec("2"));
    }

    #[test]
    fn csv_semicolon_delimiter_is_detected() {
        let body = "datetime;open;high;low;close;volume\n2024-01-02;1.1;1.2;1.0;1.15;0\n";
        let out = parse_csv(body).unwrap();
        assert_eq!(out.values().next().unwrap().close, dec("1.15"));
    }

    #[test]
    fn csv_bad_fields_are_malformed() {
        assert!(parse_csv("h\n2024-01-02,x,1,1,1\n").is_err());
        assert!(parse_csv("h\n2024-01-02, ,1,1,1\n").is_err());
        assert!(parse_csv("h\nnot-a-date,1,1,1,1\n").is_err());
        assert!(parse_csv("").unwrap().is_empty());
    }

    #[test]
    fn csv_quoted_fields_are_unquoted() {
        let body = "datetime,open,high,low,close\n\"2024-01-02 10:00:00\",\"1.5\",2,1,1.75\n";
        let out = parse_csv(body).unwrap();
        let candle = out.values().next().unwrap();
        assert_eq!(candle.open, dec("1.5"));
        assert_eq!(candle.close, dec("1.75"));
    }

    #[test]
    fn csv_body_carrying_an_error_envelope() {
        let no_data = r#"{"code":400,"message":"No data is available on the specified dates.","status":"error"}"#;
        assert!(parse_csv(no_data).unwrap().is_empty());
        let credits = r#"{"code":429,"message":"You have run out of API credits for the current minute.","status":"error"}"#;
        let err = parse_body(ResponseFormat::Csv, credits).unwrap_err();
        assert!(matches!(err, CandelaError::MalformedResponse(ref m) if m.contains("API credits")));
    }

    #[test]
    fn duplicate_rows_keep_the_last() {
        let body = "h\n2024-01-02,1,1,1,1\n2024-01-02,2,2,2,2\n";
        let out = parse_csv(body).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.values().next().unwrap().close, dec("2"));
    }
}
