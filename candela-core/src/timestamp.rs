//! Canonical `yyyy-MM-dd HH:mm:ss` timestamp keys.
//!
//! The same encoding is used as the cache bucket key and as the wire format of
//! the `start_date`/`end_date` query parameters. It is fixed width, so the
//! lexicographic order of keys equals chronological order. Sub-second
//! precision is not representable and is dropped.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::CandelaError;

/// `strftime` pattern of the canonical key.
pub const KEY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest step representable by the key format (one second).
#[must_use]
pub fn tick() -> TimeDelta {
    TimeDelta::seconds(1)
}

/// Drop any sub-second component.
#[must_use]
pub fn truncate_subsec(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Encode a timestamp as its canonical key.
#[must_use]
pub fn format_key(ts: NaiveDateTime) -> String {
    ts.format(KEY_FORMAT).to_string()
}

/// Decode a canonical key.
///
/// Provider payloads omit trailing components for coarse intervals, so
/// `yyyy-MM-dd HH:mm` (seconds zero) and `yyyy-MM-dd` (midnight) are accepted too.
///
/// # Errors
/// Returns `MalformedResponse` if the text matches none of the accepted layouts.
pub fn parse_key(s: &str) -> Result<NaiveDateTime, CandelaError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, KEY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, MINUTE_FORMAT))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| CandelaError::malformed(format!("unparseable datetime: {s:?}")))
}

/// Serde adapter storing a `NaiveDateTime` as its canonical key.
pub mod serde_key {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `yyyy-MM-dd HH:mm:ss`.
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(super::KEY_FORMAT))
    }

    /// Deserialize from any layout accepted by [`super::parse_key`].
    ///
    /// # Errors
    /// Fails when the string is not a recognizable timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_key(&raw).map_err(serde::de::Error::custom)
    }
}
