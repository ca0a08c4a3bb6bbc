//! Re-export of foundational types from this crate and `candela-types`.
// Consolidated re-exports so downstream crates can depend on `candela-core` only

pub use candela_types::{
    CandelaError, ConnectorKey, Interval, ResponseFormat, SyncConfig, TwelveDataConfig,
};

pub use crate::candle::{Candle, CandleMap};
pub use crate::document::{CacheDocument, IntervalBucket};
pub use crate::query::{QueryDescriptor, QueryDescriptorBuilder};

pub use chrono::{NaiveDateTime, TimeDelta};
pub use rust_decimal::Decimal;
