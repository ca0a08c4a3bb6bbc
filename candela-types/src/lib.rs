//! Candela-specific error taxonomy, interval names, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod interval;

pub use config::{ResponseFormat, SyncConfig, TwelveDataConfig};
pub use connector::ConnectorKey;
pub use error::CandelaError;
pub use interval::Interval;
