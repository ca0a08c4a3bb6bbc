//! candela-core
//!
//! Core types, traits, and utilities shared across the candela workspace.
//!
//! - `types`: candles, interval buckets, cache documents, and query descriptors.
//! - `timestamp`: the canonical `yyyy-MM-dd HH:mm:ss` key codec.
//! - `connector`: the `PageProvider` and `CacheStore` collaborator traits.
//! - `observer`: the injected sink that receives synchronization progress events.
//! - `timeseries`: grid enumeration, gap detection, gap filling, and trimming.
//!
//! Nothing in this crate performs I/O; the async traits are implemented by
//! `candela-twelvedata`, `candela-store`, and `candela-mock`.
#![warn(missing_docs)]

mod candle;
/// Provider and cache store traits.
pub mod connector;
mod document;
/// Synchronization progress events and the observer sink.
pub mod observer;
mod query;
/// Time-series utilities for grids, gaps, filling, and trimming.
pub mod timeseries;
/// Canonical timestamp key codec.
pub mod timestamp;
pub mod types;

pub use connector::{CacheStore, PageProvider};
pub use observer::{NoopObserver, SyncEvent, SyncObserver};
#[cfg(feature = "tracing")]
pub use observer::TracingObserver;
pub use timeseries::fill::fill_gaps;
pub use timeseries::gaps::{GapRange, detect_gaps, missing_timestamps};
pub use timeseries::grid::Grid;
pub use timeseries::merge::{merge_page, oldest_timestamp};
pub use timeseries::trim::{drop_leading_synthetic, drop_synthetic_edges, drop_trailing_synthetic};
pub use types::*;
