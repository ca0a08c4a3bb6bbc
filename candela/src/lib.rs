//! candela keeps a local cache of OHLC candles in sync with a paginated
//! time-series provider.
//!
//! Overview
//! - For a query (symbol, range, interval) the [`Synchronizer`] builds the
//!   grid of bar timestamps the range should contain and diffs it against the
//!   cached bucket for that symbol and interval.
//! - Only the missing spans are fetched. Each span is walked backward page by
//!   page until it is covered, the provider runs dry, or it stops making
//!   progress.
//! - Grid slots the provider could not supply are filled with synthetic
//!   copies of the nearest known candle, so a second identical call is served
//!   from the cache without touching the provider or the store.
//!
//! Key behaviors and trade-offs
//! - Providers page newest-first; the walker never asks for more than the
//!   configured page size per request.
//! - Synthetic candles are flagged; use the trim helpers re-exported from
//!   `candela_core` to drop them from the edges of a result.
//! - Every operation has a `*_with_cancel` variant. A cancelled call returns
//!   `CandelaError::Cancelled` and persists nothing.
//! - Calls for the same symbol on one `Synchronizer` run one at a time; calls
//!   from separate processes sharing a store are not coordinated.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use candela::{Interval, Synchronizer};
//! use candela_store::FileStore;
//! use candela_twelvedata::TwelveDataConnector;
//!
//! let sync = Synchronizer::builder()
//!     .provider(Arc::new(TwelveDataConnector::from_env()?))
//!     .store(Arc::new(FileStore::new("./cache")))
//!     .build()?;
//!
//! let q = sync.query("AAPL", start, end, Interval::Day1)?;
//! let candles = sync.get_series(&q).await?;
//! ```
#![warn(missing_docs)]

mod core;
mod series;
mod traverse;
mod walker;

pub use crate::core::{Synchronizer, SynchronizerBuilder};
pub use crate::walker::WalkOutcome;

pub use candela_core::*;
pub use tokio_util::sync::CancellationToken;
