//! Time-series utilities used by the synchronizer.
//!
//! Modules include:
//! - `grid`: enumerate the timestamps a range should contain
//! - `gaps`: diff a grid against a bucket and group missing spans
//! - `merge`: fold fetched pages together
//! - `fill`: forward/backward fill what the provider could not supply
//! - `trim`: strip synthetic candles from the ends of a series
/// Forward/backward gap filling.
pub mod fill;
/// Missing-range detection.
pub mod gaps;
/// Expected timestamp grid.
pub mod grid;
/// Page merging helpers.
pub mod merge;
/// Synthetic edge trimming.
pub mod trim;
