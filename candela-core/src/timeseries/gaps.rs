use chrono::{NaiveDateTime, TimeDelta};

use crate::IntervalBucket;

/// Inclusive `(first_missing, last_missing)` span of grid timestamps.
pub type GapRange = (NaiveDateTime, NaiveDateTime);

/// Grid timestamps absent from `bucket`, in grid order.
pub fn missing_timestamps<I>(grid: I, bucket: &IntervalBucket) -> Vec<NaiveDateTime>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    grid.into_iter().filter(|t| !bucket.contains(*t)).collect()
}

/// Group the grid timestamps missing from `bucket` into contiguous ranges.
///
/// The reference step is the distance between the first two missing
/// timestamps (zero when only one is missing). Walking the missing list, a new
/// range starts whenever the distance to the previous missing timestamp
/// differs from that reference step.
///
/// The reference is fixed from the first pair only: if the missing pattern
/// changes and a later distance happens to equal the first one again, those
/// timestamps are merged into one range even though the bucket holds candles
/// between them. Callers re-fetching such a range simply receive candles they
/// already have.
pub fn detect_gaps<I>(grid: I, bucket: &IntervalBucket) -> Vec<GapRange>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let missing = missing_timestamps(grid, bucket);
    let Some((&first, rest)) = missing.split_first() else {
        return Vec::new();
    };
    let reference = rest.first().map_or(TimeDelta::zero(), |&second| second - first);

    let mut ranges = Vec::new();
    let mut range_start = first;
    let mut prev = first;
    for &t in rest {
        if t - prev != reference {
            ranges.push((range_start, prev));
            range_start = t;
        }
        prev = t;
    }
    ranges.push((range_start, prev));
    ranges
}
