use chrono::NaiveDateTime;

use crate::{Candle, IntervalBucket};

/// Fill every grid timestamp absent from `bucket` with a synthetic candle.
///
/// - A gap takes the prices of the nearest preceding grid candle (observed or
///   already filled).
/// - Leading gaps, before any known grid candle, take the prices of the first
///   known grid candle instead.
/// - With no known candle anywhere on the grid nothing is filled.
///
/// Returns the number of synthetic candles inserted.
pub fn fill_gaps<I>(grid: I, bucket: &mut IntervalBucket) -> usize
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut last: Option<Candle> = None;
    let mut leading: Vec<NaiveDateTime> = Vec::new();
    let mut filled = 0usize;

    for t in grid {
        if let Some(known) = bucket.get(t).cloned() {
            if last.is_none() {
                for lt in leading.drain(..) {
                    bucket.insert(known.synthetic_at(lt));
                    filled += 1;
                }
            }
            last = Some(known);
            continue;
        }
        match &last {
            Some(prev) => {
                let synthetic = prev.synthetic_at(t);
                bucket.insert(synthetic.clone());
                last = Some(synthetic);
                filled += 1;
            }
            None => leading.push(t),
        }
    }
    filled
}
