mod common;

use candela_core::{
    CandleMap, drop_leading_synthetic, drop_synthetic_edges, drop_trailing_synthetic,
};
use common::{at_hours, map_of, real, synth};
use proptest::prelude::*;

fn series(flags: &[bool]) -> CandleMap {
    map_of(flags.iter().enumerate().map(|(i, is_synth)| {
        let ts = at_hours(i64::try_from(i).unwrap());
        if *is_synth { synth(ts, 1) } else { real(ts, 1) }
    }))
}

#[test]
fn interior_synthetic_candles_survive() {
    let s = series(&[true, false, true, true, false, true]);
    let trimmed = drop_synthetic_edges(&s);
    let flags: Vec<_> = trimmed.values().map(|c| c.synthetic).collect();
    assert_eq!(flags, vec![false, true, true, false]);
    assert_eq!(trimmed.keys().next(), Some(&at_hours(1)));
    assert_eq!(trimmed.keys().last(), Some(&at_hours(4)));
}

#[test]
fn leading_and_trailing_are_one_sided() {
    let s = series(&[true, false, true]);
    assert_eq!(drop_leading_synthetic(&s).len(), 2);
    assert_eq!(drop_trailing_synthetic(&s).len(), 2);
    assert_eq!(drop_leading_synthetic(&s).keys().next(), Some(&at_hours(1)));
    assert_eq!(drop_trailing_synthetic(&s).keys().last(), Some(&at_hours(1)));
}

#[test]
fn all_synthetic_or_empty_yields_empty() {
    let s = series(&[true, true, true]);
    assert!(drop_leading_synthetic(&s).is_empty());
    assert!(drop_trailing_synthetic(&s).is_empty());
    assert!(drop_synthetic_edges(&s).is_empty());
    assert!(drop_synthetic_edges(&CandleMap::new()).is_empty());
}

#[test]
fn single_real_candle_is_preserved() {
    let s = map_of([real(at_hours(0), 42)]);
    assert_eq!(drop_synthetic_edges(&s), s);
    assert_eq!(drop_leading_synthetic(&s), s);
    assert_eq!(drop_trailing_synthetic(&s), s);
}

proptest! {
    #[test]
    fn trims_commute(flags in proptest::collection::vec(any::<bool>(), 0..40)) {
        let s = series(&flags);
        let both = drop_synthetic_edges(&s);
        prop_assert_eq!(&drop_leading_synthetic(&drop_trailing_synthetic(&s)), &both);
        prop_assert_eq!(&drop_trailing_synthetic(&drop_leading_synthetic(&s)), &both);
        if let Some(first) = both.values().next() { prop_assert!(!first.synthetic); }
        if let Some(last) = both.values().last() { prop_assert!(!last.synthetic); }
        // Only edges are removed: the interior is a contiguous slice of the input.
        let kept: Vec<_> = both.keys().collect();
        let all: Vec<_> = s.keys().collect();
        prop_assert!(kept.is_empty() || all.windows(kept.len()).any(|w| w == kept.as_slice()));
    }
}
