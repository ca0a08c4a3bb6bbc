use std::iter::FusedIterator;

use chrono::{NaiveDateTime, TimeDelta};

use crate::QueryDescriptor;

/// Lazy sequence of the bar start times a range is expected to contain.
///
/// Starting at `start`, each timestamp `t` is yielded while `t + step < end`
/// or `t == end`; the first `t` failing that test ends the sequence. So only
/// bars that end strictly inside the range are listed, a degenerate range
/// (`start == end`) is the single point `start`, and a range shorter than one
/// step is empty.
///
/// ```
/// use candela_core::{Grid, TimeDelta};
/// use chrono::NaiveDate;
///
/// let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let grid: Vec<_> = Grid::new(t0, t0 + TimeDelta::hours(8), TimeDelta::hours(4)).collect();
/// assert_eq!(grid, vec![t0]);
/// ```
///
/// The grid is a pure function of its inputs; clone it to walk it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    next: Option<NaiveDateTime>,
    end: NaiveDateTime,
    step: TimeDelta,
}

impl Grid {
    /// Grid over `[start, end]` with the given step.
    ///
    /// An inverted range yields nothing. A non-positive step only ever yields
    /// the degenerate single point.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step: TimeDelta) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
            step,
        }
    }

    /// Grid for a descriptor's range and interval.
    #[must_use]
    pub fn for_query(query: &QueryDescriptor) -> Self {
        Self::new(query.start(), query.end(), query.interval().duration())
    }
}

impl Iterator for Grid {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.next.take()?;
        if t == self.end {
            return Some(t);
        }
        if self.step <= TimeDelta::zero() {
            return None;
        }
        let bar_end = t.checked_add_signed(self.step)?;
        if bar_end < self.end {
            self.next = Some(bar_end);
            Some(t)
        } else {
            None
        }
    }
}

impl FusedIterator for Grid {}
