//! Fixed-duration candle intervals.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::CandelaError;

/// Candle interval with a fixed duration.
///
/// Names match the provider wire names exactly; `1month` is deliberately absent
/// because a month has no fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    /// One minute.
    Min1,
    /// Five minutes.
    Min5,
    /// Fifteen minutes.
    Min15,
    /// Thirty minutes.
    Min30,
    /// Forty-five minutes.
    Min45,
    /// One hour.
    Hour1,
    /// Two hours.
    Hour2,
    /// Four hours.
    Hour4,
    /// Five hours.
    Hour5,
    /// One day.
    Day1,
    /// One week.
    Week1,
}

impl Interval {
    /// Every supported interval, shortest first.
    pub const ALL: [Self; 11] = [
        Self::Min1,
        Self::Min5,
        Self::Min15,
        Self::Min30,
        Self::Min45,
        Self::Hour1,
        Self::Hour2,
        Self::Hour4,
        Self::Hour5,
        Self::Day1,
        Self::Week1,
    ];

    /// Wire name of this interval; also the bucket name inside a cache document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min45 => "45min",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour5 => "5h",
            Self::Day1 => "1day",
            Self::Week1 => "1week",
        }
    }

    /// Length of one candle in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        match self {
            Self::Min1 => 1,
            Self::Min5 => 5,
            Self::Min15 => 15,
            Self::Min30 => 30,
            Self::Min45 => 45,
            Self::Hour1 => 60,
            Self::Hour2 => 120,
            Self::Hour4 => 240,
            Self::Hour5 => 300,
            Self::Day1 => 1_440,
            Self::Week1 => 10_080,
        }
    }

    /// Fixed duration of one candle.
    #[must_use]
    pub fn duration(self) -> TimeDelta {
        TimeDelta::minutes(self.minutes())
    }

    /// Resolve an interval name straight to its duration.
    ///
    /// # Errors
    /// Returns `UnsupportedInterval` for `1month` and any unrecognized name.
    pub fn resolve(name: &str) -> Result<TimeDelta, CandelaError> {
        name.parse::<Self>().map(Self::duration)
    }
}

impl FromStr for Interval {
    type Err = CandelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|iv| iv.as_str() == s)
            .ok_or_else(|| CandelaError::unsupported_interval(s))
    }
}

impl TryFrom<String> for Interval {
    type Error = CandelaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(iv: Interval) -> Self {
        iv.as_str().to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
