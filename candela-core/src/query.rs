use chrono::NaiveDateTime;

use crate::timestamp::{format_key, truncate_subsec};
use crate::{CandelaError, Interval, ResponseFormat, SyncConfig};

/// One logical request: a symbol, an inclusive date range, and how to page it.
///
/// Descriptors validate on construction and are immutable; sub-ranges used
/// during pagination and gap filling are derived with [`QueryDescriptor::narrowed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    symbol: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    interval: Interval,
    page_size: u32,
    format: ResponseFormat,
}

impl QueryDescriptor {
    /// Start building a descriptor for `symbol`.
    pub fn builder(symbol: impl Into<String>) -> QueryDescriptorBuilder {
        QueryDescriptorBuilder::new(symbol)
    }

    /// Symbol requested from the provider; also the cache document key.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Candle interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Maximum candles per provider page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Wire format requested from the provider.
    #[must_use]
    pub const fn format(&self) -> ResponseFormat {
        self.format
    }

    /// `start` encoded as a canonical key, as sent on the wire.
    #[must_use]
    pub fn start_key(&self) -> String {
        format_key(self.start)
    }

    /// `end` encoded as a canonical key, as sent on the wire.
    #[must_use]
    pub fn end_key(&self) -> String {
        format_key(self.end)
    }

    /// Same symbol, interval, format, and page size over a different range.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start > end`.
    pub fn narrowed(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, CandelaError> {
        let start = truncate_subsec(start);
        let end = truncate_subsec(end);
        check_range(start, end)?;
        Ok(Self {
            start,
            end,
            ..self.clone()
        })
    }
}

fn check_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), CandelaError> {
    if start > end {
        return Err(CandelaError::InvalidArg(format!(
            "start {} is after end {}",
            format_key(start),
            format_key(end)
        )));
    }
    Ok(())
}

/// Builder for [`QueryDescriptor`].
#[derive(Debug, Clone)]
pub struct QueryDescriptorBuilder {
    symbol: String,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
    interval: Interval,
    page_size: u32,
    format: ResponseFormat,
}

impl QueryDescriptorBuilder {
    /// New builder using [`SyncConfig`] defaults and a daily interval.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_config(symbol, &SyncConfig::default())
    }

    /// New builder taking page size and format from `cfg`.
    pub fn with_config(symbol: impl Into<String>, cfg: &SyncConfig) -> Self {
        Self {
            symbol: symbol.into(),
            range: None,
            interval: Interval::Day1,
            page_size: cfg.page_size,
            format: cfg.format,
        }
    }

    /// Inclusive date range. Required.
    #[must_use]
    pub const fn range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Candle interval.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Candle interval given by wire name.
    ///
    /// # Errors
    /// Returns `UnsupportedInterval` for names outside the fixed set.
    pub fn interval_name(self, name: &str) -> Result<Self, CandelaError> {
        Ok(self.interval(name.parse()?))
    }

    /// Maximum candles per provider page.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Wire format requested from the provider.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol is blank, the range is missing or
    /// inverted, or the page size is zero.
    pub fn build(self) -> Result<QueryDescriptor, CandelaError> {
        let symbol = self.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(CandelaError::InvalidArg("symbol must not be empty".into()));
        }
        let (start, end) = self
            .range
            .ok_or_else(|| CandelaError::InvalidArg("date range is required".into()))?;
        let start = truncate_subsec(start);
        let end = truncate_subsec(end);
        check_range(start, end)?;
        if self.page_size == 0 {
            return Err(CandelaError::InvalidArg("page size must be positive".into()));
        }
        Ok(QueryDescriptor {
            symbol,
            start,
            end,
            interval: self.interval,
            page_size: self.page_size,
            format: self.format,
        })
    }
}
