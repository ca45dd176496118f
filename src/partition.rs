//! Bounded interval partitioning.
//!
//! Splits an inclusive date interval into consecutive chunks of at most
//! `RangeSize` days. Chunks are emitted oldest first, never overlap, leave no
//! gaps, and all but the last one are exactly `RangeSize` days long.

use std::iter::FusedIterator;
use std::num::NonZeroU32;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DEFAULT_RANGE_SIZE, DateInterval, ParseError};

/// Errors from the textual partitioning entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    /// One of the dates is not `YYYY-MM-DD` or does not exist.
    #[error(transparent)]
    Format(#[from] ParseError),

    /// Chunk size is zero, negative, or too large.
    #[error("Invalid range size: {0} (must be a positive number of days up to {max})", max = u32::MAX)]
    InvalidRangeSize(i64),
}

/// Number of days per chunk. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct RangeSize(NonZeroU32);

impl RangeSize {
    /// Validates a day count.
    ///
    /// # Errors
    /// Returns `PartitionError::InvalidRangeSize` if `days <= 0` or `days > u32::MAX`.
    pub fn new(days: i64) -> Result<Self, PartitionError> {
        u32::try_from(days)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(PartitionError::InvalidRangeSize(days))
    }

    /// Returns the day count as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    const fn days(self) -> i64 {
        self.0.get() as i64
    }
}

impl Default for RangeSize {
    fn default() -> Self {
        // DEFAULT_RANGE_SIZE is non-zero
        Self(NonZeroU32::new(DEFAULT_RANGE_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<i64> for RangeSize {
    type Error = PartitionError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<NonZeroU32> for RangeSize {
    fn from(days: NonZeroU32) -> Self {
        Self(days)
    }
}

impl From<RangeSize> for u32 {
    fn from(size: RangeSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for RangeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partitioning settings, suitable for embedding in a caller's config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionOptions {
    /// Maximum chunk length in days
    pub range_size: RangeSize,
}

impl PartitionOptions {
    /// Options with the given chunk size
    pub const fn with_range_size(range_size: RangeSize) -> Self {
        Self { range_size }
    }

    /// Splits `[start, end]` using these options.
    pub fn partition(&self, start: CalendarDate, end: CalendarDate) -> Vec<DateInterval> {
        partition(start, end, self.range_size)
    }
}

/// Lazy iterator over the chunks of `[start, end]`.
///
/// Yields nothing when `start > end`.
#[derive(Debug, Clone)]
pub struct Partition {
    cursor: Option<CalendarDate>,
    end:    CalendarDate,
    size:   RangeSize,
}

impl Partition {
    /// Starts iterating the chunks of `[start, end]`.
    pub fn new(start: CalendarDate, end: CalendarDate, size: RangeSize) -> Self {
        debug!("event=partition start={start} end={end} range_size={size}");
        Self {
            cursor: (start <= end).then_some(start),
            end,
            size,
        }
    }

    /// Chunk size this iterator was built with
    pub const fn range_size(&self) -> RangeSize {
        self.size
    }

    fn remaining(&self) -> u64 {
        let Some(cursor) = self.cursor else {
            return 0;
        };
        // cursor <= end while iteration is live
        let span = cursor.days_until(&self.end).unsigned_abs() + 1;
        span.div_ceil(u64::from(self.size.get()))
    }
}

impl Iterator for Partition {
    type Item = DateInterval;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        // Past the end of the calendar means past `end` too
        let chunk_end = cursor
            .checked_add_days(self.size.days() - 1)
            .map_or(self.end, |d| d.min(self.end));

        self.cursor = if chunk_end < self.end { chunk_end.succ() } else { None };
        Some(DateInterval::ordered(cursor, chunk_end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Partition {}

impl FusedIterator for Partition {}

/// Splits `[start, end]` into consecutive intervals of at most `size` days.
///
/// Returns an empty vector when `start > end`. Concatenating the result
/// reconstructs `[start, end]` exactly.
pub fn partition(start: CalendarDate, end: CalendarDate, size: RangeSize) -> Vec<DateInterval> {
    Partition::new(start, end, size).collect()
}

/// Text-in, text-out form of [`partition`].
///
/// Both dates must be `YYYY-MM-DD`. Every argument is validated before any
/// output is produced.
///
/// # Errors
/// Returns `PartitionError::Format` for a malformed date and
/// `PartitionError::InvalidRangeSize` for `range_size <= 0`.
pub fn partition_str(start: &str, end: &str, range_size: i64) -> Result<Vec<(String, String)>, PartitionError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let size = RangeSize::new(range_size).inspect_err(|_| {
        warn!("event=partition status=rejected reason=range_size range_size={range_size}");
    })?;

    Ok(Partition::new(start, end, size).map(|chunk| chunk.to_strings()).collect())
}

fn parse_date(text: &str) -> Result<CalendarDate, PartitionError> {
    text.parse::<CalendarDate>().map_err(|err| {
        warn!("event=partition status=rejected reason=format input={text:?} error=\"{err}\"");
        PartitionError::Format(err)
    })
}
