use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, INTERVAL_SEPARATOR, ParseError, Partition, RangeSize, prelude::*};

/// An inclusive span of calendar dates, `[start, end]`.
/// The start date is always less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateInterval {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date interval operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date interval: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing one of the dates.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid interval format.
    #[error("Invalid interval format: {0}")]
    InvalidFormat(String),
}

impl DateInterval {
    /// Creates a new interval with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day interval `[date, date]`
    pub const fn day(date: CalendarDate) -> Self {
        Self { start: date, end: date }
    }

    /// Builds an interval the caller has already ordered.
    pub(crate) const fn ordered(start: CalendarDate, end: CalendarDate) -> Self {
        debug_assert!(start.day_number() <= end.day_number());
        Self { start, end }
    }

    /// Returns the first day of the interval
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the last day of the interval (inclusive)
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    /// Number of days covered, counting both ends. Never zero.
    #[allow(clippy::cast_sign_loss)]
    pub const fn len_days(&self) -> u64 {
        // start <= end, so the difference is non-negative
        self.start.days_until(&self.end) as u64 + 1
    }

    /// True when `date` falls within the interval, ends included
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// True when the two intervals share at least one day
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when every day of `self` is also in `other`
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// True when `next` starts on the day after `self` ends
    pub fn is_followed_by(&self, next: &Self) -> bool {
        self.end.succ() == Some(next.start)
    }

    /// The interval's dates as `YYYY-MM-DD` strings
    pub fn to_strings(&self) -> (String, String) {
        (self.start.to_string(), self.end.to_string())
    }

    /// Splits this interval into consecutive chunks of at most `size` days.
    pub fn partition(&self, size: RangeSize) -> Partition {
        Partition::new(self.start, self.end, size)
    }

    /// Iterates every date in the interval in order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| d.succ().filter(|next| *next <= end))
    }
}

impl FromStr for DateInterval {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start_str, end_str)) = s.split_once(INTERVAL_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No interval separator found (expected '{INTERVAL_SEPARATOR}'): {s}"
            )));
        };
        if end_str.contains(INTERVAL_SEPARATOR) {
            let separator_count = s.matches(INTERVAL_SEPARATOR).count();
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{INTERVAL_SEPARATOR}' separators: expected 1, found {separator_count}"
            )));
        }

        // Whitespace around '/' is allowed; the dates themselves are strict
        let start = start_str.trim().parse::<CalendarDate>()?;
        let end = end_str.trim().parse::<CalendarDate>()?;

        Self::new(start, end)
    }
}

impl TryFrom<(CalendarDate, CalendarDate)> for DateInterval {
    type Error = RangeError;

    fn try_from((start, end): (CalendarDate, CalendarDate)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<DateInterval> for (CalendarDate, CalendarDate) {
    fn from(interval: DateInterval) -> Self {
        interval.dates()
    }
}

impl PartialOrd for DateInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then_with(|| self.end.cmp(&other.end))
    }
}

impl Serialize for DateInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
