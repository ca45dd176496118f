mod business;
mod calendar;
mod consts;
mod interval;
mod partition;
mod prelude;

pub use business::{BusinessDayOptions, age_on, business_days_between};
pub use calendar::{Weekday, days_in_month, is_leap_year};
pub use consts::*;
pub use interval::{DateInterval, RangeError};
pub use partition::{Partition, PartitionError, PartitionOptions, RangeSize, partition, partition_str};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar date (year, month, day) with no time-of-day or timezone.
///
/// Always valid: the year is within `MIN_YEAR..=MAX_YEAR` and the day exists
/// in its month. Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct CalendarDate {
    year:  u16,
    month: u8,
    day:   u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  MIN_YEAR,
        month: JANUARY,
        day:   MIN_DAY,
    };
    /// 9999-12-31
    pub const MAX: Self = Self {
        year:  MAX_YEAR,
        month: DECEMBER,
        day:   DAYS_IN_MONTH[DECEMBER as usize],
    };

    /// Creates a date, validating every component.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `InvalidMonth` or `InvalidDay` for
    /// the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year (1..=9999)
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, starting at 1
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (negative before it).
    pub const fn day_number(&self) -> i64 {
        calendar::days_from_civil(self.year, self.month, self.day)
    }

    /// Date for a day number, or `None` outside `MIN..=MAX`.
    pub fn from_day_number(days: i64) -> Option<Self> {
        if days < Self::MIN.day_number() || days > Self::MAX.day_number() {
            return None;
        }
        let (year, month, day) = calendar::civil_from_days(days);
        let year = u16::try_from(year).ok()?;
        Some(Self { year, month, day })
    }

    /// Moves the date by `days` (negative moves backwards).
    /// Returns `None` if the result leaves the supported calendar.
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        Self::from_day_number(self.day_number().checked_add(days)?)
    }

    /// Moves the date back by `days`, or `None` outside the supported calendar.
    pub fn checked_sub_days(self, days: i64) -> Option<Self> {
        Self::from_day_number(self.day_number().checked_sub(days)?)
    }

    /// The following day, or `None` at `MAX`
    pub fn succ(self) -> Option<Self> {
        self.checked_add_days(1)
    }

    /// The preceding day, or `None` at `MIN`
    pub fn pred(self) -> Option<Self> {
        self.checked_sub_days(1)
    }

    /// Signed number of days from `self` to `other`.
    pub const fn days_until(&self, other: &Self) -> i64 {
        other.day_number() - self.day_number()
    }

    /// Day of the week this date falls on
    pub const fn weekday(&self) -> Weekday {
        Weekday::from_day_number(self.day_number())
    }

    /// True when the date's year has a February 29
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Splits `[self, end]` into chunks of at most `size` days.
    pub fn partition_until(self, end: Self, size: RangeSize) -> Partition {
        Partition::new(self, end, size)
    }

    /// Parses one fixed-width numeric field, rejecting signs and blanks.
    fn parse_field<T: FromStr>(text: &str, field: &str) -> Result<T, ParseError> {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(text.to_owned()));
        }
        field.parse::<T>().map_err(|_| ParseError::InvalidFormat(text.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        // No padding or trailing text is tolerated
        if s.len() != DATE_TEXT_LEN {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        // Exactly YYYY-MM-DD: two separators, three zero-padded fields
        let mut parts = s.split(DATE_SEPARATOR);
        let (Some(year), Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        let year = Self::parse_field::<u16>(s, year)?;
        let month = Self::parse_field::<u8>(s, month)?;
        let day = Self::parse_field::<u8>(s, day)?;

        Self::new(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<CalendarDate> for (u16, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        (date.year, date.month, date.day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
