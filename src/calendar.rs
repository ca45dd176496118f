//! Proleptic Gregorian arithmetic on plain integers.
//!
//! Day numbers count days since 1970-01-01 (day 0). The conversions follow
//! Howard Hinnant's `days_from_civil` / `civil_from_days` algorithms, which
//! shift the year to start in March so February's length only ever affects
//! the last day of the shifted year.

use crate::consts::{
    CENTURY_CYCLE, DAYS_FROM_ERA_START_TO_UNIX_EPOCH, DAYS_IN_MONTH, DAYS_PER_ERA, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::prelude::*;

/// True for Gregorian leap years
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Day number of a valid (year, month, day) triple.
pub(crate) const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let year = year as i64 - if month <= FEBRUARY { 1 } else { 0 };
    let month = month as i64;
    let era = year.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = year - era * GREGORIAN_CYCLE as i64;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - DAYS_FROM_ERA_START_TO_UNIX_EPOCH
}

/// Inverse of [`days_from_civil`]. The returned year is unbounded; callers
/// check it against the supported range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days + DAYS_FROM_ERA_START_TO_UNIX_EPOCH;
    let era = days.div_euclid(DAYS_PER_ERA);
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / (DAYS_PER_ERA - 1)) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    // both results are bounded: 1..=31 and 1..=12
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u8;
    let month = (if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 }) as u8;
    let year = year_of_era + era * GREGORIAN_CYCLE as i64 + if month <= FEBRUARY { 1 } else { 0 };
    (year, month, day)
}

/// Day of the week, Monday first (ISO 8601 numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday of a day number. 1970-01-01 was a Thursday.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) const fn from_day_number(days: i64) -> Self {
        Self::ALL[(days + 3).rem_euclid(7) as usize]
    }

    /// Saturday or Sunday
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2021,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_month_sum_to_year_length() {
        let common: u32 = (1..=12).map(|m| u32::from(days_in_month(2023, m))).sum();
        let leap: u32 = (1..=12).map(|m| u32::from(days_in_month(2024, m))).sum();
        assert_eq!(common, 365);
        assert_eq!(leap, 366);
    }

    #[test]
    fn test_days_from_civil_known_values() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(2020, 2, 29), 18_321);
        assert_eq!(days_from_civil(1, 1, 1), -719_162);
    }

    #[test]
    fn test_civil_from_days_inverts_across_leap_boundaries() {
        for (year, month, day) in [
            (1, 1, 1),
            (1600, 2, 29),
            (1900, 2, 28),
            (1900, 3, 1),
            (2000, 2, 29),
            (2020, 12, 31),
            (9999, 12, 31),
        ] {
            let days = days_from_civil(year, month, day);
            assert_eq!(civil_from_days(days), (i64::from(year), month, day));
        }
    }

    #[test]
    fn test_consecutive_day_numbers_walk_the_calendar() {
        let mut expected = (2019_i64, 12_u8, 1_u8);
        let start = days_from_civil(2019, 12, 1);
        for offset in 0..500 {
            assert_eq!(civil_from_days(start + offset), expected);
            let (y, m, d) = expected;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let max = days_in_month(y as u16, m);
            expected = if d < max {
                (y, m, d + 1)
            } else if m < 12 {
                (y, m + 1, 1)
            } else {
                (y + 1, 1, 1)
            };
        }
    }

    #[test]
    fn test_weekday_from_day_number() {
        assert_eq!(Weekday::from_day_number(0), Weekday::Thursday);
        assert_eq!(Weekday::from_day_number(-1), Weekday::Wednesday);
        assert_eq!(Weekday::from_day_number(days_from_civil(2024, 1, 1)), Weekday::Monday);
        assert_eq!(Weekday::from_day_number(days_from_civil(2021, 1, 31)), Weekday::Sunday);
    }

    #[test]
    fn test_weekday_helpers() {
        assert!(Weekday::Saturday.is_weekend());
        assert!(Weekday::Sunday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
        assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
    }
}
