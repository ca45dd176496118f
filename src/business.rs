//! Working-day counting and age calculation on calendar dates.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateInterval};

/// Which ends of the window count towards [`business_days_between`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessDayOptions {
    pub include_start: bool,
    pub include_end:   bool,
}

impl Default for BusinessDayOptions {
    fn default() -> Self {
        Self {
            include_start: true,
            include_end:   true,
        }
    }
}

impl BusinessDayOptions {
    /// Counts neither endpoint
    pub const fn exclusive() -> Self {
        Self {
            include_start: false,
            include_end:   false,
        }
    }

    /// The window actually counted, or `None` when it is empty.
    fn window(self, start: CalendarDate, end: CalendarDate) -> Option<DateInterval> {
        let start = if self.include_start { Some(start) } else { start.succ() }?;
        let end = if self.include_end { Some(end) } else { end.pred() }?;
        DateInterval::new(start, end).ok()
    }
}

/// Counts Monday-to-Friday dates between `start` and `end` that are not holidays.
///
/// Endpoints are included according to `options`. An inverted or empty
/// window counts zero.
pub fn business_days_between(
    start: CalendarDate,
    end: CalendarDate,
    holidays: &[CalendarDate],
    options: BusinessDayOptions,
) -> u32 {
    let Some(window) = options.window(start, end) else {
        return 0;
    };
    let holidays: HashSet<CalendarDate> = holidays.iter().copied().collect();

    let count = window
        .days()
        .filter(|d| !d.weekday().is_weekend() && !holidays.contains(d))
        .count();
    debug!(
        "event=business_days window={window} holidays={} count={count}",
        holidays.len()
    );
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Whole years from `birth` to `on`.
///
/// Drops a year when `on` falls before the anniversary in its year. Negative
/// when `on` is before `birth`.
pub fn age_on(birth: CalendarDate, on: CalendarDate) -> i32 {
    let years = i32::from(on.year()) - i32::from(birth.year());
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_full_week() {
        // 2024-01-01 is a Monday
        let count = business_days_between(date("2024-01-01"), date("2024-01-07"), &[], BusinessDayOptions::default());
        assert_eq!(count, 5);
    }

    #[test]
    fn test_weekend_only() {
        let count = business_days_between(date("2024-01-06"), date("2024-01-07"), &[], BusinessDayOptions::default());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_holidays_are_skipped() {
        let holidays = [date("2024-01-01"), date("2024-01-06"), date("2024-01-01")];
        let count = business_days_between(
            date("2024-01-01"),
            date("2024-01-12"),
            &holidays,
            BusinessDayOptions::default(),
        );
        // ten weekdays, one weekday holiday; the Saturday holiday changes nothing
        assert_eq!(count, 9);
    }

    #[test]
    fn test_endpoint_options() {
        struct TestCase {
            options:     BusinessDayOptions,
            expected:    u32,
            description: &'static str,
        }

        // Monday 2024-01-01 through Friday 2024-01-05
        let cases = [
            TestCase {
                options:     BusinessDayOptions::default(),
                expected:    5,
                description: "both ends included",
            },
            TestCase {
                options:     BusinessDayOptions {
                    include_start: false,
                    include_end:   true,
                },
                expected:    4,
                description: "start excluded",
            },
            TestCase {
                options:     BusinessDayOptions {
                    include_start: true,
                    include_end:   false,
                },
                expected:    4,
                description: "end excluded",
            },
            TestCase {
                options:     BusinessDayOptions::exclusive(),
                expected:    3,
                description: "both ends excluded",
            },
        ];

        for case in &cases {
            let count = business_days_between(date("2024-01-01"), date("2024-01-05"), &[], case.options);
            assert_eq!(count, case.expected, "Unexpected count for: {}", case.description);
        }
    }

    #[test]
    fn test_empty_and_inverted_windows() {
        let same_day = date("2024-01-03");
        assert_eq!(business_days_between(same_day, same_day, &[], BusinessDayOptions::default()), 1);
        assert_eq!(business_days_between(same_day, same_day, &[], BusinessDayOptions::exclusive()), 0);
        assert_eq!(
            business_days_between(date("2024-01-10"), date("2024-01-01"), &[], BusinessDayOptions::default()),
            0
        );
        assert_eq!(
            business_days_between(CalendarDate::MAX, CalendarDate::MAX, &[], BusinessDayOptions::exclusive()),
            0
        );
    }

    #[test]
    fn test_across_leap_february() {
        // Feb 2024 has 29 days, 21 of them weekdays
        let count = business_days_between(date("2024-02-01"), date("2024-02-29"), &[], BusinessDayOptions::default());
        assert_eq!(count, 21);
    }

    #[test]
    fn test_options_serde_defaults() {
        let options: BusinessDayOptions = serde_json::from_str(r#"{"include_end": false}"#).unwrap();
        assert_eq!(
            options,
            BusinessDayOptions {
                include_start: true,
                include_end:   false,
            }
        );
    }

    #[test]
    fn test_age_on() {
        let birth = date("1990-06-15");
        assert_eq!(age_on(birth, date("2020-06-14")), 29);
        assert_eq!(age_on(birth, date("2020-06-15")), 30);
        assert_eq!(age_on(birth, date("2020-12-31")), 30);
        assert_eq!(age_on(birth, birth), 0);
        assert_eq!(age_on(birth, date("1990-01-01")), -1);
    }

    #[test]
    fn test_age_on_leap_day_birthday() {
        let birth = date("2000-02-29");
        assert_eq!(age_on(birth, date("2021-02-28")), 20);
        assert_eq!(age_on(birth, date("2021-03-01")), 21);
        assert_eq!(age_on(birth, date("2024-02-29")), 24);
    }
}
