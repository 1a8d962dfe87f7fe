use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde::Serializer;

/// A local calendar day.
///
/// Readings are compared by their year, month and day fields rather than by
/// instant, so two readings taken at different times of the same day belong
/// to the same [`Day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Day(NaiveDate);

impl Day {
    /// Creates a day from its calendar fields. Returns `None` for dates that
    /// do not exist, such as February 30.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Day> {
        NaiveDate::from_ymd_opt(year, month, day).map(Day)
    }

    /// The calendar day that the local date time falls on.
    pub fn of(datetime: &NaiveDateTime) -> Day {
        Day(datetime.date())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month, starting from 1.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The day of the month, starting from 1.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The `(year, month)` pair of this day.
    pub fn year_month(&self) -> (i32, u32) {
        (self.year(), self.month())
    }

    /// The day `days` calendar days before this one, saturating at the
    /// earliest representable date.
    pub fn days_before(&self, days: u64) -> Day {
        Day(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The `(year, month)` pair preceding the given one. January wraps to
/// December of the previous year.
pub(crate) fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveTime;

    #[test]
    fn day_ignores_time_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let morning = date.and_time(NaiveTime::from_hms_opt(0, 15, 0).unwrap());
        let evening = date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());

        assert_eq!(Day::of(&morning), Day::of(&evening));
    }

    #[test]
    fn day_renders_canonical_string() {
        let day = Day::from_ymd(2024, 3, 9).unwrap();

        assert_eq!("2024-03-09", day.to_string());
        assert_eq!((2024, 3), day.year_month());
        assert_eq!(9, day.day());
    }

    #[test]
    fn days_before_crosses_month_and_year() {
        let day = Day::from_ymd(2025, 1, 2).unwrap();

        assert_eq!(Day::from_ymd(2024, 12, 30).unwrap(), day.days_before(3));
    }

    #[test]
    fn previous_month_wraps_january() {
        assert_eq!((2023, 12), previous_month((2024, 1)));
        assert_eq!((2024, 6), previous_month((2024, 7)));
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(Day::from_ymd(2023, 2, 29).is_none());
        assert!(Day::from_ymd(2024, 2, 29).is_some());
    }
}
