use std::fmt::Display;
use std::fmt::Formatter;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::day::Day;
use crate::day::previous_month;
use crate::error::WindowParseError;
use crate::reading::Reading;

/// The number of days subtracted from the reference day for the
/// [`FilterWindow::RecentDay`] window. The export lags behind real time, so
/// the most recent complete day is not today.
pub const RECENT_DAY_OFFSET: u64 = 3;

const RECENT_DAY: &str = "recentDay";
const CURRENT_MONTH: &str = "currentMonth";
const LAST_MONTH: &str = "lastMonth";
const YEAR: &str = "year";
const ALL: &str = "all";

/// A named time range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterWindow {
    RecentDay,
    CurrentMonth,
    LastMonth,
    Year(i32),
    All,
}

impl FilterWindow {
    /// Builds a window from a selector name as used by the dashboard
    /// (`recentDay`, `currentMonth`, `lastMonth`, `year`, `all`). Kebab-case
    /// spellings are accepted as well. The `year` value is only consulted for
    /// the `year` selector.
    pub fn from_selector(selector: &str, year: Option<i32>) -> Result<FilterWindow, WindowParseError> {
        let normalized = selector.trim().replace(['-', '_'], "").to_ascii_lowercase();

        match normalized.as_str() {
            "recentday" => Ok(FilterWindow::RecentDay),
            "currentmonth" => Ok(FilterWindow::CurrentMonth),
            "lastmonth" => Ok(FilterWindow::LastMonth),
            "year" => year.map(FilterWindow::Year).ok_or(WindowParseError::MissingYear),
            "all" => Ok(FilterWindow::All),
            _ => Err(WindowParseError::Unrecognized {
                selector: selector.to_owned(),
            }),
        }
    }

    /// The selector name of this window.
    pub fn selector(&self) -> &'static str {
        match self {
            FilterWindow::RecentDay => RECENT_DAY,
            FilterWindow::CurrentMonth => CURRENT_MONTH,
            FilterWindow::LastMonth => LAST_MONTH,
            FilterWindow::Year(_) => YEAR,
            FilterWindow::All => ALL,
        }
    }
}

impl Display for FilterWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterWindow::Year(year) => write!(f, "{YEAR} {year}"),
            window => f.write_str(window.selector()),
        }
    }
}

/// A predicate that decides whether a reading belongs to a window, resolved
/// against a fixed reference time.
#[derive(Debug, Clone, Copy)]
pub struct WindowFilter {
    window: FilterWindow,
    today: Day,
}

impl WindowFilter {
    pub fn new(window: FilterWindow, reference_now: NaiveDateTime) -> WindowFilter {
        Self {
            window,
            today: Day::of(&reference_now),
        }
    }

    pub fn matches(&self, reading: &Reading) -> bool {
        let day = reading.day();

        match self.window {
            FilterWindow::RecentDay => day == self.today.days_before(RECENT_DAY_OFFSET),
            FilterWindow::CurrentMonth => day.year_month() == self.today.year_month(),
            FilterWindow::LastMonth => day.year_month() == previous_month(self.today.year_month()),
            FilterWindow::Year(year) => day.year() == year,
            FilterWindow::All => true,
        }
    }
}

/// Selects the readings that belong to `window`, keeping their input order.
pub fn filter(
    readings: &[Reading],
    window: FilterWindow,
    reference_now: NaiveDateTime,
) -> Vec<&Reading> {
    let window_filter = WindowFilter::new(window, reference_now);
    let filtered: Vec<&Reading> = readings.iter().filter(|r| window_filter.matches(r)).collect();

    debug!(
        window = %window,
        total = readings.len(),
        selected = filtered.len(),
        "filtered readings"
    );

    filtered
}
