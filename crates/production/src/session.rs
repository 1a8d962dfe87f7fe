use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::classify::Classification;
use crate::error::SummaryError;
use crate::reading::Reading;
use crate::series::AggregatedSeries;
use crate::series::aggregate;
use crate::summary::YearSummary;
use crate::summary::summarize;
use crate::window::FilterWindow;
use crate::window::filter;

/// The state of one dashboard run: the readings loaded at startup and the
/// table used to classify their sources.
///
/// The readings are never modified after the session is created; every
/// selection is computed from scratch.
#[derive(Debug, Clone)]
pub struct Session {
    readings: Vec<Reading>,
    classification: Classification,
}

impl Session {
    pub fn new(readings: Vec<Reading>, classification: Classification) -> Session {
        Self {
            readings,
            classification,
        }
    }

    /// The distinct years that have readings, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.readings
            .iter()
            .map(Reading::year)
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect()
    }

    /// The chart series of the readings within `window`.
    pub fn select(&self, window: FilterWindow, reference_now: NaiveDateTime) -> AggregatedSeries {
        aggregate(filter(&self.readings, window, reference_now))
    }

    /// Like [`Session::select`], but takes the window as a selector name. An
    /// unknown selector selects nothing.
    pub fn select_by_name(
        &self,
        selector: &str,
        year: Option<i32>,
        reference_now: NaiveDateTime,
    ) -> AggregatedSeries {
        match FilterWindow::from_selector(selector, year) {
            Ok(window) => self.select(window, reference_now),
            Err(error) => {
                warn!(%error, "selecting nothing");
                AggregatedSeries::default()
            }
        }
    }

    pub fn year_summary(&self, year: i32) -> Result<YearSummary, SummaryError> {
        summarize(&self.readings, year, &self.classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn session() -> Session {
        let readings = vec![
            Reading::new(at(2024, 2, 1), "Wind", 10.0),
            Reading::new(at(2023, 5, 1), "Wind", 30.0),
            Reading::new(at(2023, 5, 1), "Kernkraft", 70.0),
            Reading::new(at(2024, 2, 2), "Kernkraft", f64::NAN),
            Reading::new(at(2022, 11, 30), "Thermische", 1.0),
        ];

        Session::new(readings, Classification::default())
    }

    #[test]
    fn years_are_sorted_and_unique() {
        assert_eq!(vec![2022, 2023, 2024], session().years());
    }

    #[test]
    fn select_filters_then_aggregates() {
        let series = session().select(FilterWindow::CurrentMonth, at(2024, 2, 15));

        assert_eq!(2, series.labels.len());
        assert_eq!(Some(&[10.0, 0.0][..]), series.series("Wind"));
        assert_eq!(Some(&[0.0, 0.0][..]), series.series("Kernkraft"));
    }

    #[test]
    fn unknown_selector_selects_nothing() {
        let series = session().select_by_name("fortnight", None, at(2024, 2, 15));

        assert!(series.is_empty());
        assert!(series.series_by_source.is_empty());
    }

    #[test]
    fn year_selector_without_year_selects_nothing() {
        let series = session().select_by_name("year", None, at(2024, 2, 15));

        assert!(series.is_empty());
    }

    #[test]
    fn select_by_name_for_a_year() {
        let series = session().select_by_name("year", Some(2023), at(2024, 2, 15));

        assert_eq!(2, series.labels.len());
        assert_eq!(Some(&[30.0, 30.0][..]), series.series("Wind"));
    }

    #[test]
    fn year_summary_uses_session_table() {
        let session = session();

        let summary = session.year_summary(2023).unwrap();
        assert_eq!(30.0, summary.renewable_percent);
        assert_eq!(70.0, summary.non_renewable_percent);

        assert_eq!(Err(SummaryError::NoData { year: 2021 }), session.year_summary(2021));
    }
}
