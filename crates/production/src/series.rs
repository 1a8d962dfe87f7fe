use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;
use serde::Serializer;
use tracing::debug;

use crate::day::Day;
use crate::reading::Reading;

/// One point on the chart's x axis.
///
/// Every real label is the start of a calendar day. A label with a non-zero
/// hour offset is only ever synthesized so that a single day still renders as
/// a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    day: Day,
    hour: u32,
}

impl Label {
    pub fn new(day: Day) -> Label {
        Self { day, hour: 0 }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn is_synthetic(&self) -> bool {
        self.hour != 0
    }

    fn one_hour_later(&self) -> Label {
        Self {
            day: self.day,
            hour: self.hour + 1,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.hour == 0 {
            Display::fmt(&self.day, f)
        } else {
            write!(f, "{}T{:02}:00", self.day, self.hour)
        }
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Chart-ready production values: one value per source for every label.
///
/// Every series has exactly as many values as there are labels; a source
/// without a reading on a given day holds an explicit zero there.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregatedSeries {
    pub labels: Vec<Label>,
    #[serde(rename = "seriesBySource")]
    pub series_by_source: BTreeMap<String, Vec<f64>>,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.series_by_source.keys().map(String::as_str)
    }

    pub fn series(&self, source: &str) -> Option<&[f64]> {
        self.series_by_source.get(source).map(Vec::as_slice)
    }
}

/// Reduces readings to one value per `(day, source)` pair.
///
/// When several readings share a pair, the first one in input order is used.
/// Non-numeric values become zero but still occupy their slot.
pub fn aggregate<'a, I>(readings: I) -> AggregatedSeries
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut sources: BTreeSet<&str> = BTreeSet::new();
    let mut days: BTreeSet<Day> = BTreeSet::new();
    let mut first_values: HashMap<(&str, Day), f64> = HashMap::new();

    for reading in readings {
        let day = reading.day();
        sources.insert(reading.source.as_str());
        days.insert(day);

        if let Entry::Vacant(entry) = first_values.entry((reading.source.as_str(), day)) {
            entry.insert(reading.value);
        }
    }

    let mut labels: Vec<Label> = days.iter().copied().map(Label::new).collect();

    let mut series_by_source: BTreeMap<String, Vec<f64>> = sources
        .iter()
        .map(|&source| {
            let values = days
                .iter()
                .map(|&day| {
                    first_values
                        .get(&(source, day))
                        .copied()
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0)
                })
                .collect();

            (source.to_owned(), values)
        })
        .collect();

    if labels.len() == 1 {
        let synthetic = labels[0].one_hour_later();
        labels.push(synthetic);

        for values in series_by_source.values_mut() {
            let value = values[0];
            values.push(value);
        }
    }

    debug!(
        labels = labels.len(),
        sources = series_by_source.len(),
        "aggregated readings"
    );

    AggregatedSeries {
        labels,
        series_by_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn reading(month: u32, day: u32, hour: u32, source: &str, value: f64) -> Reading {
        let date = NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Reading::new(date, source, value)
    }

    fn labels(series: &AggregatedSeries) -> Vec<String> {
        series.labels.iter().map(Label::to_string).collect()
    }

    #[test]
    fn labels_are_sorted_and_unique() {
        let readings = vec![
            reading(3, 5, 0, "Wind", 1.0),
            reading(3, 1, 0, "Wind", 2.0),
            reading(3, 5, 12, "Kernkraft", 3.0),
            reading(3, 3, 0, "Kernkraft", 4.0),
        ];

        let series = aggregate(&readings);

        assert_eq!(vec!["2024-03-01", "2024-03-03", "2024-03-05"], labels(&series));
    }

    #[test]
    fn missing_pairs_are_zero_filled() {
        let readings = vec![
            reading(3, 1, 0, "Wind", 2.0),
            reading(3, 2, 0, "Kernkraft", 7.0),
            reading(3, 3, 0, "Wind", 5.0),
        ];

        let series = aggregate(&readings);

        assert_eq!(Some(&[2.0, 0.0, 5.0][..]), series.series("Wind"));
        assert_eq!(Some(&[0.0, 7.0, 0.0][..]), series.series("Kernkraft"));
        for source in series.sources() {
            assert_eq!(series.labels.len(), series.series(source).unwrap().len());
        }
    }

    #[test]
    fn single_day_is_duplicated_one_hour_later() {
        let readings = vec![reading(3, 1, 0, "Wind", 10.0)];

        let series = aggregate(&readings);

        assert_eq!(vec!["2024-03-01", "2024-03-01T01:00"], labels(&series));
        assert_eq!(Some(&[10.0, 10.0][..]), series.series("Wind"));
        assert!(!series.labels[0].is_synthetic());
        assert!(series.labels[1].is_synthetic());
    }

    #[test]
    fn single_day_with_several_sources() {
        let readings = vec![
            reading(3, 1, 6, "Wind", 10.0),
            reading(3, 1, 9, "Kernkraft", 60.0),
        ];

        let series = aggregate(&readings);

        assert_eq!(2, series.labels.len());
        assert_eq!(Some(&[10.0, 10.0][..]), series.series("Wind"));
        assert_eq!(Some(&[60.0, 60.0][..]), series.series("Kernkraft"));
    }

    #[test]
    fn non_numeric_value_occupies_slot_as_zero() {
        let readings = vec![
            reading(3, 1, 0, "Kernkraft", f64::NAN),
            reading(3, 2, 0, "Kernkraft", 8.0),
        ];

        let series = aggregate(&readings);

        assert_eq!(Some(&[0.0, 8.0][..]), series.series("Kernkraft"));
    }

    #[test]
    fn first_reading_of_a_pair_wins() {
        let readings = vec![
            reading(3, 1, 0, "Wind", 1.0),
            reading(3, 1, 12, "Wind", 99.0),
            reading(3, 2, 0, "Wind", f64::NAN),
            reading(3, 2, 1, "Wind", 5.0),
        ];

        let series = aggregate(&readings);

        assert_eq!(Some(&[1.0, 0.0][..]), series.series("Wind"));
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let readings: Vec<Reading> = Vec::new();

        let series = aggregate(&readings);

        assert!(series.is_empty());
        assert!(series.series_by_source.is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let readings = vec![
            reading(3, 2, 0, "Wind", 1.5),
            reading(3, 1, 0, "Photovoltaik", f64::NAN),
            reading(3, 1, 0, "Wind", 0.25),
        ];

        let first = aggregate(&readings);
        let second = aggregate(&readings);

        assert_eq!(first.labels, second.labels);
        for (source, values) in &first.series_by_source {
            let other = &second.series_by_source[source];
            let bits: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
            let other_bits: Vec<u64> = other.iter().map(|v| v.to_bits()).collect();
            assert_eq!(bits, other_bits);
        }
    }

    #[test]
    fn series_serializes_with_string_labels() {
        let readings = vec![reading(3, 1, 0, "Wind", 10.0)];

        let json = serde_json::to_string(&aggregate(&readings)).unwrap();

        assert_eq!(
            r#"{"labels":["2024-03-01","2024-03-01T01:00"],"seriesBySource":{"Wind":[10.0,10.0]}}"#,
            json
        );
    }
}
