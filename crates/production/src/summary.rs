use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::classify::Classification;
use crate::classify::Sustainability;
use crate::error::SummaryError;
use crate::reading::Reading;

/// The production of one year split into renewable and non-renewable shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub per_source_total: BTreeMap<String, f64>,
    pub renewable_percent: f64,
    pub non_renewable_percent: f64,
    /// Sources that are in neither bucket. They still count towards the
    /// grand total.
    pub unclassified: Vec<String>,
}

impl YearSummary {
    pub fn grand_total(&self) -> f64 {
        self.per_source_total.values().sum()
    }

    /// The share of every source in the grand total, in percent rounded to one
    /// decimal place.
    pub fn per_source_percent(&self) -> BTreeMap<String, f64> {
        let grand_total = self.grand_total();

        self.per_source_total
            .iter()
            .map(|(source, total)| (source.clone(), percent(*total, grand_total)))
            .collect()
    }
}

/// Sums the numeric readings of `year` per source and derives the renewable
/// and non-renewable percentages.
///
/// Non-numeric values are left out entirely. A year whose values add up to
/// zero yields [`SummaryError::NoData`].
pub fn summarize(
    readings: &[Reading],
    year: i32,
    classification: &Classification,
) -> Result<YearSummary, SummaryError> {
    let mut per_source_total: BTreeMap<String, f64> = BTreeMap::new();

    for reading in readings.iter().filter(|r| r.year() == year) {
        if let Some(value) = reading.numeric_value() {
            *per_source_total.entry(reading.source.clone()).or_insert(0.0) += value;
        }
    }

    let grand_total: f64 = per_source_total.values().sum();
    if grand_total == 0.0 || !grand_total.is_finite() {
        return Err(SummaryError::NoData { year });
    }

    let mut renewable_total = 0.0;
    let mut non_renewable_total = 0.0;
    let mut unclassified = Vec::new();

    for (source, total) in &per_source_total {
        match classification.classify(source) {
            Some(Sustainability::Renewable) => renewable_total += total,
            Some(Sustainability::NonRenewable) => non_renewable_total += total,
            None if classification.is_strict() => {
                return Err(SummaryError::UnclassifiedSource {
                    source: source.clone(),
                });
            }
            None => {
                warn!(source = %source, year, "source is neither renewable nor non-renewable");
                unclassified.push(source.clone());
            }
        }
    }

    debug!(year, sources = per_source_total.len(), grand_total, "summarized year");

    Ok(YearSummary {
        year,
        per_source_total,
        renewable_percent: percent(renewable_total, grand_total),
        non_renewable_percent: percent(non_renewable_total, grand_total),
        unclassified,
    })
}

fn percent(part: f64, total: f64) -> f64 {
    round_to_tenth(part / total * 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
