use chrono::NaiveDateTime;
use serde::Serialize;

use crate::day::Day;

/// One timestamped production value for one energy source.
///
/// The value is kept as read, so it may be `NaN` when the export contained a
/// non-numeric cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub date: NaiveDateTime,
    pub source: String,
    pub value: f64,
}

impl Reading {
    pub fn new(date: NaiveDateTime, source: impl Into<String>, value: f64) -> Reading {
        Self {
            date,
            source: source.into(),
            value,
        }
    }

    pub fn day(&self) -> Day {
        Day::of(&self.date)
    }

    pub fn year(&self) -> i32 {
        self.day().year()
    }

    /// The value, if it is a finite number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.is_finite().then_some(self.value)
    }
}
