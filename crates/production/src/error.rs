use std::convert::From;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;
use std::sync::Arc;

/// The error type for reading production readings from a CSV export.
///
/// Row-level problems such as an unparseable date do not abort reading; they
/// are collected as [`crate::read::RowError`] values instead.
#[derive(Debug, Clone)]
pub enum ReadError {
    /// A [`std::io::Error`] encountered while opening or reading the export.
    Io(Arc<io::Error>),

    /// A [`csv::Error`] encountered while reading the header row.
    Csv(Arc<csv::Error>),

    /// The header row has fewer than the three required columns.
    MissingColumns { found: usize },
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let read_error = "read error:";

        match self {
            ReadError::Io(error) => write!(f, "{read_error} I/O error: {error}"),
            ReadError::Csv(error) => write!(f, "{read_error} CSV error: {error}"),
            ReadError::MissingColumns { found } => write!(
                f,
                "{read_error} expected the `date`, `source` and `value` columns, but found only {found} column(s)"
            ),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::Io(error) => Some(error),
            ReadError::Csv(error) => Some(error),
            ReadError::MissingColumns { .. } => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        ReadError::Io(Arc::new(error))
    }
}

impl From<csv::Error> for ReadError {
    fn from(error: csv::Error) -> Self {
        ReadError::Csv(Arc::new(error))
    }
}

/// The error type for parsing a time window selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowParseError {
    /// The selector is not one of the known window names.
    Unrecognized { selector: String },

    /// The `year` selector was chosen without a year value.
    MissingYear,
}

impl Display for WindowParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let window_error = "window error:";

        match self {
            WindowParseError::Unrecognized { selector } => {
                write!(f, "{window_error} unrecognized window selector \"{selector}\"")
            }
            WindowParseError::MissingYear => {
                write!(f, "{window_error} the year window requires a year value")
            }
        }
    }
}

impl Error for WindowParseError {}

/// The error type for summarizing a year of readings.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// The year has no numeric readings, or they add up to zero, so no
    /// percentages can be computed.
    NoData { year: i32 },

    /// A source is not part of the classification table and the table is
    /// strict.
    UnclassifiedSource { source: String },
}

impl Display for SummaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary_error = "summary error:";

        match self {
            SummaryError::NoData { year } => {
                write!(f, "{summary_error} there is no production data for {year}")
            }
            SummaryError::UnclassifiedSource { source } => write!(
                f,
                "{summary_error} the \"{source}\" source is neither renewable nor non-renewable"
            ),
        }
    }
}

impl Error for SummaryError {}

/// The error type for loading a classification table.
#[derive(Debug)]
pub enum ClassificationError {
    /// A [`std::io::Error`] encountered while reading the table file.
    Io(io::Error),

    /// A [`serde_json::Error`] encountered while deserializing the table.
    Json(serde_json::Error),

    /// The same source was listed in both buckets.
    Conflict { source: String },
}

impl Display for ClassificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let classification_error = "classification error:";

        match self {
            ClassificationError::Io(error) => {
                write!(f, "{classification_error} I/O error: {error}")
            }
            ClassificationError::Json(error) => {
                write!(f, "{classification_error} JSON error: {error}")
            }
            ClassificationError::Conflict { source } => write!(
                f,
                "{classification_error} the \"{source}\" source is listed as both renewable and non-renewable"
            ),
        }
    }
}

impl Error for ClassificationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassificationError::Io(error) => Some(error),
            ClassificationError::Json(error) => Some(error),
            ClassificationError::Conflict { .. } => None,
        }
    }
}

impl From<io::Error> for ClassificationError {
    fn from(error: io::Error) -> Self {
        ClassificationError::Io(error)
    }
}

impl From<serde_json::Error> for ClassificationError {
    fn from(error: serde_json::Error) -> Self {
        ClassificationError::Json(error)
    }
}
