use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Read;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use csv::StringRecord;
use csv::StringRecordsIntoIter;
use tracing::warn;

use crate::error::ReadError;
use crate::reading::Reading;

const DATE_COLUMN: &str = "date";
const SOURCE_COLUMN: &str = "source";
const VALUE_COLUMN: &str = "value";

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the export that could not be turned into a [`Reading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// The 1-based line number, counting the header row.
    pub line: usize,
    pub message: String,
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Every reading of an export together with the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedReadings {
    pub readings: Vec<Reading>,
    pub row_errors: Vec<RowError>,
}

/// The positions of the `date`, `source` and `value` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    source: usize,
    value: usize,
}

impl Columns {
    /// Locates the columns by name. Exports that use other header names, such
    /// as the German `Datum, Energietraeger, Produktion_GWh`, are read by
    /// position instead.
    fn resolve(headers: &StringRecord) -> Result<Columns, ReadError> {
        if headers.len() < 3 {
            return Err(ReadError::MissingColumns {
                found: headers.len(),
            });
        }

        let position = |name: &str| {
            headers
                .iter()
                .position(|header| normalize_header_name(header) == name)
        };

        match (position(DATE_COLUMN), position(SOURCE_COLUMN), position(VALUE_COLUMN)) {
            (Some(date), Some(source), Some(value)) => Ok(Columns {
                date,
                source,
                value,
            }),
            _ => Ok(Columns {
                date: 0,
                source: 1,
                value: 2,
            }),
        }
    }
}

/// An iterator that yields a [`Reading`] for every data row of a CSV export.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ReadingRecords<R> {
    records: StringRecordsIntoIter<R>,
    columns: Columns,
    line: usize,
}

impl<R: Read> ReadingRecords<R> {
    /// Reads the header row and prepares to yield the data rows.
    pub fn new(reader: R) -> Result<ReadingRecords<R>, ReadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::resolve(reader.headers()?)?;

        Ok(Self {
            records: reader.into_records(),
            columns,
            line: 1,
        })
    }

    fn parse_record(&self, record: &StringRecord) -> Result<Reading, String> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| format!("missing `{name}` value"))
        };

        let date = parse_date(field(self.columns.date, DATE_COLUMN)?)?;
        let source = field(self.columns.source, SOURCE_COLUMN)?;
        if source.is_empty() {
            return Err(format!("missing `{SOURCE_COLUMN}` value"));
        }
        let value = parse_value(field(self.columns.value, VALUE_COLUMN)?);

        Ok(Reading::new(date, source, value))
    }
}

impl<R: Read> Iterator for ReadingRecords<R> {
    type Item = Result<Reading, RowError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.line += 1;

        let item = match result {
            Ok(record) => self.parse_record(&record),
            Err(error) => Err(format!("CSV parse error: {error}")),
        };

        Some(item.map_err(|message| RowError {
            line: self.line,
            message,
        }))
    }
}

/// Reads every row of a CSV export. Rows that cannot be read are skipped and
/// reported in [`LoadedReadings::row_errors`].
pub fn read_readings<R: Read>(reader: R) -> Result<LoadedReadings, ReadError> {
    let mut loaded = LoadedReadings::default();

    for item in ReadingRecords::new(reader)? {
        match item {
            Ok(reading) => loaded.readings.push(reading),
            Err(error) => {
                warn!(line = error.line, message = %error.message, "skipping row");
                loaded.row_errors.push(error);
            }
        }
    }

    Ok(loaded)
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

/// Parses a local date time. Plain dates start at midnight and timestamps with
/// an offset are converted to local time.
fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(datetime);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime.with_timezone(&Local).naive_local());
    }

    Err(format!("invalid date \"{s}\""))
}

/// Parses a production value. Anything that is not a number becomes `NaN`.
fn parse_value(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crate::day::Day;

    #[test]
    fn read_named_columns() {
        let csv = "value,date,source\n12.5,2024-01-02,Wind\n3,2024-01-03T06:30:00,Kernkraft\n";

        let loaded = read_readings(Cursor::new(csv)).unwrap();

        assert_eq!(2, loaded.readings.len());
        assert!(loaded.row_errors.is_empty());

        let first = &loaded.readings[0];
        assert_eq!("Wind", first.source);
        assert_eq!(12.5, first.value);
        assert_eq!(Day::from_ymd(2024, 1, 2).unwrap(), first.day());

        let second = &loaded.readings[1];
        assert_eq!("Kernkraft", second.source);
        assert_eq!(Day::from_ymd(2024, 1, 3).unwrap(), second.day());
    }

    #[test]
    fn read_positional_columns_with_bom() {
        let csv = "\u{feff}Datum,Energietraeger,Produktion_GWh\n2024-01-01,Flusskraft,20.4\n";

        let loaded = read_readings(Cursor::new(csv)).unwrap();

        assert_eq!(1, loaded.readings.len());
        assert_eq!("Flusskraft", loaded.readings[0].source);
        assert_eq!(20.4, loaded.readings[0].value);
    }

    #[test]
    fn non_numeric_value_is_kept_as_nan() {
        let csv = "date,source,value\n2024-01-01,Kernkraft,n/a\n2024-01-01,Wind,\n";

        let loaded = read_readings(Cursor::new(csv)).unwrap();

        assert_eq!(2, loaded.readings.len());
        assert!(loaded.readings.iter().all(|r| r.value.is_nan()));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "date,source,value\n01.02.2024,Wind,1\n2024-01-02,Wind,2\n2024-01-03\n";

        let loaded = read_readings(Cursor::new(csv)).unwrap();

        assert_eq!(1, loaded.readings.len());
        assert_eq!(
            vec![2, 4],
            loaded.row_errors.iter().map(|e| e.line).collect::<Vec<_>>()
        );
        assert_eq!("line 2: invalid date \"01.02.2024\"", loaded.row_errors[0].to_string());
    }

    #[test]
    fn too_few_columns_is_an_error() {
        let csv = "date,value\n2024-01-01,1\n";

        let result = read_readings(Cursor::new(csv));

        assert!(matches!(result, Err(ReadError::MissingColumns { found: 2 })));
    }

    #[test]
    fn rfc3339_dates_are_read() {
        assert!(parse_date("2024-01-02T10:00:00+01:00").is_ok());
        assert!(parse_date("2024-01-02 10:00:00").is_ok());
        assert!(parse_date("yesterday").is_err());
    }
}
