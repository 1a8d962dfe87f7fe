//! Reading and aggregating electricity production exports.
//!
//! The crate turns the rows of a `date, source, value` CSV export into
//! [`reading::Reading`] values and reduces them into:
//!
//! - per-day, per-source chart series for a time window ([`series::aggregate`])
//! - the renewable and non-renewable split of a year ([`summary::summarize`])

mod day;

pub mod classify;
pub mod error;
pub mod read;
pub mod reading;
pub mod series;
pub mod session;
pub mod summary;
pub mod window;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use crate::day::Day;

use crate::error::ReadError;
use crate::read::LoadedReadings;

/// A production export on disk.
#[derive(Debug)]
pub struct ProductionData<'a> {
    pub path: &'a Path,
    file: File,
}

impl<'a> ProductionData<'a> {
    pub fn open(path: &'a Path) -> Result<Self, ReadError> {
        let file = File::open(path)?;

        Ok(Self { path, file })
    }

    /// Reads every reading of the export.
    pub fn load(self) -> Result<LoadedReadings, ReadError> {
        read::read_readings(BufReader::new(self.file))
    }
}
