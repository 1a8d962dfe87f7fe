use std::fmt::Display;

use stromschau_production::error::ClassificationError;
use stromschau_production::error::ReadError;
use stromschau_production::error::SummaryError;
use stromschau_vis::error::VisError;

use crate::fetch::error::FetchError;

#[derive(Debug)]
pub(crate) enum CliError {
    Fetch(FetchError),
    Read(ReadError),
    Classification(ClassificationError),
    Summary(SummaryError),
    Vis(VisError),
    Path(String),
    MissingYear,
}

impl From<FetchError> for CliError {
    fn from(error: FetchError) -> Self {
        CliError::Fetch(error)
    }
}

impl From<ReadError> for CliError {
    fn from(error: ReadError) -> Self {
        CliError::Read(error)
    }
}

impl From<ClassificationError> for CliError {
    fn from(error: ClassificationError) -> Self {
        CliError::Classification(error)
    }
}

impl From<SummaryError> for CliError {
    fn from(error: SummaryError) -> Self {
        CliError::Summary(error)
    }
}

impl From<VisError> for CliError {
    fn from(error: VisError) -> Self {
        CliError::Vis(error)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cli_error = "CLI error:";

        match self {
            CliError::Fetch(error) => write!(f, "{cli_error} {error}"),
            CliError::Read(error) => write!(f, "{cli_error} {error}"),
            CliError::Classification(error) => write!(f, "{cli_error} {error}"),
            CliError::Summary(error) => write!(f, "{cli_error} {error}"),
            CliError::Vis(error) => write!(f, "{cli_error} {error}"),
            CliError::Path(error) => write!(f, "{cli_error} {error}"),
            CliError::MissingYear => {
                write!(f, "{cli_error} the `year` window requires the `--year` option")
            }
        }
    }
}
