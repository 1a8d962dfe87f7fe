use stromschau_production::ProductionData;
use stromschau_production::classify::Classification;
use stromschau_production::session::Session;
use tracing::info;
use tracing::warn;

use crate::cli::SourceArgs;
use crate::error::CliError;

/// Reads the export and the classification table into a session. `strict`
/// makes the table reject unknown sources even if its file does not.
pub(crate) fn open_session(source: &SourceArgs, strict: bool) -> Result<Session, CliError> {
    let classification = match source.classification {
        Some(ref path) => Classification::from_path(path)?,
        None => Classification::default(),
    };
    let classification = if strict {
        classification.strict(true)
    } else {
        classification
    };

    let loaded = ProductionData::open(&source.path)?.load()?;

    if !loaded.row_errors.is_empty() {
        warn!(
            skipped = loaded.row_errors.len(),
            "some rows of `{}` could not be read",
            source.path.display()
        );
    }
    info!(readings = loaded.readings.len(), "export loaded");

    Ok(Session::new(loaded.readings, classification))
}
