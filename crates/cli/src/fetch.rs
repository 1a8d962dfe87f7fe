mod client;

pub(crate) mod error;

use std::env;

use tracing::info;

use crate::cli::DEFAULT_EXPORT_FILE_NAME;
use crate::cli::FetchArgs;
use crate::error::CliError;
use crate::fetch::client::ExportClient;

pub(crate) fn fetch(args: FetchArgs) -> Result<(), CliError> {
    let path = match args.file {
        Some(file) => file,
        None => env::current_dir()
            .map_err(|e| CliError::Path(e.to_string()))?
            .join(DEFAULT_EXPORT_FILE_NAME),
    };

    println!(
        "stromschau fetches the production export from: `{}` into: `{}`",
        args.url,
        path.display()
    );

    let client = ExportClient::new();
    let bytes = client.download(&args.url, &path)?;

    info!(bytes, path = %path.display(), "export downloaded");
    Ok(())
}
