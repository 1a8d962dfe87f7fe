use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::warn;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;

pub(crate) struct ExportClient {
    client: Client,
}

impl ExportClient {
    pub fn new() -> Self {
        let client = Client::new();

        Self { client }
    }

    /// Downloads the export at `url` into `path`, replacing the file if it
    /// exists, and returns the number of bytes written.
    pub fn download(&self, url: &str, path: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        match response.status() {
            StatusCode::OK => store(&mut response, path),
            status_code => {
                let message = response.text()?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }
}

/// Copies `reader` into a `.part` file next to `path` and moves it over `path`
/// once the copy is complete. On failure `path` is left untouched.
fn store<R: Read>(reader: &mut R, path: &Path) -> Result<u64> {
    let partial_path = partial_path(path);

    match copy_into(reader, &partial_path) {
        Ok(bytes) => {
            fs::rename(&partial_path, path)?;
            Ok(bytes)
        }
        Err(error) => {
            if let Err(remove_error) = fs::remove_file(&partial_path) {
                warn!(
                    path = %partial_path.display(),
                    "removing the partial download failed: {remove_error}"
                );
            }
            Err(error.into())
        }
    }
}

fn copy_into<R: Read>(reader: &mut R, path: &Path) -> io::Result<u64> {
    let mut writer = File::create(path)?;
    let bytes = io::copy(reader, &mut writer)?;
    writer.flush()?;

    Ok(bytes)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(OsString::from).unwrap_or_default();
    file_name.push(".part");

    path.with_file_name(file_name)
}
