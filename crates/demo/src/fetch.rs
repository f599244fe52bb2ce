// File: crates/demo/src/fetch.rs
// Summary: Query sources for the CLI: the HTTP endpoint and local TSV files.

use std::path::PathBuf;

use querychart_core::{FetchError, QuerySource};
use reqwest::blocking::Client;

/// Fetches result sets from the SQL endpoint over HTTP.
pub(crate) struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl QuerySource for HttpSource {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().map_err(|e| FetchError::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::new(Some(status.as_u16()), e.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(FetchError::new(Some(status.as_u16()), body))
        }
    }
}

/// Serves a saved result set; the request URL is ignored.
pub(crate) struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl QuerySource for FileSource {
    fn fetch(&mut self, _url: &str) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| FetchError::transport(format!("failed to read '{}': {e}", self.path.display())))
    }
}
