// File: crates/chart-core/src/query.rs
// Summary: Query request URLs, request tokens and the collaborator traits at the I/O edge.

use std::fmt;

use crate::error::FetchError;
use crate::scene::{Scene, SceneChange};
use crate::text::elide;

/// Identifies one issued query; later tokens compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub(crate) u64);

impl RequestToken {
    pub fn get(self) -> u64 { self.0 }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the caller needs to fetch a result set and show where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    pub token: RequestToken,
    pub url: String,
    /// `url` elided for display.
    pub display: String,
}

/// `{endpoint}?cmd=query&q={query}` with the query percent-encoded.
pub fn request_url(endpoint: &str, query: &str) -> String {
    format!("{endpoint}?cmd=query&q={}", urlencoding::encode(query))
}

pub fn display_url(url: &str, max_chars: usize) -> String {
    elide(url, max_chars, " ...")
}

pub fn truncate_error(message: &str, max_chars: usize) -> String {
    elide(message, max_chars, "...")
}

/// Fetches a raw TSV payload.
pub trait QuerySource {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError>;
}

/// Presentation surface a chart instance reports to.
pub trait ChartHost {
    fn show_request_link(&mut self, href: &str, text: &str);
    fn alert(&mut self, message: &str);
    fn present(&mut self, scene: &Scene, changes: &[SceneChange]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_encoded() {
        assert_eq!(
            request_url("sql", "select a, b from t where c = 'x&y'"),
            "sql?cmd=query&q=select%20a%2C%20b%20from%20t%20where%20c%20%3D%20%27x%26y%27"
        );
    }

    #[test]
    fn long_urls_and_errors_are_cut() {
        let url = "x".repeat(60);
        assert_eq!(display_url(&url, 50), format!("{} ...", "x".repeat(50)));
        assert_eq!(display_url("short", 50), "short");
        assert_eq!(truncate_error(&"e".repeat(500), 400).len(), 403);
    }
}
