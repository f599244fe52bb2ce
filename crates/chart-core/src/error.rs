// File: crates/chart-core/src/error.rs
// Summary: Error and Result types shared by every pipeline stage.

use thiserror::Error;

use crate::schema::AxisKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Everything that can stop a query result from becoming a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The payload is not valid tab-separated data.
    #[error("malformed TSV payload: {0}")]
    Tsv(#[from] csv::Error),

    /// A row does not have the same columns as the header.
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    /// The result set has no rows (or no columns).
    #[error("empty result set")]
    EmptyResult,

    /// An x value does not match the axis kind probed from the first row.
    #[error("row {row}: x value `{value}` is not {kind}")]
    XValue { row: usize, value: String, kind: AxisKind },

    /// Line charts need an ordered x axis; free text only works for bars.
    #[error("column `{key}` holds categorical values; use a bar chart")]
    CategoricalLineAxis { key: String },

    /// The query endpoint could not be reached or answered with an error.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A failed round trip to the query endpoint.
///
/// `body` carries the raw response text (the endpoint prints the SQL error
/// there) or the transport error message when no response arrived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{body}")]
pub struct FetchError {
    pub status: Option<u16>,
    pub body: String,
}

impl FetchError {
    pub fn new(status: Option<u16>, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Error without an HTTP status (connection refused, timeouts, ...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}
