// File: crates/chart-core/src/table.rs
// Summary: Tabular result set as delivered by the query endpoint (header row + TSV records).

use chrono::NaiveDateTime;

use crate::error::{ChartError, Result};

/// A single cell. Payloads arrive as text; typed variants let callers hand in
/// data that was already decoded elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl RawValue {
    /// Numeric reading of the cell. Anything that is not a finite number is a gap.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Timestamp(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(v) => format!("{v}"),
            RawValue::Timestamp(t) => crate::schema::format_timestamp(t),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self { RawValue::Text(s.to_string()) }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self { RawValue::Text(s) }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self { RawValue::Number(v) }
}

impl From<NaiveDateTime> for RawValue {
    fn from(t: NaiveDateTime) -> Self { RawValue::Timestamp(t) }
}

/// One record; cells are positional, names live in [`Table::columns`].
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    cells: Vec<RawValue>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&RawValue> { self.cells.get(column) }
}

/// Rectangular result set. Contract: every row has exactly `columns.len()` cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    /// Append a row, rejecting it when its arity differs from the header.
    pub fn push_row<V: Into<RawValue>>(&mut self, cells: impl IntoIterator<Item = V>) -> Result<()> {
        let cells: Vec<RawValue> = cells.into_iter().map(Into::into).collect();
        if cells.len() != self.columns.len() {
            return Err(ChartError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    /// Builder-style [`Table::push_row`] for literals in tests and demos.
    pub fn with_row<V: Into<RawValue>>(mut self, cells: impl IntoIterator<Item = V>) -> Result<Self> {
        self.push_row(cells)?;
        Ok(self)
    }

    /// Parse the endpoint's payload: header line, then one tab-separated record per line.
    pub fn from_tsv(text: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let mut table = Table::new(rdr.headers()?.iter());
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() != table.columns.len() {
                return Err(ChartError::RaggedRow {
                    row: i,
                    expected: table.columns.len(),
                    found: record.len(),
                });
            }
            table.rows.push(Row { cells: record.iter().map(RawValue::from).collect() });
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }

    /// No rows, or no columns to read an x axis from.
    pub fn is_empty(&self) -> bool { self.rows.is_empty() || self.columns.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&RawValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}
