// File: crates/chart-core/src/series.rs
// Summary: Series model (named point lists) and the row-to-series reshaping step.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{ChartError, Result};
use crate::schema::{format_timestamp, parse_timestamp, AxisKind, Schema};
use crate::table::{RawValue, Table};

/// How the result set is drawn. Chosen by the caller, never inferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            other => Err(format!("unknown chart type `{other}` (expected `line` or `bar`)")),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
        })
    }
}

/// A coerced x-domain value.
#[derive(Clone, Debug, PartialEq)]
pub enum XValue {
    Time(NaiveDateTime),
    Number(f64),
    Category(String),
}

impl XValue {
    /// Position on a continuous axis; timestamps are epoch milliseconds (UTC).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            XValue::Time(t) => Some(t.and_utc().timestamp_millis() as f64),
            XValue::Number(v) => Some(*v),
            XValue::Category(_) => None,
        }
    }

    /// Text used for band keys, tick labels and tooltips.
    pub fn label(&self) -> String {
        match self {
            XValue::Time(t) => format_timestamp(t),
            XValue::Number(v) => format!("{v}"),
            XValue::Category(s) => s.clone(),
        }
    }

    fn coerce(raw: &RawValue, kind: AxisKind) -> Option<XValue> {
        match (kind, raw) {
            (AxisKind::Temporal, RawValue::Timestamp(t)) => Some(XValue::Time(*t)),
            (AxisKind::Temporal, RawValue::Text(s)) => parse_timestamp(s).map(XValue::Time),
            (AxisKind::Temporal, RawValue::Number(_)) => None,
            (AxisKind::Numeric, _) => raw.as_number().map(XValue::Number),
            (AxisKind::Categorical, _) => Some(XValue::Category(raw.as_text())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub key: XValue,
    /// `None` marks a gap.
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<Point>) -> Self {
        Self { name: name.into(), values }
    }

    /// `(key, value)` of every non-gap point, in row order.
    pub fn defined(&self) -> impl Iterator<Item = (&XValue, f64)> {
        self.values.iter().filter_map(|p| p.value.map(|v| (&p.key, v)))
    }

    pub fn first_defined(&self) -> Option<(&XValue, f64)> { self.defined().next() }

    /// Min/max over defined values; `None` when the series is all gaps.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.defined().fold(None, |acc, (_, v)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Consecutive runs of defined points; a gap closes the current run.
    pub fn defined_runs(&self) -> Vec<Vec<(&XValue, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for p in &self.values {
            match p.value {
                Some(v) => current.push((&p.key, v)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// Reshape rows into one series per y key, point for point.
pub fn build_series(schema: &Schema, table: &Table) -> Result<Vec<Series>> {
    let keys = x_keys(schema, table)?;
    Ok(series_for_keys(schema, table, &keys))
}

/// The x column coerced to the schema's axis kind, one key per row.
pub fn x_keys(schema: &Schema, table: &Table) -> Result<Vec<XValue>> {
    let x_col = column_of(table, 0, &schema.x_key).unwrap_or(0);
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let raw = row.get(x_col).ok_or(ChartError::EmptyResult)?;
            XValue::coerce(raw, schema.axis_kind).ok_or_else(|| ChartError::XValue {
                row: i,
                value: raw.as_text(),
                kind: schema.axis_kind,
            })
        })
        .collect()
}

/// One series per y key over already coerced x `keys`.
pub fn series_for_keys(schema: &Schema, table: &Table, keys: &[XValue]) -> Vec<Series> {
    schema
        .y_keys
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let col = column_of(table, i + 1, name);
            let values = keys
                .iter()
                .zip(table.rows())
                .map(|(key, row)| Point {
                    key: key.clone(),
                    value: col.and_then(|c| row.get(c)).and_then(RawValue::as_number),
                })
                .collect();
            Series::new(name.clone(), values)
        })
        .collect()
}

// Positional lookup first so duplicate header names still map one column each.
fn column_of(table: &Table, pos: usize, name: &str) -> Option<usize> {
    match table.columns().get(pos) {
        Some(c) if c == name => Some(pos),
        _ => table.column_index(name),
    }
}
