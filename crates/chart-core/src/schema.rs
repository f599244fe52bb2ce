// File: crates/chart-core/src/schema.rs
// Summary: Schema inference: x key, series keys and the kind of x axis.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{ChartError, Result};
use crate::series::ChartType;
use crate::table::{RawValue, Table};

/// Output pattern for timestamps (`YYYY-MM-DD HH:MM:SS.mmm`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
// Accepts the fraction as optional; DATETIME columns come without one.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisKind {
    Temporal,
    Numeric,
    /// Free text; only meaningful on a bar chart's band axis.
    Categorical,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AxisKind::Temporal => "a timestamp",
            AxisKind::Numeric => "a number",
            AxisKind::Categorical => "a category",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub x_key: String,
    pub y_keys: Vec<String>,
    pub axis_kind: AxisKind,
}

impl Schema {
    /// Reject combinations the renderer cannot draw meaningfully.
    pub fn check_chart_type(&self, chart_type: ChartType) -> Result<()> {
        if chart_type == ChartType::Line && self.axis_kind == AxisKind::Categorical {
            return Err(ChartError::CategoricalLineAxis { key: self.x_key.clone() });
        }
        Ok(())
    }
}

pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_PARSE_FORMAT).ok()
}

pub fn format_timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Decide the schema from the header and the first row's x value.
pub fn infer_schema(table: &Table) -> Result<Schema> {
    if table.is_empty() {
        return Err(ChartError::EmptyResult);
    }
    let (x_key, y_keys) = match table.columns().split_first() {
        Some((x, ys)) => (x.clone(), ys.to_vec()),
        None => return Err(ChartError::EmptyResult),
    };
    let probe = table.cell(0, 0).ok_or(ChartError::EmptyResult)?;
    let axis_kind = probe_axis_kind(probe);
    Ok(Schema { x_key, y_keys, axis_kind })
}

fn probe_axis_kind(value: &RawValue) -> AxisKind {
    match value {
        RawValue::Timestamp(_) => AxisKind::Temporal,
        RawValue::Number(_) => AxisKind::Numeric,
        RawValue::Text(s) if parse_timestamp(s).is_some() => AxisKind::Temporal,
        RawValue::Text(s) if s.trim().parse::<f64>().is_ok_and(f64::is_finite) => AxisKind::Numeric,
        RawValue::Text(_) => AxisKind::Categorical,
    }
}
