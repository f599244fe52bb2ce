// File: crates/demo/src/cli.rs
// Summary: Command-line flags for the querychart binary.

use std::path::PathBuf;

use clap::Parser;
use querychart_core::types::{HEIGHT, WIDTH};
use querychart_core::{ChartType, Size};

/// Run a query against the SQL endpoint (or read a TSV file) and render the result as a chart.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// SQL text sent to the endpoint. Required unless `--input` is given.
    #[arg(short, long, required_unless_present = "input")]
    pub(crate) query: Option<String>,

    /// Read the tab-separated result set from this file instead of querying.
    #[arg(short, long)]
    pub(crate) input: Option<PathBuf>,

    /// Query endpoint; the request is `{endpoint}?cmd=query&q={query}`.
    #[arg(long, default_value = "http://localhost:8080/sql")]
    pub(crate) endpoint: String,

    /// `line` or `bar`.
    #[arg(short = 't', long, default_value = "line")]
    pub(crate) chart_type: ChartType,

    #[arg(long, default_value_t = WIDTH)]
    pub(crate) width: f64,

    #[arg(long, default_value_t = HEIGHT)]
    pub(crate) height: f64,

    /// Container size changes to apply after the first render, e.g. `800x400`.
    /// May be repeated; the final size is the one written out.
    #[arg(long, value_parser = parse_size)]
    pub(crate) resize: Vec<Size>,

    /// Output file; `.svg` writes the scene as SVG, anything else as PNG.
    #[arg(short, long, default_value = "chart.png")]
    pub(crate) out: PathBuf,

    /// `light` or `dark`.
    #[arg(long, default_value = "light")]
    pub(crate) theme: String,
}

fn parse_size(text: &str) -> Result<Size, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("`{text}` is not a size; expected WIDTHxHEIGHT"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| format!("`{v}` is not a valid pixel length"))
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}
