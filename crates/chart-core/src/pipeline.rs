// File: crates/chart-core/src/pipeline.rs
// Summary: Single render entry point: raw table in, scene out.

use crate::error::Result;
use crate::render::Renderer;
use crate::scale::compute_scales_for_keys;
use crate::scene::Scene;
use crate::schema::infer_schema;
use crate::series::{series_for_keys, x_keys, ChartType};
use crate::table::Table;
use crate::view::Dimensions;

/// Run schema inference, series building, scale computation and rendering.
///
/// A missing or empty table yields a cleared scene; it is logged, not reported.
pub fn render_table(
    table: Option<&Table>,
    chart_type: ChartType,
    dims: &Dimensions,
    renderer: &Renderer,
) -> Result<Scene> {
    let table = match table {
        Some(t) if !t.is_empty() => t,
        _ => {
            tracing::info!("empty dataset");
            return Ok(renderer.blank(dims));
        }
    };
    let schema = infer_schema(table)?;
    schema.check_chart_type(chart_type)?;
    let keys = x_keys(&schema, table)?;
    let series = series_for_keys(&schema, table, &keys);
    let scales =
        compute_scales_for_keys(chart_type, schema.axis_kind, &keys, &series, dims.plot.width, dims.plot.height);
    Ok(renderer.render(chart_type, &series, &scales, schema.axis_kind, dims))
}
