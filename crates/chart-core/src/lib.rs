// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the query-result-to-chart pipeline and its scene model.

pub mod error;
pub mod table;
pub mod schema;
pub mod series;
pub mod scale;
pub mod grid;
pub mod axis;
pub mod types;
pub mod geometry;
pub mod view;
pub mod theme;
pub mod text;
pub mod scene;
pub mod svg;
pub mod render;
pub mod pipeline;
pub mod query;
pub mod chart;

pub use chart::{ChartContext, ChartState, RenderOutcome};
pub use error::{ChartError, FetchError, Result};
pub use geometry::{Rect, Size};
pub use pipeline::render_table;
pub use query::{ChartHost, QueryRequest, QuerySource, RequestToken};
pub use render::Renderer;
pub use scale::{compute_scales, compute_scales_for_keys, BandScale, LinearScale, Scales, XScale};
pub use scene::{Anchor, Group, Node, Scene, SceneChange};
pub use schema::{infer_schema, AxisKind, Schema};
pub use series::{build_series, series_for_keys, x_keys, ChartType, Point, Series, XValue};
pub use table::{RawValue, Row, Table};
pub use theme::{Color, Theme};
pub use types::{ChartOptions, Insets};
pub use view::{Dimensions, ResizeCoordinator};
