// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, layout options).

use crate::text::LABEL_MAX_CHARS;

/// Default container width in pixels.
pub const WIDTH: f64 = 1260.0;
/// Default container height in pixels.
pub const HEIGHT: f64 = 520.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    pub const fn uniform(px: u32) -> Self { Self::new(px, px, px, px) }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 120, 50, 60)
    }
}

/// Layout and behaviour knobs for one chart instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    /// Query endpoint the request URL is built on.
    pub endpoint: String,
    /// Margin between the container and the drawing area (legend origin).
    pub area_insets: Insets,
    /// Margin between the container and the plot (axes live in it).
    pub chart_insets: Insets,
    pub min_area_height: f64,
    pub font_size: f64,
    pub tick_size: f64,
    pub tick_count: usize,
    /// Tick label rotation in degrees when bottom labels would overlap.
    pub label_rotation: f64,
    pub label_max_chars: usize,
    /// Markers are drawn only while every row gets at least this many pixels.
    pub marker_px_per_row: f64,
    pub marker_radius: f64,
    pub line_width: f64,
    pub legend_entry_max_width: f64,
    pub url_display_chars: usize,
    pub error_display_chars: usize,
    /// Quiet period before a viewport change is applied, in milliseconds.
    pub resize_quiet_ms: u64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            endpoint: "sql".to_string(),
            area_insets: Insets::uniform(10),
            chart_insets: Insets::default(),
            min_area_height: 200.0,
            font_size: 10.0,
            tick_size: 6.0,
            tick_count: crate::grid::DEFAULT_TICK_COUNT,
            label_rotation: -45.0,
            label_max_chars: LABEL_MAX_CHARS,
            marker_px_per_row: 6.0,
            marker_radius: 2.0,
            line_width: 1.5,
            legend_entry_max_width: 150.0,
            url_display_chars: 50,
            error_display_chars: 400,
            resize_quiet_ms: 100,
        }
    }
}
