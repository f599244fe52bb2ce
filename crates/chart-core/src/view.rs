// File: crates/chart-core/src/view.rs
// Summary: Container-derived chart dimensions and coalescing of viewport changes.

use std::time::{Duration, Instant};

use crate::geometry::Size;
use crate::types::ChartOptions;

/// Pixel layout of one chart derived from its container.
///
/// The drawing surface holds an *area* (inset by `area_insets`, home of the
/// legend) and a *plot* (inset by `chart_insets`, home of the marks; axes sit
/// in its margins).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub surface: Size,
    pub area: Size,
    pub plot: Size,
    pub area_origin: (f64, f64),
    pub plot_origin: (f64, f64),
}

impl Dimensions {
    pub fn from_container(container: Size, opts: &ChartOptions) -> Self {
        let ai = opts.area_insets;
        let ci = opts.chart_insets;
        let area = Size::new(
            (container.width - ai.hsum() as f64).max(0.0),
            (container.height.max(opts.min_area_height) - ai.vsum() as f64).max(0.0),
        );
        let plot = Size::new(
            (area.width - ci.hsum() as f64).max(0.0),
            (area.height - ci.vsum() as f64).max(0.0),
        );
        Self {
            surface: Size::new(area.width + ai.hsum() as f64, area.height + ai.vsum() as f64),
            area,
            plot,
            area_origin: (ai.left as f64, ai.top as f64),
            plot_origin: (ci.left as f64, ci.top as f64),
        }
    }
}

/// Coalesces bursts of viewport changes into one re-render.
///
/// Each request restarts the quiet period; a size is released once the
/// period has elapsed and only when it differs from the last one released.
#[derive(Clone, Debug)]
pub struct ResizeCoordinator {
    quiet: Duration,
    pending: Option<(Size, Instant)>,
    applied: Option<Size>,
}

impl ResizeCoordinator {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None, applied: None }
    }

    /// Mark `size` as already on screen (initial layout).
    pub fn with_applied(mut self, size: Size) -> Self {
        self.applied = Some(size);
        self
    }

    pub fn request(&mut self, size: Size, now: Instant) {
        self.pending = Some((size, now));
    }

    pub fn has_pending(&self) -> bool { self.pending.is_some() }

    /// Release the pending size if its quiet period is over.
    pub fn poll(&mut self, now: Instant) -> Option<Size> {
        match self.pending {
            Some((_, at)) if now.saturating_duration_since(at) >= self.quiet => self.flush(),
            _ => None,
        }
    }

    /// Release the pending size immediately.
    pub fn flush(&mut self) -> Option<Size> {
        let (size, _) = self.pending.take()?;
        if self.applied == Some(size) {
            return None;
        }
        self.applied = Some(size);
        Some(size)
    }
}
