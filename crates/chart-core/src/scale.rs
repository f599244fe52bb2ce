// File: crates/chart-core/src/scale.rs
// Summary: Linear, time and band scales plus the scale computation for one render.

use crate::schema::AxisKind;
use crate::series::{ChartType, Series, XValue};

/// Outer and inner padding of the category bands, as a fraction of a step.
pub const BAND_PADDING: f64 = 0.25;
/// Headroom applied to the value extent so marks stay off the plot edge.
pub const VALUE_HEADROOM: f64 = 1.1;
/// Span used when a numeric x extent collapses to a single value.
pub const MIN_NUMERIC_SPAN: f64 = 1.0;
/// Span used when a temporal x extent collapses to a single instant (ms).
pub const MIN_TEMPORAL_SPAN_MS: f64 = 60_000.0;

/// Continuous mapping of `[d0, d1]` onto `[r0, r1]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    /// Degenerate domains are widened upwards by one unit, like the y axis of a flat series.
    /// Far from zero the unit grows so both ends stay distinct doubles.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let (d0, d1) = if !d0.is_finite() || !d1.is_finite() {
            (0.0, 1.0)
        } else if separated(d0, d1) {
            (d0, d1)
        } else {
            let span = min_span(d0, 1.0);
            first_separated([(d0, d0 + span), (d0 - span, d0)])
        };
        Self { d0, d1, r0: range.0, r1: range.1 }
    }

    /// Like [`LinearScale::new`] but a collapsed domain is widened symmetrically by `span`.
    pub fn centered(domain: (f64, f64), range: (f64, f64), span: f64) -> Self {
        let (d0, d1) = domain;
        if d0.is_finite() && d1.is_finite() && !separated(d0, d1) {
            let half = min_span(d0, span) * 0.5;
            return Self::new((d0 - half, d0 + half), range);
        }
        Self::new(domain, range)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    pub fn domain(&self) -> (f64, f64) { (self.d0, self.d1) }
}

fn separated(d0: f64, d1: f64) -> bool {
    d0.is_finite() && d1.is_finite() && (d1 - d0).abs() >= 1e-12
}

/// `span`, or 16 ulps of `at` when that is larger.
fn min_span(at: f64, span: f64) -> f64 {
    span.max(at.abs() * 16.0 * f64::EPSILON)
}

fn first_separated(candidates: [(f64, f64); 2]) -> (f64, f64) {
    candidates.into_iter().find(|&(lo, hi)| separated(lo, hi)).unwrap_or((0.0, 1.0))
}

/// Discrete categories laid out as equal-width bands over a pixel range.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Bands with `padding` between them and the same padding at both ends.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let denom = n - padding + 2.0 * padding;
        if domain.is_empty() || denom <= 0.0 {
            return Self { domain, start: range.0, step: 0.0, bandwidth: 0.0 };
        }
        let step = (range.1 - range.0) / denom;
        Self { domain, start: range.0 + step * padding, step, bandwidth: step * (1.0 - padding) }
    }

    /// Whole-pixel bands without padding; leftover pixels are split between both ends.
    pub fn rounded(domain: Vec<String>, range: (f64, f64)) -> Self {
        if domain.is_empty() {
            return Self { domain, start: range.0, step: 0.0, bandwidth: 0.0 };
        }
        let width = (range.1 - range.0).max(0.0);
        let n = domain.len() as f64;
        let step = (width / n).floor();
        let error = width - n * step;
        Self { domain, start: range.0 + (error / 2.0).round(), step, bandwidth: step }
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    pub fn step(&self) -> f64 { self.step }
    pub fn domain(&self) -> &[String] { &self.domain }
}

#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Band(BandScale),
    Time(LinearScale),
    Linear(LinearScale),
}

impl XScale {
    /// Pixel position of `key`: band left edge or continuous coordinate.
    pub fn position(&self, key: &XValue) -> Option<f64> {
        match self {
            XScale::Band(b) => b.position(&key.label()),
            XScale::Time(s) | XScale::Linear(s) => key.as_f64().map(|v| s.to_px(v)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    pub x: XScale,
    pub y: LinearScale,
}

/// Derive both scales for the plot area `[0, plot_width] x [0, plot_height]`.
///
/// The x domain is read from the first series' keys; see [`compute_scales_for_keys`]
/// when the x column is available on its own.
pub fn compute_scales(
    chart_type: ChartType,
    axis_kind: AxisKind,
    series: &[Series],
    plot_width: f64,
    plot_height: f64,
) -> Scales {
    let keys: Vec<XValue> = series
        .first()
        .map(|s| s.values.iter().map(|p| p.key.clone()).collect())
        .unwrap_or_default();
    compute_scales_for_keys(chart_type, axis_kind, &keys, series, plot_width, plot_height)
}

/// Like [`compute_scales`] with the x domain taken from `keys`, so a result
/// without value columns still spans its x extent.
pub fn compute_scales_for_keys(
    chart_type: ChartType,
    axis_kind: AxisKind,
    keys: &[XValue],
    series: &[Series],
    plot_width: f64,
    plot_height: f64,
) -> Scales {
    let plot_width = plot_width.max(0.0);
    let plot_height = plot_height.max(0.0);

    let x = match (chart_type, axis_kind) {
        (ChartType::Bar, _) | (_, AxisKind::Categorical) => {
            let mut domain: Vec<String> = Vec::with_capacity(keys.len());
            for key in keys {
                let label = key.label();
                if !domain.contains(&label) {
                    domain.push(label);
                }
            }
            XScale::Band(BandScale::new(domain, (0.0, plot_width), BAND_PADDING))
        }
        (ChartType::Line, kind) => {
            let extent = keys
                .iter()
                .filter_map(XValue::as_f64)
                .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                })
                .unwrap_or((0.0, 1.0));
            if kind == AxisKind::Temporal {
                XScale::Time(LinearScale::centered(extent, (0.0, plot_width), MIN_TEMPORAL_SPAN_MS))
            } else {
                XScale::Linear(LinearScale::centered(extent, (0.0, plot_width), MIN_NUMERIC_SPAN))
            }
        }
    };

    let (lo, hi) = value_domain(series);
    let y = LinearScale::new((lo, hi), (plot_height, 0.0));
    Scales { x, y }
}

/// `[min(0, 1.1 * min), max(0, 1.1 * max)]` over every defined value.
pub fn value_domain(series: &[Series]) -> (f64, f64) {
    let extent = series
        .iter()
        .filter_map(Series::value_extent)
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)));
    match extent {
        Some((min, max)) => ((VALUE_HEADROOM * min).min(0.0), (VALUE_HEADROOM * max).max(0.0)),
        None => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_bands_fill_range() {
        let b = BandScale::rounded(vec!["a".into(), "b".into(), "c".into()], (0.0, 100.0));
        assert_eq!(b.step(), 33.0);
        assert_eq!(b.position("a"), Some(1.0));
        assert!(b.position("c").unwrap() + b.bandwidth() <= 100.0);
    }

    #[test]
    fn flat_domain_is_widened() {
        let s = LinearScale::new((0.0, 0.0), (400.0, 0.0));
        assert_eq!(s.to_px(0.0), 400.0);
        assert_eq!(s.to_px(1.0), 0.0);
        let c = LinearScale::centered((5.0, 5.0), (0.0, 100.0), 1.0);
        assert_eq!(c.to_px(5.0), 50.0);
    }

    #[test]
    fn flat_domain_far_from_zero_keeps_a_span() {
        let x = 1.6e18;
        let c = LinearScale::centered((x, x), (0.0, 400.0), 1.0);
        let (d0, d1) = c.domain();
        assert!(d1 > d0);
        assert!((c.to_px(x) - 200.0).abs() < 1.0);

        let y = LinearScale::new((x, x), (300.0, 0.0));
        let (d0, d1) = y.domain();
        assert!(d1 > d0);
        assert_eq!(y.to_px(x), 300.0);

        let far = LinearScale::new((f64::MAX, f64::MAX), (0.0, 10.0));
        assert!(far.to_px(f64::MAX).is_finite());
    }
}
