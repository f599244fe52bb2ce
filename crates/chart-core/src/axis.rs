// File: crates/chart-core/src/axis.rs
// Summary: Bottom/left axis layout: tick placement, label rotation and the axis scene groups.

use crate::grid::{linear_ticks, time_ticks};
use crate::scale::{LinearScale, XScale};
use crate::scene::{Anchor, Group, Node};
use crate::text::estimate_width;
use crate::theme::Theme;
use crate::types::ChartOptions;

/// Gap between a tick mark and its label, in pixels.
const LABEL_GAP: f64 = 3.0;

/// A tick in pixel space along its axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub pos: f64,
    pub label: String,
}

/// Ticks for the bottom axis: band centers, or nice values of the continuous domain.
pub fn x_ticks(scale: &XScale, count: usize) -> Vec<AxisTick> {
    match scale {
        XScale::Band(b) => b
            .domain()
            .iter()
            .filter_map(|k| {
                b.position(k).map(|left| AxisTick { pos: left + b.bandwidth() / 2.0, label: k.clone() })
            })
            .collect(),
        XScale::Time(s) => {
            let (d0, d1) = s.domain();
            time_ticks(d0, d1, count)
                .into_iter()
                .map(|t| AxisTick { pos: s.to_px(t.value), label: t.label })
                .collect()
        }
        XScale::Linear(s) => continuous_ticks(s, count),
    }
}

/// Ticks for the left axis.
pub fn y_ticks(scale: &LinearScale, count: usize) -> Vec<AxisTick> {
    continuous_ticks(scale, count)
}

fn continuous_ticks(s: &LinearScale, count: usize) -> Vec<AxisTick> {
    let (d0, d1) = s.domain();
    let slack = (d1 - d0).abs() * 1e-9;
    let (lo, hi) = (d0.min(d1) - slack, d0.max(d1) + slack);
    linear_ticks(d0, d1, count)
        .into_iter()
        .filter(|t| t.value >= lo && t.value <= hi)
        .map(|t| AxisTick { pos: s.to_px(t.value), label: t.label })
        .filter(|t| t.pos.is_finite())
        .collect()
}

/// True when the widest label does not fit in the narrowest tick spacing.
pub fn labels_overlap(ticks: &[AxisTick], font_size: f64) -> bool {
    if ticks.len() < 2 {
        return false;
    }
    let spacing = ticks
        .windows(2)
        .map(|w| (w[1].pos - w[0].pos).abs())
        .fold(f64::INFINITY, f64::min);
    let widest = ticks.iter().map(|t| estimate_width(&t.label, font_size)).fold(0.0, f64::max);
    widest > spacing
}

/// `x-axis` group, translated to the bottom edge of a plot of size `width` x `height`.
pub fn bottom_axis(ticks: &[AxisTick], width: f64, height: f64, opts: &ChartOptions, theme: &Theme) -> Group {
    let mut g = Group::new("x-axis").at(0.0, height);
    g.push(Node::Line { x1: 0.0, y1: 0.0, x2: width, y2: 0.0, stroke: theme.axis_line, stroke_width: 1.0 });

    let rotate = if labels_overlap(ticks, opts.font_size) { opts.label_rotation } else { 0.0 };
    let label_y = opts.tick_size + LABEL_GAP;
    for t in ticks {
        g.push(Node::Line {
            x1: t.pos,
            y1: 0.0,
            x2: t.pos,
            y2: opts.tick_size,
            stroke: theme.axis_line,
            stroke_width: 1.0,
        });
        let (y, anchor) = if rotate != 0.0 {
            (label_y + opts.font_size * 0.35, Anchor::End)
        } else {
            (label_y + opts.font_size * 0.71, Anchor::Middle)
        };
        g.push(Node::Text {
            x: t.pos,
            y,
            text: t.label.clone(),
            anchor,
            rotate,
            size: opts.font_size,
            fill: theme.axis_label,
        });
    }
    g
}

/// `y-axis` group along the left edge.
pub fn left_axis(ticks: &[AxisTick], height: f64, opts: &ChartOptions, theme: &Theme) -> Group {
    let mut g = Group::new("y-axis");
    g.push(Node::Line { x1: 0.0, y1: 0.0, x2: 0.0, y2: height, stroke: theme.axis_line, stroke_width: 1.0 });
    for t in ticks {
        g.push(Node::Line {
            x1: -opts.tick_size,
            y1: t.pos,
            x2: 0.0,
            y2: t.pos,
            stroke: theme.axis_line,
            stroke_width: 1.0,
        });
        g.push(Node::Text {
            x: -(opts.tick_size + LABEL_GAP),
            y: t.pos + opts.font_size * 0.32,
            text: t.label.clone(),
            anchor: Anchor::End,
            rotate: 0.0,
            size: opts.font_size,
            fill: theme.axis_label,
        });
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::BandScale;

    #[test]
    fn band_ticks_sit_at_centers() {
        let b = BandScale::new(vec!["a".into(), "b".into()], (0.0, 100.0), 0.25);
        let ticks = x_ticks(&XScale::Band(b.clone()), 10);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].pos, b.position("a").unwrap() + b.bandwidth() / 2.0);
        assert_eq!(ticks[1].label, "b");
    }

    #[test]
    fn crowded_labels_rotate() {
        let ticks: Vec<AxisTick> = (0..5)
            .map(|i| AxisTick { pos: i as f64 * 20.0, label: "2020-01-01 00:00:00.000".into() })
            .collect();
        assert!(labels_overlap(&ticks, 10.0));
        let g = bottom_axis(&ticks, 100.0, 50.0, &ChartOptions::default(), &Theme::light());
        let rotated = g.children.iter().any(|n| matches!(n, Node::Text { rotate, .. } if *rotate == -45.0));
        assert!(rotated);
        assert!(!labels_overlap(&ticks[..1], 10.0));
    }
}
