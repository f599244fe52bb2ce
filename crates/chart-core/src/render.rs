// File: crates/chart-core/src/render.rs
// Summary: Turns series and scales into a declarative Scene (legend, marks, axes, guides).
// Notes:
// - Marks live in plot-local coordinates inside the `plot` group; the group is
//   translated to the plot origin so nothing here needs the surface margins.

use crate::axis::{bottom_axis, left_axis, x_ticks, y_ticks, AxisTick};
use crate::scale::{BandScale, LinearScale, Scales, XScale};
use crate::scene::{Anchor, Group, Node, Scene};
use crate::schema::AxisKind;
use crate::series::{ChartType, Series, XValue};
use crate::text::elide;
use crate::theme::Theme;
use crate::types::ChartOptions;
use crate::view::Dimensions;

/// Stateless scene builder; one per chart instance.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    pub options: ChartOptions,
    pub theme: Theme,
}

impl Renderer {
    pub fn new(options: ChartOptions, theme: Theme) -> Self {
        Self { options, theme }
    }

    /// Cleared surface of the right size.
    pub fn blank(&self, dims: &Dimensions) -> Scene {
        Scene::blank(dims.surface, self.theme.background)
    }

    pub fn render(
        &self,
        chart_type: ChartType,
        series: &[Series],
        scales: &Scales,
        axis_kind: AxisKind,
        dims: &Dimensions,
    ) -> Scene {
        let mut scene = self.blank(dims);
        let names: Vec<String> = series.iter().map(|s| s.name.clone()).collect();
        let (w, h) = (dims.plot.width, dims.plot.height);

        let bottom = x_ticks(&scales.x, self.options.tick_count);
        let left = y_ticks(&scales.y, self.options.tick_count);

        let mut plot = Group::new("plot").at(dims.plot_origin.0, dims.plot_origin.1);
        if chart_type == ChartType::Line {
            plot.push(Node::Group(self.grid(&bottom, h)));
        }
        match (chart_type, &scales.x) {
            (ChartType::Bar, XScale::Band(band)) => {
                plot.push(Node::Group(self.bars(series, band, &scales.y, &names)));
            }
            _ => {
                plot.push(Node::Group(self.lines(series, scales, &names)));
                let rows = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
                if rows as f64 * self.options.marker_px_per_row <= w {
                    plot.push(Node::Group(self.dots(series, scales, &names)));
                }
            }
        }
        plot.push(Node::Group(bottom_axis(&bottom, w, h, &self.options, &self.theme)));
        plot.push(Node::Group(left_axis(&left, h, &self.options, &self.theme)));
        plot.push(Node::Group(self.zero_line(&scales.y, w)));

        scene.nodes.push(Node::Group(self.legend(&names, dims)));
        scene.nodes.push(Node::Group(plot));
        tracing::debug!(
            chart_type = %chart_type,
            axis = ?axis_kind,
            series = series.len(),
            nodes = scene.node_count(),
            "rendered scene"
        );
        scene
    }

    fn legend(&self, names: &[String], dims: &Dimensions) -> Group {
        let mut g = Group::new("legend").at(dims.area_origin.0, dims.area_origin.1);
        if names.is_empty() {
            return g;
        }
        let em = self.options.font_size;
        let entry = self.options.legend_entry_max_width.min(dims.area.width / names.len() as f64);
        for (i, name) in names.iter().enumerate() {
            let x = i as f64 * entry;
            g.push(Node::Rect { x, y: 0.0, width: em, height: em, fill: self.theme.series_color(name, names) });
            g.push(Node::Text {
                x: x + em * 1.5,
                y: em * 0.9,
                text: self.label(name),
                anchor: Anchor::Start,
                rotate: 0.0,
                size: em,
                fill: self.theme.legend_label,
            });
        }
        g
    }

    fn grid(&self, ticks: &[AxisTick], height: f64) -> Group {
        let mut g = Group::new("grid");
        for t in ticks {
            g.push(Node::Line {
                x1: t.pos,
                y1: 0.0,
                x2: t.pos,
                y2: height,
                stroke: self.theme.grid,
                stroke_width: 1.0,
            });
        }
        g
    }

    fn bars(&self, series: &[Series], band: &BandScale, y: &LinearScale, names: &[String]) -> Group {
        let mut g = Group::new("bars");
        let inner = BandScale::rounded(names.to_vec(), (0.0, band.bandwidth()));
        let y0 = y.to_px(0.0);
        for s in series {
            let Some(offset) = inner.position(&s.name) else { continue };
            let fill = self.theme.series_color(&s.name, names);
            for (key, v) in s.defined() {
                let Some(left) = band.position(&key.label()) else { continue };
                let yv = y.to_px(v);
                g.push(Node::Rect {
                    x: left + offset,
                    y: y0.min(yv),
                    width: inner.bandwidth(),
                    height: (y0 - yv).abs(),
                    fill,
                });
            }
        }
        g
    }

    fn lines(&self, series: &[Series], scales: &Scales, names: &[String]) -> Group {
        let mut g = Group::new("lines");
        let em = self.options.font_size;
        for s in series {
            let color = self.theme.series_color(&s.name, names);
            let mut sg = Group::new(s.name.clone());
            let subpaths: Vec<Vec<(f64, f64)>> = s
                .defined_runs()
                .into_iter()
                .map(|run| {
                    run.into_iter()
                        .filter_map(|(k, v)| x_center(&scales.x, k).map(|x| (x, scales.y.to_px(v))))
                        .collect::<Vec<_>>()
                })
                .filter(|sub| !sub.is_empty())
                .collect();
            sg.push(Node::Path { subpaths, stroke: color, stroke_width: self.options.line_width });
            if let Some((k, v)) = s.first_defined() {
                if let Some(x) = x_center(&scales.x, k) {
                    sg.push(Node::Text {
                        x: x + em * 0.5,
                        y: scales.y.to_px(v) + em * 0.35,
                        text: self.label(&s.name),
                        anchor: Anchor::Start,
                        rotate: 0.0,
                        size: em,
                        fill: color,
                    });
                }
            }
            g.push(Node::Group(sg));
        }
        g
    }

    fn dots(&self, series: &[Series], scales: &Scales, names: &[String]) -> Group {
        let mut g = Group::new("dots");
        for s in series {
            let fill = self.theme.series_color(&s.name, names);
            for (k, v) in s.defined() {
                let Some(cx) = x_center(&scales.x, k) else { continue };
                g.push(Node::Circle {
                    cx,
                    cy: scales.y.to_px(v),
                    r: self.options.marker_radius,
                    fill,
                    title: Some(format!("{} = {}", k.label(), v)),
                });
            }
        }
        g
    }

    fn zero_line(&self, y: &LinearScale, width: f64) -> Group {
        let mut g = Group::new("zero");
        let y0 = y.to_px(0.0);
        g.push(Node::Line { x1: 0.0, y1: y0, x2: width, y2: y0, stroke: self.theme.zero_line, stroke_width: 1.0 });
        g
    }

    fn label(&self, text: &str) -> String {
        elide(text, self.options.label_max_chars, "...")
    }
}

/// Continuous coordinate, or the center of the key's band.
fn x_center(x: &XScale, key: &XValue) -> Option<f64> {
    match x {
        XScale::Band(b) => x.position(key).map(|left| left + b.bandwidth() / 2.0),
        _ => x.position(key),
    }
}
