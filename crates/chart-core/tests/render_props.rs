// File: crates/chart-core/tests/render_props.rs
// Purpose: Properties of rendered scenes: marks stay in the plot, gaps break paths,
// markers obey the density threshold and re-rendering is a no-op diff.

use querychart_core::{
    render_table, ChartOptions, ChartType, Dimensions, Group, Node, Renderer, Scene, Size, Table,
};

fn dims(width: f64, height: f64) -> Dimensions {
    Dimensions::from_container(Size::new(width, height), &ChartOptions::default())
}

fn render(tsv: &str, chart_type: ChartType, d: &Dimensions) -> Scene {
    let table = Table::from_tsv(tsv).expect("valid tsv");
    render_table(Some(&table), chart_type, d, &Renderer::default()).expect("renders")
}

fn group<'a>(scene: &'a Scene, path: &str) -> &'a Group {
    scene.group(path).unwrap_or_else(|| panic!("missing group {path}"))
}

/// Flatten every mark coordinate of a group, descending into sub-groups.
fn points(g: &Group, out: &mut Vec<(f64, f64)>) {
    for n in &g.children {
        match n {
            Node::Group(child) => points(child, out),
            Node::Rect { x, y, width, height, .. } => {
                out.push((*x, *y));
                out.push((x + width, y + height));
            }
            Node::Path { subpaths, .. } => out.extend(subpaths.iter().flatten().copied()),
            Node::Circle { cx, cy, .. } => out.push((*cx, *cy)),
            _ => {}
        }
    }
}

/// Every coordinate in `nodes`, in each node's own group space.
fn all_coords(nodes: &[Node], out: &mut Vec<f64>) {
    for n in nodes {
        match n {
            Node::Group(g) => {
                out.extend([g.translate.0, g.translate.1]);
                all_coords(&g.children, out);
            }
            Node::Rect { x, y, width, height, .. } => out.extend([*x, *y, *width, *height]),
            Node::Path { subpaths, .. } => out.extend(subpaths.iter().flatten().flat_map(|(x, y)| [*x, *y])),
            Node::Circle { cx, cy, r, .. } => out.extend([*cx, *cy, *r]),
            Node::Line { x1, y1, x2, y2, .. } => out.extend([*x1, *y1, *x2, *y2]),
            Node::Text { x, y, rotate, .. } => out.extend([*x, *y, *rotate]),
        }
    }
}

fn texts(g: &Group, out: &mut Vec<String>) {
    for n in &g.children {
        match n {
            Node::Group(child) => texts(child, out),
            Node::Text { text, .. } => out.push(text.clone()),
            _ => {}
        }
    }
}

const TEMPORAL: &str = "t\ta\tb\n\
2020-01-01 00:00:00.000\t1\t2\n\
2020-01-01 00:01:00.000\t3\tNaN\n\
2020-01-01 00:02:00.000\t-2\t4\n\
2020-01-01 00:03:00.000\t\t5\n\
2020-01-01 00:04:00.000\t7\t-1\n";

#[test]
fn line_marks_stay_inside_the_plot() {
    let d = dims(1260.0, 520.0);
    let scene = render(TEMPORAL, ChartType::Line, &d);
    let bounds = querychart_core::Rect::from_ltwh(0.0, 0.0, d.plot.width, d.plot.height);
    let mut pts = Vec::new();
    points(group(&scene, "plot/lines"), &mut pts);
    points(group(&scene, "plot/dots"), &mut pts);
    assert!(!pts.is_empty());
    for (x, y) in pts {
        assert!(bounds.contains(x, y), "({x}, {y}) outside {bounds:?}");
    }
}

#[test]
fn bar_marks_stay_inside_the_plot() {
    let d = dims(640.0, 400.0);
    let scene = render("day\tup\tdown\nMon\t3\t-1\nTue\t5\tnull\nWed\t4\t-6\n", ChartType::Bar, &d);
    let bounds = querychart_core::Rect::from_ltwh(0.0, 0.0, d.plot.width, d.plot.height);
    let bars = group(&scene, "plot/bars");
    assert_eq!(bars.children.len(), 5, "the null value is omitted");
    let mut pts = Vec::new();
    points(bars, &mut pts);
    for (x, y) in pts {
        assert!(bounds.contains(x, y), "({x}, {y}) outside {bounds:?}");
    }
    assert!(scene.group("plot/grid").is_none());
    assert!(scene.group("plot/lines").is_none());
}

#[test]
fn gaps_split_paths_and_skip_markers() {
    let scene = render(TEMPORAL, ChartType::Line, &dims(1260.0, 520.0));
    let a = group(&scene, "plot/lines/a");
    let subpaths = a
        .children
        .iter()
        .find_map(|n| match n {
            Node::Path { subpaths, .. } => Some(subpaths.clone()),
            _ => None,
        })
        .expect("series path");
    assert_eq!(subpaths.iter().map(Vec::len).collect::<Vec<_>>(), [3, 1]);

    let b = group(&scene, "plot/lines/b");
    let Some(Node::Path { subpaths, .. }) = b.children.first() else { panic!("series path") };
    assert_eq!(subpaths.iter().map(Vec::len).collect::<Vec<_>>(), [1, 3]);

    let dots = group(&scene, "plot/dots");
    assert_eq!(dots.children.len(), 4 + 4);
    let titled = dots.children.iter().any(|n| {
        matches!(n, Node::Circle { title: Some(t), .. } if t == "2020-01-01 00:01:00.000 = 3")
    });
    assert!(titled);
}

#[test]
fn series_label_anchors_on_first_defined_point() {
    let scene = render("t\tlate\n1\tnull\n2\t4\n3\t5\n", ChartType::Line, &dims(800.0, 400.0));
    let late = group(&scene, "plot/lines/late");
    let Some(Node::Path { subpaths, .. }) = late.children.first() else { panic!("series path") };
    let first = subpaths[0][0];
    let label = late.children.iter().find_map(|n| match n {
        Node::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
        _ => None,
    });
    let (x, _, text) = label.expect("series label");
    assert_eq!(text, "late");
    assert!(x > first.0);
}

#[test]
fn markers_are_suppressed_on_dense_data() {
    let d = dims(400.0, 300.0);
    // 210 px of plot width; 40 rows would need 240 px.
    let mut tsv = String::from("x\ty\n");
    for i in 0..40 {
        tsv.push_str(&format!("{i}\t{}\n", i % 7));
    }
    let scene = render(&tsv, ChartType::Line, &d);
    assert_eq!(d.plot.width, 210.0);
    assert!(scene.group("plot/dots").is_none());

    let sparse: String = tsv.lines().take(31).map(|l| format!("{l}\n")).collect();
    let scene = render(&sparse, ChartType::Line, &d);
    assert_eq!(group(&scene, "plot/dots").children.len(), 30);
}

#[test]
fn legend_has_one_entry_per_series() {
    let d = dims(1260.0, 520.0);
    let scene = render("x\tfirst\ta very long series name indeed\n1\t1\t2\n", ChartType::Line, &d);
    let legend = group(&scene, "legend");
    let texts: Vec<&str> = legend
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["first", "a very long series..."]);
    let swatches: Vec<f64> = legend
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Rect { x, .. } => Some(*x),
            _ => None,
        })
        .collect();
    assert_eq!(swatches, [0.0, 150.0]);
}

#[test]
fn identical_inputs_give_an_empty_diff() {
    let d = dims(1000.0, 480.0);
    let first = render(TEMPORAL, ChartType::Line, &d);
    let second = render(TEMPORAL, ChartType::Line, &d);
    assert!(second.diff(&first).is_empty());
}

#[test]
fn empty_result_only_clears() {
    let d = dims(1000.0, 480.0);
    let drawn = render(TEMPORAL, ChartType::Line, &d);
    let empty = Table::from_tsv("t\ta\n").unwrap();
    let blank = render_table(Some(&empty), ChartType::Line, &d, &Renderer::default()).unwrap();
    assert!(blank.is_blank());
    let changes = blank.diff(&drawn);
    assert!(!changes.is_empty());
    assert!(changes.iter().all(|c| matches!(c, querychart_core::SceneChange::Remove { .. })));
    assert!(render_table(None, ChartType::Bar, &d, &Renderer::default()).unwrap().is_blank());
}

#[test]
fn line_charts_draw_gridlines_across_the_plot() {
    let d = dims(1260.0, 520.0);
    let scene = render(TEMPORAL, ChartType::Line, &d);
    let grid = group(&scene, "plot/grid");
    assert!(!grid.children.is_empty());
    for n in &grid.children {
        let Node::Line { y1, y2, .. } = n else { panic!("gridlines are lines") };
        assert_eq!((*y1, *y2), (0.0, d.plot.height));
    }
    assert!(scene.group("plot/zero").is_some());
    assert!(scene.group("plot/x-axis").is_some());
    assert!(scene.group("plot/y-axis").is_some());
}

#[test]
fn degenerate_inputs_stay_finite_and_inside() {
    let d = dims(800.0, 400.0);
    let bounds = querychart_core::Rect::from_ltwh(0.0, 0.0, d.plot.width, d.plot.height);
    let cases = [
        "ns\tv\n1600000000000000000\t3\n",
        "x\tv\n1e17\t3\n",
        "x\tv\n4\t2\n",
        "x\tv\n7\t1\n7\t2\n7\t3\n",
        "x\ta\n1\tnull\n2\tnull\n",
        "t\tv\n2020-01-01 00:00:00.000\t3\n",
        "ns\tv\n1600000000000000000\t3\n1600000000000000000\t-3\n",
    ];
    for tsv in cases {
        for chart_type in [ChartType::Line, ChartType::Bar] {
            let scene = render(tsv, chart_type, &d);
            let mut coords = Vec::new();
            all_coords(&scene.nodes, &mut coords);
            assert!(coords.iter().all(|v| v.is_finite()), "{chart_type} {tsv:?}: non-finite coordinate");

            let mut pts = Vec::new();
            for path in ["plot/lines", "plot/dots", "plot/bars"] {
                if let Some(g) = scene.group(path) {
                    points(g, &mut pts);
                }
            }
            for (x, y) in pts {
                assert!(bounds.contains(x, y), "{chart_type} {tsv:?}: ({x}, {y}) outside {bounds:?}");
            }
            let grid = scene.group("plot/grid").map(|g| g.children.as_slice()).unwrap_or_default();
            for n in grid {
                let Node::Line { x1, .. } = n else { continue };
                assert!(bounds.contains(*x1, 0.0), "{chart_type} {tsv:?}: gridline at {x1}");
            }
        }
    }
}

#[test]
fn x_only_result_spans_its_x_column() {
    let d = dims(800.0, 400.0);
    let scene = render("x\n1\n5\n", ChartType::Line, &d);
    let mut labels = Vec::new();
    texts(group(&scene, "plot/x-axis"), &mut labels);
    assert_eq!(labels.first().map(String::as_str), Some("1.0"));
    assert_eq!(labels.last().map(String::as_str), Some("5.0"));
}
