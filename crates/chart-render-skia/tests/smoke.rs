// File: crates/chart-render-skia/tests/smoke.rs
// Purpose: End-to-end render smoke tests writing PNG bytes and RGBA buffers.

use querychart_core::{render_table, ChartOptions, ChartType, Dimensions, Renderer, Scene, Size, Table, Theme};
use querychart_render_skia::SkiaRenderer;

fn scene(chart_type: ChartType, theme: Theme) -> Scene {
    let table = Table::from_tsv("t\ta\tb\n1\t0\t2\n2\t3\tnull\n3\t1\t4\n4\t3.5\t2.5\n").expect("valid tsv");
    let dims = Dimensions::from_container(Size::new(400.0, 300.0), &ChartOptions::default());
    let renderer = Renderer::new(ChartOptions::default(), theme);
    render_table(Some(&table), chart_type, &dims, &renderer).expect("render")
}

#[test]
fn render_smoke_png() {
    let sk = SkiaRenderer::new();
    let bytes = sk.render_png(&scene(ChartType::Line, Theme::light())).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let out = std::path::PathBuf::from("target/test_out/smoke_bar.png");
    sk.render_to_png(&scene(ChartType::Bar, Theme::dark()), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn render_rgba8_buffer() {
    let sk = SkiaRenderer::without_text();
    let s = scene(ChartType::Line, Theme::dark());
    let (px, w, h, stride) = sk.render_rgba8(&s).expect("rgba render");
    assert_eq!((w, h), (400, 300));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel is outside every group: plain background.
    assert_eq!(&px[..4], &[18, 18, 20, 255]);
}

#[test]
fn blank_scene_is_background_only() {
    let sk = SkiaRenderer::without_text();
    let blank = Scene::blank(Size::new(64.0, 32.0), Theme::light().background);
    let (px, _, _, _) = sk.render_rgba8(&blank).expect("rgba render");
    assert!(px.chunks(4).all(|p| p == [255, 255, 255, 255]));
}
