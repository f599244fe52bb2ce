// File: crates/chart-render-skia/src/lib.rs
// Summary: Paints a chart Scene onto Skia CPU raster surfaces (PNG bytes, files or RGBA buffers).

use anyhow::{anyhow, Result};
use skia_safe as skia;

use querychart_core::{Color, Node, Scene};

pub mod text;

pub use text::TextShaper;

pub struct SkiaRenderer {
    shaper: TextShaper,
    /// Text is skipped when false; keeps pixel output independent of installed fonts.
    pub draw_text: bool,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new(), draw_text: true }
    }

    pub fn without_text() -> Self {
        Self { draw_text: false, ..Self::new() }
    }

    /// Encode the scene as PNG bytes.
    pub fn render_png(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut surface = self.raster(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render and write a PNG file, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_png(scene)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA pixels with `(pixels, width, height, row_stride)`.
    pub fn render_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.raster(scene)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(anyhow!("read pixels failed"));
        }
        Ok((px, w as u32, h as u32, stride))
    }

    fn raster(&self, scene: &Scene) -> Result<skia::Surface> {
        let (w, h) = (scene.width.round().max(1.0) as i32, scene.height.round().max(1.0) as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(sk_color(scene.background));
        for node in &scene.nodes {
            self.draw_node(canvas, node);
        }
        Ok(surface)
    }

    fn draw_node(&self, canvas: &skia::Canvas, node: &Node) {
        match node {
            Node::Group(g) => {
                canvas.save();
                canvas.translate((g.translate.0 as f32, g.translate.1 as f32));
                for child in &g.children {
                    self.draw_node(canvas, child);
                }
                canvas.restore();
            }
            Node::Rect { x, y, width, height, fill } => {
                let rect = skia::Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32);
                canvas.draw_rect(rect, &fill_paint(*fill));
            }
            Node::Path { subpaths, stroke, stroke_width } => {
                let mut path = skia::Path::new();
                for sub in subpaths {
                    let Some(((x0, y0), rest)) = sub.split_first() else { continue };
                    path.move_to((*x0 as f32, *y0 as f32));
                    for (x, y) in rest {
                        path.line_to((*x as f32, *y as f32));
                    }
                }
                canvas.draw_path(&path, &stroke_paint(*stroke, *stroke_width));
            }
            Node::Circle { cx, cy, r, fill, .. } => {
                canvas.draw_circle((*cx as f32, *cy as f32), *r as f32, &fill_paint(*fill));
            }
            Node::Line { x1, y1, x2, y2, stroke, stroke_width } => {
                canvas.draw_line(
                    (*x1 as f32, *y1 as f32),
                    (*x2 as f32, *y2 as f32),
                    &stroke_paint(*stroke, *stroke_width),
                );
            }
            Node::Text { x, y, text, anchor, rotate, size, fill } => {
                if !self.draw_text {
                    return;
                }
                let (x, y) = (*x as f32, *y as f32);
                canvas.save();
                if *rotate != 0.0 {
                    canvas.rotate(*rotate as f32, Some(skia::Point::new(x, y)));
                }
                self.shaper.draw(canvas, text, x, y, *size as f32, sk_color(*fill), *anchor);
                canvas.restore();
            }
        }
    }
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn fill_paint(c: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(c));
    paint
}

fn stroke_paint(c: Color, width: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(sk_color(c));
    paint
}
