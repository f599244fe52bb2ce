// File: crates/chart-core/src/svg.rs
// Summary: Serializes a Scene to a standalone SVG document.

use std::fmt::Write as _;

use crate::scene::{Anchor, Node, Scene};
use crate::theme::Color;

impl Scene {
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = num(self.width),
            h = num(self.height),
        );
        let _ = writeln!(out, r#"<rect width="100%" height="100%"{}/>"#, fill_attr(self.background));
        for node in &self.nodes {
            write_node(&mut out, node, 1);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Group(g) => {
            let _ = write!(out, r#"{pad}<g class="{}""#, escape(&g.key));
            if g.translate != (0.0, 0.0) {
                let _ = write!(out, r#" transform="translate({},{})""#, num(g.translate.0), num(g.translate.1));
            }
            out.push_str(">\n");
            for child in &g.children {
                write_node(out, child, depth + 1);
            }
            let _ = writeln!(out, "{pad}</g>");
        }
        Node::Rect { x, y, width, height, fill } => {
            let _ = writeln!(
                out,
                r#"{pad}<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                fill_attr(*fill),
            );
        }
        Node::Path { subpaths, stroke, stroke_width } => {
            let mut d = String::new();
            for sub in subpaths {
                for (i, (x, y)) in sub.iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(d, "{cmd}{},{}", num(*x), num(*y));
                }
            }
            let _ = writeln!(
                out,
                r#"{pad}<path d="{d}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                stroke.to_hex(),
                num(*stroke_width),
            );
        }
        Node::Circle { cx, cy, r, fill, title } => {
            let _ = write!(out, r#"{pad}<circle cx="{}" cy="{}" r="{}"{}"#, num(*cx), num(*cy), num(*r), fill_attr(*fill));
            match title {
                Some(t) => {
                    let _ = writeln!(out, "><title>{}</title></circle>", escape(t));
                }
                None => out.push_str("/>\n"),
            }
        }
        Node::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            let _ = writeln!(
                out,
                r#"{pad}<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                stroke.to_hex(),
                num(*stroke_width),
            );
        }
        Node::Text { x, y, text, anchor, rotate, size, fill } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let _ = write!(
                out,
                r#"{pad}<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}"#,
                num(*x),
                num(*y),
                num(*size),
                fill_attr(*fill),
            );
            if *rotate != 0.0 {
                let _ = write!(out, r#" transform="rotate({},{},{})""#, num(*rotate), num(*x), num(*y));
            }
            let _ = writeln!(out, ">{}</text>", escape(text));
        }
    }
}

fn fill_attr(c: Color) -> String {
    if c.a == 255 {
        format!(r#" fill="{}""#, c.to_hex())
    } else {
        format!(r#" fill="{}" fill-opacity="{}""#, c.to_hex(), num(c.opacity()))
    }
}

/// Two decimals at most, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(1.239), "1.24");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
