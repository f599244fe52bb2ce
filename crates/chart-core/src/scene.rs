// File: crates/chart-core/src/scene.rs
// Summary: Declarative scene graph produced by the renderer, and its structural diff.
// Notes:
// - A scene fully describes one frame; presenting a chart means replacing the
//   previous scene. `Scene::diff` lists what a retained-mode surface has to touch.

use crate::geometry::Size;
use crate::theme::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Keyed container; children are positioned relative to `translate`.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: String,
    pub translate: (f64, f64),
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), translate: (0.0, 0.0), children: Vec::new() }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn push(&mut self, node: Node) { self.children.push(node); }

    pub fn child_group(&self, key: &str) -> Option<&Group> {
        self.children.iter().find_map(|n| match n {
            Node::Group(g) if g.key == key => Some(g),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Group),
    Rect { x: f64, y: f64, width: f64, height: f64, fill: Color },
    /// Polyline made of independent sub-paths; nothing connects one sub-path to the next.
    Path { subpaths: Vec<Vec<(f64, f64)>>, stroke: Color, stroke_width: f64 },
    Circle { cx: f64, cy: f64, r: f64, fill: Color, title: Option<String> },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color, stroke_width: f64 },
    /// `rotate` is in degrees around the anchor point.
    Text { x: f64, y: f64, text: String, anchor: Anchor, rotate: f64, size: f64, fill: Color },
}

/// One edit needed to turn the previous scene into the next.
/// Keys are `/`-joined group paths such as `plot/lines`.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneChange {
    Resize { width: f64, height: f64 },
    Remove { key: String },
    Insert { key: String },
    Replace { key: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub nodes: Vec<Node>,
}

impl Scene {
    /// A cleared surface.
    pub fn blank(size: Size, background: Color) -> Self {
        Self { width: size.width, height: size.height, background, nodes: Vec::new() }
    }

    pub fn is_blank(&self) -> bool { self.nodes.is_empty() }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    /// Look up a group by path, e.g. `"plot/dots"`.
    pub fn group(&self, path: &str) -> Option<&Group> {
        let mut parts = path.split('/');
        let first = parts.next()?;
        let mut current = self.nodes.iter().find_map(|n| match n {
            Node::Group(g) if g.key == first => Some(g),
            _ => None,
        })?;
        for part in parts {
            current = current.child_group(part)?;
        }
        Some(current)
    }

    /// Total number of nodes, groups included.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Group(g) => 1 + count(&g.children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.nodes)
    }

    /// Edits turning `previous` into `self`; empty when both describe the same frame.
    pub fn diff(&self, previous: &Scene) -> Vec<SceneChange> {
        let mut changes = Vec::new();
        if self.width != previous.width || self.height != previous.height {
            changes.push(SceneChange::Resize { width: self.width, height: self.height });
        }
        if self.background != previous.background {
            changes.push(SceneChange::Replace { key: String::new() });
            return changes;
        }
        diff_children("", &previous.nodes, &self.nodes, &mut changes);
        changes
    }
}

fn keyed(nodes: &[Node]) -> Option<Vec<&Group>> {
    nodes
        .iter()
        .map(|n| match n {
            Node::Group(g) => Some(g),
            _ => None,
        })
        .collect()
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() { key.to_string() } else { format!("{prefix}/{key}") }
}

fn diff_children(prefix: &str, prev: &[Node], next: &[Node], out: &mut Vec<SceneChange>) {
    if prev == next {
        return;
    }
    let (Some(prev_groups), Some(next_groups)) = (keyed(prev), keyed(next)) else {
        out.push(SceneChange::Replace { key: prefix.to_string() });
        return;
    };
    for p in &prev_groups {
        if !next_groups.iter().any(|n| n.key == p.key) {
            out.push(SceneChange::Remove { key: join(prefix, &p.key) });
        }
    }
    for n in &next_groups {
        let key = join(prefix, &n.key);
        match prev_groups.iter().find(|p| p.key == n.key) {
            None => out.push(SceneChange::Insert { key }),
            Some(p) if p == n => {}
            Some(p) if p.translate != n.translate => out.push(SceneChange::Replace { key }),
            Some(p) => diff_children(&key, &p.children, &n.children, out),
        }
    }
}
