use std::collections::HashMap;

use crate::graph::ThreadLayout;
use crate::render::camera::ViewTransform;
use crate::render::style::{
    display_author, edge_width, node_label, node_radius, ScoreClass, Theme,
};
use crate::render::svg;
use crate::ui::tooltips::{TooltipContent, TooltipOverlay};

pub const MAX_CONTAINER_WIDTH: f64 = 1200.0;
pub const SURFACE_HEIGHT: f64 = 700.0;
pub const LABEL_OFFSET: f64 = 13.0;
pub const HIT_SLOP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin {
    top: 60.0,
    right: 90.0,
    bottom: 50.0,
    left: 90.0,
};

impl Margin {
    /// Resting transform: the tree group shifted by the top-left margin.
    pub fn home(&self) -> ViewTransform {
        ViewTransform::translated(self.left, self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub class: ScoreClass,
    pub label: String,
    pub full_author: String,
    pub anchor: LabelAnchor,
    pub is_root: bool,
    pub tooltip: TooltipContent,
    pub active: bool,
}

impl NodeElement {
    pub fn dom_id(&self) -> String {
        format!("node-{}", self.id)
    }

    pub fn label_dx(&self) -> f64 {
        match self.anchor {
            LabelAnchor::End => -LABEL_OFFSET,
            LabelAnchor::Start => LABEL_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeElement {
    pub source: usize,
    pub target: usize,
    pub width: f64,
    pub path: String,
    pub active: bool,
}

impl EdgeElement {
    pub fn touches(&self, index: usize) -> bool {
        self.source == index || self.target == index
    }
}

/// Everything drawn for one thread. Elements are owned here and addressed
/// by index; nothing is looked up through the document.
#[derive(Debug, Clone)]
pub struct Frame {
    pub outer_width: f64,
    pub outer_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
    pub tooltip: TooltipOverlay,
    by_id: HashMap<String, usize>,
}

impl Frame {
    fn from_layout(layout: &ThreadLayout<'_>, outer_width: f64, outer_height: f64) -> Self {
        let nodes: Vec<NodeElement> = layout
            .nodes
            .iter()
            .map(|n| {
                let author = n.data.author.as_deref();
                NodeElement {
                    id: n.data.id.clone(),
                    x: n.x,
                    y: n.y,
                    radius: node_radius(n.data.score),
                    class: ScoreClass::from_score(n.data.score),
                    label: node_label(author),
                    full_author: display_author(author).to_string(),
                    anchor: if n.has_children() {
                        LabelAnchor::End
                    } else {
                        LabelAnchor::Start
                    },
                    is_root: n.depth == 0,
                    tooltip: TooltipContent::for_node(n.data),
                    active: false,
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|e| {
                let (s, t) = (&layout.nodes[e.source], &layout.nodes[e.target]);
                EdgeElement {
                    source: e.source,
                    target: e.target,
                    width: edge_width(t.data.score),
                    path: svg::link_path((s.x, s.y), (t.x, t.y)),
                    active: false,
                }
            })
            .collect();

        let mut by_id = HashMap::new();
        for (i, n) in nodes.iter().enumerate() {
            by_id.entry(n.id.clone()).or_insert(i);
        }

        Self {
            outer_width,
            outer_height,
            inner_width: layout.width,
            inner_height: layout.height,
            nodes,
            edges,
            tooltip: TooltipOverlay::default(),
            by_id,
        }
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Node under a point in layout space; later-drawn nodes win.
    pub fn hit_test(&self, point: (f64, f64)) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| {
                let (dx, dy) = (n.x - point.0, n.y - point.1);
                (dx * dx + dy * dy).sqrt() <= n.radius + HIT_SLOP
            })
            .map(|(i, _)| i)
    }

    pub fn active_node(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.active)
    }

    pub fn active_edges(&self) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Drawing target sized to its container. Each `draw` discards the
/// previous frame.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    container_width: f64,
    theme: Theme,
    frame: Option<Frame>,
}

impl RenderSurface {
    pub fn new(container_width: f64, theme: Theme) -> Self {
        Self {
            container_width,
            theme,
            frame: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn outer_size(&self) -> (f64, f64) {
        let inner = self.inner_size();
        (
            inner.0 + MARGIN.left + MARGIN.right,
            inner.1 + MARGIN.top + MARGIN.bottom,
        )
    }

    /// Drawing area handed to the layout engine.
    pub fn inner_size(&self) -> (f64, f64) {
        let width = self.container_width.min(MAX_CONTAINER_WIDTH) - MARGIN.left - MARGIN.right;
        let height = SURFACE_HEIGHT - MARGIN.top - MARGIN.bottom;
        (width.max(0.0), height)
    }

    pub fn draw(&mut self, layout: &ThreadLayout<'_>) -> &mut Frame {
        let (outer_width, outer_height) = self.outer_size();
        let frame = Frame::from_layout(layout, outer_width, outer_height);
        tracing::debug!(
            nodes = frame.nodes.len(),
            edges = frame.edges.len(),
            outer_width,
            "thread frame drawn"
        );
        self.frame.insert(frame)
    }

    pub fn clear(&mut self) {
        self.frame = None;
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn frame_mut(&mut self) -> Option<&mut Frame> {
        self.frame.as_mut()
    }

    pub fn to_svg(&self, transform: &ViewTransform) -> Option<String> {
        self.frame
            .as_ref()
            .map(|frame| svg::write_document(frame, self.theme, transform))
    }
}
