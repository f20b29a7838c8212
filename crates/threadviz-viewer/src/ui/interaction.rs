use smallvec::SmallVec;
use std::time::Duration;

use crate::render::camera::{Camera, ViewTransform};
use crate::render::surface::{Frame, MARGIN};

// d3-style wheel sensitivity: factor = 2^(-delta * WHEEL_SENSITIVITY)
const WHEEL_SENSITIVITY: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    Idle,
    Hovered(usize),
}

/// At most one active node plus the edges touching it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub node: Option<usize>,
    pub edges: SmallVec<[usize; 8]>,
}

impl HighlightState {
    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    In,
    Out,
    Reset,
}

impl ZoomCommand {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        match input {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "reset" => Ok(Self::Reset),
            _ => anyhow::bail!("invalid zoom command: {input} (expected in|out|reset)"),
        }
    }
}

/// Pointer-driven highlight/tooltip and pan/zoom for one drawn frame.
/// Never touches layout; only element flags, the tooltip and the camera.
#[derive(Debug, Clone)]
pub struct InteractionController {
    highlight: HighlightState,
    camera: Camera,
}

impl InteractionController {
    pub fn new(camera: Camera) -> Self {
        Self {
            highlight: HighlightState::default(),
            camera,
        }
    }

    pub fn for_frame(frame: &Frame) -> Self {
        Self::new(Camera::new(
            MARGIN.home(),
            (frame.outer_width, frame.outer_height),
        ))
    }

    pub fn state(&self) -> PointerState {
        match self.highlight.node {
            Some(node) => PointerState::Hovered(node),
            None => PointerState::Idle,
        }
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn transform(&self) -> ViewTransform {
        self.camera.transform()
    }

    // ----- Hover -----

    pub fn enter(&mut self, frame: &mut Frame, node: usize, pointer: (f64, f64)) {
        if node >= frame.nodes.len() {
            return;
        }
        if self.highlight.node == Some(node) {
            frame.tooltip.show(frame.nodes[node].tooltip.clone(), pointer);
            return;
        }
        if self.highlight.node.is_some() {
            self.leave(frame);
        }

        frame.nodes[node].active = true;
        let mut edges = SmallVec::new();
        for (i, edge) in frame.edges.iter_mut().enumerate() {
            if edge.touches(node) {
                edge.active = true;
                edges.push(i);
            }
        }
        self.highlight = HighlightState {
            node: Some(node),
            edges,
        };
        frame.tooltip.show(frame.nodes[node].tooltip.clone(), pointer);
    }

    pub fn enter_by_id(&mut self, frame: &mut Frame, id: &str, pointer: (f64, f64)) -> bool {
        match frame.node_index(id) {
            Some(node) => {
                self.enter(frame, node, pointer);
                true
            }
            None => false,
        }
    }

    pub fn leave(&mut self, frame: &mut Frame) {
        for node in frame.nodes.iter_mut() {
            node.active = false;
        }
        for edge in frame.edges.iter_mut() {
            edge.active = false;
        }
        self.highlight = HighlightState::default();
        frame.tooltip.hide();
    }

    /// Hit-tests the pointer (surface coordinates) and drives
    /// enter/leave transitions.
    pub fn pointer_move(&mut self, frame: &mut Frame, pointer: (f64, f64)) {
        let hit = frame.hit_test(self.camera.transform().invert(pointer));
        match (self.state(), hit) {
            (_, Some(node)) => self.enter(frame, node, pointer),
            (PointerState::Hovered(_), None) => self.leave(frame),
            (PointerState::Idle, None) => {}
        }
    }

    // ----- Zoom / pan -----

    pub fn zoom(&mut self, cmd: ZoomCommand) {
        match cmd {
            ZoomCommand::In => self.camera.zoom_in(),
            ZoomCommand::Out => self.camera.zoom_out(),
            ZoomCommand::Reset => self.camera.reset(),
        }
    }

    pub fn wheel(&mut self, delta_y: f64, anchor: (f64, f64)) {
        self.camera
            .wheel(2f64.powf(-delta_y * WHEEL_SENSITIVITY), anchor);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
    }

    pub fn tick(&mut self, dt: Duration) {
        self.camera.tick(dt);
    }

    pub fn settle(&mut self) {
        self.camera.finish();
    }
}
