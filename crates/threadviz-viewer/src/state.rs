use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use threadviz_core::{build_thread, ThreadNode, ThreadPayload};

use crate::error::ThreadError;
use crate::graph::layout_thread;
use crate::net::{ThreadEvent, ThreadEventKind, ThreadSource};
use crate::render::style::Theme;
use crate::render::surface::RenderSurface;
use crate::ui::interaction::{InteractionController, ZoomCommand};
use crate::ui::panel::PostDetails;
use crate::util::ids::extract_post_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading(u64),
    Ready,
    Failed(String),
}

/// Everything one thread view owns, rebuilt per request.
#[derive(Debug, Clone)]
pub struct ThreadViewState {
    status: ViewStatus,
    details: Option<PostDetails>,
    thread: Option<ThreadNode>,
    surface: RenderSurface,
    interaction: Option<InteractionController>,
}

impl ThreadViewState {
    pub fn new(container_width: f64, theme: Theme) -> Self {
        Self {
            status: ViewStatus::Idle,
            details: None,
            thread: None,
            surface: RenderSurface::new(container_width, theme),
            interaction: None,
        }
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn details(&self) -> Option<&PostDetails> {
        self.details.as_ref()
    }

    pub fn thread(&self) -> Option<&ThreadNode> {
        self.thread.as_ref()
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn interaction(&self) -> Option<&InteractionController> {
        self.interaction.as_ref()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.surface.set_theme(theme);
    }

    // ----- Request lifecycle -----

    /// Validates the post reference and starts a request. Malformed input
    /// fails the view without touching `source`.
    pub fn visualize<S: ThreadSource>(
        &mut self,
        input: &str,
        source: &mut S,
    ) -> Result<u64, ThreadError> {
        let was_loading = matches!(self.status, ViewStatus::Loading(_));
        self.discard_view();
        let post = match extract_post_id(input) {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!(input, "rejected post reference");
                if was_loading {
                    source.cancel();
                }
                self.status = ViewStatus::Failed(e.to_string());
                return Err(e);
            }
        };
        let id = source.request(&post);
        self.status = ViewStatus::Loading(id);
        Ok(id)
    }

    fn discard_view(&mut self) {
        self.details = None;
        self.thread = None;
        self.surface.clear();
        self.interaction = None;
    }

    /// Returns false when the event belongs to a superseded request.
    pub fn apply(&mut self, event: ThreadEvent) -> bool {
        let ViewStatus::Loading(active) = self.status else {
            tracing::debug!(request = event.request, "no request in flight, event dropped");
            return false;
        };
        if event.request != active {
            tracing::debug!(request = event.request, active, "stale thread event dropped");
            return false;
        }

        match event.kind {
            ThreadEventKind::Loaded(payload) => self.show(*payload),
            ThreadEventKind::Failed(message) => {
                tracing::warn!(request = active, %message, "thread visualization unavailable");
                self.status = ViewStatus::Failed(message);
            }
            ThreadEventKind::Cancelled => self.status = ViewStatus::Idle,
        }
        true
    }

    fn show(&mut self, payload: ThreadPayload) {
        let thread = build_thread(&payload.post, &payload.comments);
        {
            let (width, height) = self.surface.inner_size();
            let layout = layout_thread(&thread, width, height);
            let frame = self.surface.draw(&layout);
            self.interaction = Some(InteractionController::for_frame(frame));
        }
        tracing::info!(
            post = %payload.post.id,
            nodes = thread.node_count(),
            depth = thread.max_depth(),
            "comment thread ready"
        );
        self.details = Some(PostDetails::from_post(&payload.post));
        self.thread = Some(thread);
        self.status = ViewStatus::Ready;
    }

    pub fn pump(&mut self, rx: &Receiver<ThreadEvent>) {
        for event in rx.try_iter() {
            self.apply(event);
        }
    }

    /// Blocks until the active request settles or `timeout` elapses.
    pub fn wait(&mut self, rx: &Receiver<ThreadEvent>, timeout: Duration) -> anyhow::Result<()> {
        let deadline = Instant::now() + timeout;
        while matches!(self.status, ViewStatus::Loading(_)) {
            let left = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(left) {
                Ok(event) => {
                    self.apply(event);
                }
                Err(RecvTimeoutError::Timeout) => {
                    anyhow::bail!("timed out waiting for the comment thread")
                }
                Err(RecvTimeoutError::Disconnected) => {
                    anyhow::bail!("thread fetcher stopped before answering")
                }
            }
        }
        Ok(())
    }

    // ----- Interaction -----

    pub fn hover_node(&mut self, id: &str) -> bool {
        let (Some(frame), Some(ctl)) = (self.surface.frame_mut(), self.interaction.as_mut()) else {
            return false;
        };
        let Some(index) = frame.node_index(id) else {
            return false;
        };
        let node = &frame.nodes[index];
        let pointer = ctl.transform().apply((node.x, node.y));
        ctl.enter(frame, index, pointer);
        true
    }

    pub fn pointer_move(&mut self, pointer: (f64, f64)) {
        if let (Some(frame), Some(ctl)) = (self.surface.frame_mut(), self.interaction.as_mut()) {
            ctl.pointer_move(frame, pointer);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let (Some(frame), Some(ctl)) = (self.surface.frame_mut(), self.interaction.as_mut()) {
            ctl.leave(frame);
        }
    }

    pub fn zoom(&mut self, cmd: ZoomCommand) {
        if let Some(ctl) = self.interaction.as_mut() {
            ctl.zoom(cmd);
            ctl.settle();
        }
    }

    pub fn svg(&self) -> Option<String> {
        if self.status != ViewStatus::Ready {
            return None;
        }
        let transform = self.interaction.as_ref()?.transform();
        self.surface.to_svg(&transform)
    }
}
