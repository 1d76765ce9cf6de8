//! Pen tool: click to place anchors, drag to pull out smooth handles.

use crate::config::PenConfig;
use crate::input::{KeyPress, ToolEvent};
use crate::overlay::HandleOverlay;
use crate::path::{EditPath, Segment};
use kurbo::Point;

/// State of a pen editing session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PenState {
    /// No session in progress.
    #[default]
    Idle,
    /// Placing; the preview's trailing segment follows the pointer.
    AnchorPending,
    /// Placing; the pointer was pressed at `anchor` and drags shape the handles.
    HandleDragging { anchor: Point },
}

impl PenState {
    /// Whether an editing session is active.
    pub fn is_placing(&self) -> bool {
        !matches!(self, PenState::Idle)
    }

    /// Whether a handle drag is armed.
    pub fn is_dragging(&self) -> bool {
        matches!(self, PenState::HandleDragging { .. })
    }
}

/// Interactive path editor.
///
/// Owns the committed path (the finished part of the curve) and the preview
/// path (the committed path's last segment plus the segment under the
/// cursor). The preview always holds either zero or two segments.
#[derive(Debug, Clone, Default)]
pub struct PenTool {
    state: PenState,
    committed: Option<EditPath>,
    preview: Option<EditPath>,
    config: PenConfig,
}

impl PenTool {
    /// Create a pen tool with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pen tool with custom configuration.
    pub fn with_config(config: PenConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn config(&self) -> &PenConfig {
        &self.config
    }

    /// Whether an editing session is active.
    pub fn is_placing(&self) -> bool {
        self.state.is_placing()
    }

    /// The committed path. Still available after the session ends.
    pub fn committed(&self) -> Option<&EditPath> {
        self.committed.as_ref()
    }

    /// The preview path, present only while placing.
    pub fn preview(&self) -> Option<&EditPath> {
        self.preview.as_ref()
    }

    /// Take the finished path once the session has ended.
    pub fn take_finished(&mut self) -> Option<EditPath> {
        if self.state.is_placing() {
            return None;
        }
        self.committed.take()
    }

    /// Handle overlay for the current state.
    pub fn overlay(&self) -> HandleOverlay {
        HandleOverlay::build(
            &self.state,
            self.committed.as_ref(),
            self.preview.as_ref(),
            &self.config,
        )
    }

    /// Route a tool event to the matching handler.
    pub fn handle_event(&mut self, event: &ToolEvent) {
        match event {
            ToolEvent::MouseDown(p) => self.pointer_down(*p),
            ToolEvent::MouseMove(p) => self.pointer_move(*p),
            ToolEvent::MouseDrag(p) => self.pointer_drag(*p),
            ToolEvent::MouseUp(p) => self.pointer_up(*p),
            ToolEvent::KeyDown(press) => self.key_down(press),
        }
    }

    /// Pointer pressed.
    ///
    /// Starts a session when idle; otherwise arms a handle drag anchored at
    /// `point`. Arming does not touch the geometry.
    pub fn pointer_down(&mut self, point: Point) {
        match self.state {
            PenState::Idle => {
                if self.committed.is_some() {
                    log::debug!("Discarding previous path that was never taken");
                }
                let mut committed =
                    EditPath::with_segment(self.config.committed_style.clone(), Segment::new(point));
                committed.selected = true;
                self.committed = Some(committed);
                self.preview = Some(EditPath::new(self.config.preview_style.clone()));
                self.state = PenState::AnchorPending;
                self.rebuild_preview(point);
                log::info!("Path started at ({:.1}, {:.1})", point.x, point.y);
            }
            PenState::AnchorPending | PenState::HandleDragging { .. } => {
                self.state = PenState::HandleDragging { anchor: point };
            }
        }
    }

    /// Pointer moved with no button held.
    pub fn pointer_move(&mut self, point: Point) {
        match self.state {
            PenState::AnchorPending => self.rebuild_preview(point),
            PenState::Idle | PenState::HandleDragging { .. } => {
                log::trace!("Ignoring move in {:?}", self.state);
            }
        }
    }

    /// Pointer moved with the button held.
    pub fn pointer_drag(&mut self, point: Point) {
        match self.state {
            PenState::HandleDragging { anchor } => self.drag_handles(anchor, point),
            PenState::Idle | PenState::AnchorPending => {
                log::trace!("Ignoring drag in {:?}", self.state);
            }
        }
    }

    /// Pointer released: commits the preview's trailing segment, handles as
    /// dragged, at the armed anchor.
    pub fn pointer_up(&mut self, point: Point) {
        let PenState::HandleDragging { anchor } = self.state else {
            log::trace!("Ignoring release in {:?}", self.state);
            return;
        };

        let Some(mut segment) = self.preview.as_ref().and_then(EditPath::last).copied() else {
            return;
        };
        // Without a reported drag the trailing segment still sits where the
        // pointer last moved
        segment.point = anchor;
        let Some(committed) = self.committed.as_mut() else {
            return;
        };
        committed.push(segment);
        log::debug!(
            "Committed segment {} at ({:.1}, {:.1})",
            committed.len(),
            segment.point.x,
            segment.point.y
        );

        self.state = PenState::AnchorPending;
        self.rebuild_preview(point);
    }

    /// Key pressed: Enter/Escape finish, command/control+Z removes the last point.
    pub fn key_down(&mut self, press: &KeyPress) {
        if !self.state.is_placing() {
            return;
        }
        if press.is_finish() {
            self.finish();
        } else if press.is_undo() {
            self.undo();
        }
    }

    /// End the session, leaving the committed path as the result.
    fn finish(&mut self) {
        self.state = PenState::Idle;
        self.preview = None;
        if let Some(committed) = self.committed.as_mut() {
            committed.selected = false;
            log::info!("Path finished with {} segments", committed.len());
        }
    }

    /// Remove the last committed segment. The initial anchor cannot be removed.
    fn undo(&mut self) {
        let Some(committed) = self.committed.as_mut() else {
            return;
        };
        if committed.len() <= 1 {
            return;
        }
        committed.pop();
        log::debug!("Undo: {} segments remain", committed.len());

        if committed.len() <= 1 {
            self.finish();
            return;
        }

        let Some(last) = committed.last().map(|s| s.point) else {
            return;
        };
        self.state = PenState::AnchorPending;
        self.rebuild_preview(last);
    }

    /// Rebuild the preview as [committed last segment, bare segment at `point`].
    fn rebuild_preview(&mut self, point: Point) {
        let (Some(committed), Some(preview)) = (self.committed.as_ref(), self.preview.as_mut())
        else {
            return;
        };
        let Some(last) = committed.last() else {
            return;
        };
        preview.clear();
        preview.push(*last);
        preview.push(Segment::new(point));
    }

    /// Give the preview's trailing segment, anchored at `anchor`, the
    /// symmetric handles for a drag to `point`.
    fn drag_handles(&mut self, anchor: Point, point: Point) {
        if let Some(trailing) = self.preview.as_mut().and_then(EditPath::last_mut) {
            *trailing = Segment::symmetric(anchor, point);
        }
    }
}
