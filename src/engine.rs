//! Stroke & history engine.
//!
//! A two-state machine (`Idle` / `Stroking`) on top of a [`Surface`]. Every
//! mutation snapshots the surface *before* touching pixels, so undo always
//! returns to the pre-mutation state.

use crate::history::History;
use crate::raster::Composite;
use crate::surface::Surface;
use crate::tool::{ToolConfig, ToolMode};
use crate::types::{LogicalSize, PixelBuffer, Point};
use crate::viewport::ResizeListener;

/// The in-progress interaction between begin and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSession {
    /// Tool used for the most recent segment (the begin config until then).
    pub tool: ToolConfig,
    /// Last sampled position, logical coordinates.
    pub last: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking(StrokeSession),
}

#[derive(Debug, Clone, Default)]
pub struct StrokeEngine {
    surface: Surface,
    history: History,
    state: StrokeState,
}

impl StrokeEngine {
    pub fn new(surface: Surface, history: History) -> Self {
        Self {
            surface,
            history,
            state: StrokeState::Idle,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking(_))
    }

    /// Tool of the stroke in progress, as of its latest segment.
    pub fn active_tool(&self) -> Option<&ToolConfig> {
        match &self.state {
            StrokeState::Stroking(session) => Some(&session.tool),
            StrokeState::Idle => None,
        }
    }

    /// Snapshot the surface onto the undo stack. A failed capture only costs
    /// the ability to undo; the caller's mutation goes ahead.
    fn push_history(&mut self) {
        match self.surface.snapshot() {
            Ok(snapshot) => self.history.record(snapshot),
            Err(err) => log::warn!("history push failed: {err}"),
        }
    }

    /// Idle -> Stroking. Records history, then starts a path at `position`.
    /// Calling it mid-stroke starts a fresh stroke.
    pub fn begin_stroke(&mut self, position: Point, tool: ToolConfig) {
        self.push_history();
        self.state = StrokeState::Stroking(StrokeSession {
            tool,
            last: position,
        });
        log::debug!("begin {:?} stroke at ({}, {})", tool.mode, position.x, position.y);
    }

    /// Render the segment from the last position to `position` with the tool
    /// settings current at this sample. No-op when idle.
    pub fn extend_stroke(&mut self, position: Point, tool: &ToolConfig) {
        let StrokeState::Stroking(session) = &mut self.state else {
            return;
        };
        let op = match tool.mode {
            ToolMode::Brush => Composite::SourceOver(tool.paint()),
            ToolMode::Eraser => Composite::DestinationOut,
        };
        self.surface.stroke(session.last, position, tool.size, op);
        session.last = position;
        session.tool = *tool;
    }

    /// Stroking -> Idle. The rendered pixels stay; no-op when idle.
    pub fn end_stroke(&mut self) {
        if let StrokeState::Stroking(_) = self.state {
            log::debug!("end stroke");
            self.state = StrokeState::Idle;
        }
    }

    /// Cancel/leave behaves exactly like a normal end.
    pub fn cancel_stroke(&mut self) {
        self.end_stroke();
    }

    /// Record history and wipe the surface. Abandons any in-progress stroke.
    pub fn clear_all(&mut self) {
        self.push_history();
        self.surface.clear();
        self.state = StrokeState::Idle;
    }

    /// Step back one mutation. No-op with an empty undo stack, or when the
    /// current state cannot be captured for redo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let Some(current) = self.capture_current("undo") else {
            return false;
        };
        match self.history.undo(current) {
            Some(prev) => {
                self.surface.restore(&prev);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone mutation. Symmetric to [`Self::undo`].
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let Some(current) = self.capture_current("redo") else {
            return false;
        };
        match self.history.redo(current) {
            Some(next) => {
                self.surface.restore(&next);
                true
            }
            None => false,
        }
    }

    fn capture_current(&self, what: &str) -> Option<PixelBuffer> {
        self.surface
            .snapshot()
            .map_err(|err| log::warn!("{what} skipped: {err}"))
            .ok()
    }

    pub fn resize(&mut self, logical: LogicalSize, device_pixel_ratio: f32) {
        self.surface.resize(logical, device_pixel_ratio);
    }

    /// Logical content resampled at `scale_factor`; `None` when the surface
    /// is empty.
    pub fn export_scaled(&self, scale_factor: f32) -> Option<PixelBuffer> {
        self.surface
            .export_scaled(scale_factor)
            .map_err(|err| log::warn!("export failed: {err}"))
            .ok()
    }
}

impl ResizeListener for StrokeEngine {
    fn on_resize(&mut self, logical: LogicalSize, device_pixel_ratio: f32) {
        self.resize(logical, device_pixel_ratio);
    }
}
