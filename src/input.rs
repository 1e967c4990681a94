// Thin adapter between host input and the engine: pointer events become
// begin/extend/end calls, shortcuts become commands.

use crate::engine::StrokeEngine;
use crate::tool::{ToolConfig, ToolMode};
use crate::types::Point;

/// Pointer/touch events in logical coordinates (already relative to the
/// drawing area).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
    Leave,
}

/// Toolbar buttons and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetMode(ToolMode),
    Undo,
    Redo,
    Clear,
    Save,
    /// Grow (positive) or shrink the tool size by this many logical pixels.
    AdjustSize(f32),
}

pub const MIN_TOOL_SIZE: f32 = 1.0;
pub const MAX_TOOL_SIZE: f32 = 64.0;

/// Route one pointer event; `tool` is the toolbar state at this instant.
pub fn dispatch_pointer(engine: &mut StrokeEngine, event: PointerEvent, tool: &ToolConfig) {
    match event {
        PointerEvent::Down(p) => engine.begin_stroke(p, *tool),
        PointerEvent::Move(p) => engine.extend_stroke(p, tool),
        PointerEvent::Up => engine.end_stroke(),
        PointerEvent::Cancel | PointerEvent::Leave => engine.cancel_stroke(),
    }
}

/// Apply a command. Returns `true` for `Save`, which the caller owns since
/// writing files is outside the engine.
pub fn dispatch_command(engine: &mut StrokeEngine, command: Command, tool: &mut ToolConfig) -> bool {
    match command {
        Command::SetMode(mode) => tool.mode = mode,
        Command::Undo => {
            engine.undo();
        }
        Command::Redo => {
            engine.redo();
        }
        Command::Clear => engine.clear_all(),
        Command::AdjustSize(delta) => {
            tool.size = (tool.size + delta).clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE);
        }
        Command::Save => return true,
    }
    false
}

/// Track button state across frames and turn it into pointer events.
#[derive(Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    /// `pos` is `None` when the cursor is outside the drawing area.
    pub fn update(&mut self, pos: Option<Point>, pressed: bool) -> Option<PointerEvent> {
        let event = match (self.down, pressed, pos) {
            (false, true, Some(p)) => {
                self.down = true;
                Some(PointerEvent::Down(p))
            }
            (true, true, Some(p)) if self.last != Some(p) => Some(PointerEvent::Move(p)),
            (true, true, None) => {
                self.down = false;
                Some(PointerEvent::Leave)
            }
            (true, false, _) => {
                self.down = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        };
        self.last = pos;
        event
    }
}
