// Tool settings as an explicit value handed to the engine on every call.

use crate::color::{HexColor, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Brush,
    Eraser,
}

impl ToolMode {
    pub fn label(self) -> &'static str {
        match self {
            ToolMode::Brush => "Brush",
            ToolMode::Eraser => "Eraser",
        }
    }
}

/// Mode, color, size and opacity of the active tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolConfig {
    pub mode: ToolMode,
    pub color: HexColor,
    pub size: f32,    // line width in logical pixels
    pub opacity: f32, // 0..1, brush only
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            mode: ToolMode::Brush,
            color: HexColor::new(0x1e, 0x1e, 0x1e),
            size: 6.0,
            opacity: 1.0,
        }
    }
}

impl ToolConfig {
    pub fn brush(color: HexColor, size: f32, opacity: f32) -> Self {
        Self {
            mode: ToolMode::Brush,
            color,
            size,
            opacity,
        }
    }

    pub fn eraser(size: f32) -> Self {
        Self {
            mode: ToolMode::Eraser,
            size,
            ..Self::default()
        }
    }

    pub fn with_mode(self, mode: ToolMode) -> Self {
        Self { mode, ..self }
    }

    /// Brush paint; the eraser ignores color and opacity.
    pub fn paint(&self) -> Rgba {
        self.color.with_alpha(self.opacity)
    }

    /// Toolbar status text, e.g. `Brush: 6px · #1E1E1E`.
    pub fn status(&self) -> String {
        let tail = match self.mode {
            ToolMode::Brush => self.color.to_string(),
            ToolMode::Eraser => "bg".to_string(),
        };
        format!("{}: {}px · {}", self.mode.label(), self.size, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_shows_color_for_brush_only() {
        let brush = ToolConfig::brush(HexColor::new(0xff, 0, 0), 5.0, 1.0);
        assert_eq!(brush.status(), "Brush: 5px · #FF0000");
        assert_eq!(brush.with_mode(ToolMode::Eraser).status(), "Eraser: 5px · bg");
    }
}
