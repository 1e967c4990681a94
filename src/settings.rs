// Command line settings.

use crate::color::HexColor;
use crate::export::EXPORT_SCALE;
use crate::history::MAX_HISTORY;
use crate::tool::{ToolConfig, ToolMode};
use crate::types::LogicalSize;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sketchpad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Freehand raster sketching with undo/redo and PNG export", long_about = None)]
pub struct Settings {
    /// Initial drawing area width (logical pixels)
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Initial drawing area height (logical pixels)
    #[arg(long, default_value_t = 640)]
    pub height: u32,

    /// Device pixel ratio of the backing buffer (values below 1 mean 1)
    #[arg(long, default_value_t = 1.0)]
    pub dpr: f32,

    /// Export size relative to the logical canvas
    #[arg(long, default_value_t = EXPORT_SCALE)]
    pub export_scale: f32,

    /// Undo/redo depth
    #[arg(long, default_value_t = MAX_HISTORY)]
    pub history_depth: usize,

    /// Directory for exported PNGs
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Initial brush color (#rgb or #rrggbb)
    #[arg(long, default_value = "#1e1e1e")]
    pub color: String,

    /// Initial tool size (logical pixels)
    #[arg(long, default_value_t = 6.0)]
    pub size: f32,

    /// Initial brush opacity (0..1)
    #[arg(long, default_value_t = 1.0)]
    pub opacity: f32,

    /// Start with the eraser selected
    #[arg(long)]
    pub eraser: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::parse_from(["sketchpad"])
    }
}

impl Settings {
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.width, self.height)
    }

    /// Initial tool; a bad color falls back to the default brush color.
    pub fn tool(&self) -> ToolConfig {
        let defaults = ToolConfig::default();
        let color = self.color.parse::<HexColor>().unwrap_or_else(|err| {
            log::warn!("{err}; using {}", defaults.color);
            defaults.color
        });
        ToolConfig {
            mode: if self.eraser { ToolMode::Eraser } else { ToolMode::Brush },
            color,
            size: if self.size > 0.0 { self.size } else { defaults.size },
            opacity: self.opacity.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_toolbar() {
        let s = Settings::default();
        assert_eq!(s.logical_size(), LogicalSize::new(960, 640));
        assert_eq!(s.history_depth, 30);
        assert_eq!(s.export_scale, 2.0);
        assert_eq!(s.tool(), ToolConfig::default());
    }

    #[test]
    fn parses_overrides_and_falls_back_on_bad_color() {
        let s = Settings::parse_from([
            "sketchpad", "--color", "#zzz", "--size", "12", "--opacity", "3", "--eraser", "--dpr", "2",
        ]);
        let tool = s.tool();
        assert_eq!(tool.mode, ToolMode::Eraser);
        assert_eq!(tool.color, ToolConfig::default().color);
        assert_eq!(tool.size, 12.0);
        assert_eq!(tool.opacity, 1.0);
        assert_eq!(s.dpr, 2.0);
    }
}
