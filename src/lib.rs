//! Raster sketching core: a device-pixel-ratio aware surface, a brush/eraser
//! stroke engine with bounded undo/redo, and PNG export.

pub mod color;
pub mod draw;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod raster;
pub mod settings;
pub mod surface;
pub mod tool;
pub mod types;
pub mod viewport;

pub use color::{HexColor, Rgba};
pub use engine::{StrokeEngine, StrokeSession, StrokeState};
pub use error::{ColorError, Error, SurfaceError};
pub use history::{History, MAX_HISTORY};
pub use surface::Surface;
pub use tool::{ToolConfig, ToolMode};
pub use types::{LogicalSize, PixelBuffer, Point};
