// Error types. Every variant states *where* things went wrong.
use thiserror::Error;

/// Failures of the raster surface. None of these are fatal to an interaction:
/// callers log them and carry on without history or without restoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The buffer could not be read (zero width or height).
    #[error("cannot capture a {width}x{height} surface")]
    Capture { width: usize, height: usize },
    /// A restore buffer does not match the live buffer size.
    #[error("restore buffer is {found:?}, surface is {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The requested export scale produces an empty image.
    #[error("export at scale {0} has no pixels")]
    EmptyExport(f32),
}

/// A stroke color string that is not a `#rgb` / `#rrggbb` hex triplet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {0:?}")]
pub struct ColorError(pub String);

/// Application level errors, surfaced from `main`.
#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),
    /// Exporting the canvas failed
    #[error("export error: {0}")]
    Export(#[from] SurfaceError),
    /// Encoding the PNG failed
    #[error("png encode error: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing the PNG failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
