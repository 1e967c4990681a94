// PNG export of a resampled canvas.

use crate::error::Error;
use crate::types::PixelBuffer;
use chrono::{DateTime, Utc};
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Default export scale relative to the logical canvas size.
pub const EXPORT_SCALE: f32 = 2.0;

/// `sketch-<unix millis>.png`
pub fn file_name(now: DateTime<Utc>) -> String {
    format!("sketch-{}.png", now.timestamp_millis())
}

/// Encode as an 8-bit RGBA PNG.
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>, Error> {
    let mut out = Cursor::new(Vec::new());
    buf.to_rgba_image().write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Write `buf` into `dir` under a timestamped name and return the path.
pub fn save_png(buf: &PixelBuffer, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(Utc::now()));
    std::fs::write(&path, encode_png(buf)?)?;
    log::info!("saved {}x{} sketch to {}", buf.width, buf.height, path.display());
    Ok(path)
}
