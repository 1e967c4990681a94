//! Raster surface: the device-pixel buffer behind the drawing area.
//!
//! The buffer is always `floor(logical size) * device pixel ratio` pixels, and
//! every drawing call goes through [`Surface::to_device`] so logical
//! coordinates land on the right buffer pixels.

use crate::error::SurfaceError;
use crate::raster::{self, Composite};
use crate::types::{LogicalSize, PixelBuffer, Point, TRANSPARENT, pack_argb};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Owns the pixel buffer and the logical -> device transform.
#[derive(Debug, Clone)]
pub struct Surface {
    buffer: PixelBuffer,
    logical: LogicalSize,
    scale: f32, // device pixel ratio, >= 1
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(LogicalSize::default(), 1.0)
    }
}

/// Device pixel ratios below 1 (or NaN) are treated as 1.
fn clamp_ratio(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr > 1.0 { dpr } else { 1.0 }
}

fn device_len(logical: u32, dpr: f32) -> usize {
    (logical as f32 * dpr).floor() as usize
}

impl Surface {
    pub fn new(logical: LogicalSize, device_pixel_ratio: f32) -> Self {
        let scale = clamp_ratio(device_pixel_ratio);
        Self {
            buffer: PixelBuffer::new(
                device_len(logical.width, scale),
                device_len(logical.height, scale),
            ),
            logical,
            scale,
        }
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.scale
    }

    /// Read-only view of the live buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Pixel at device coordinates.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        self.buffer.get(x, y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, argb: u32) {
        self.buffer.put(x, y, argb);
    }

    /// Logical coordinates -> buffer coordinates.
    pub fn to_device(&self, p: Point) -> Point {
        p.scale(self.scale)
    }

    /// Follow a change of the logical display size and/or pixel ratio.
    ///
    /// When the buffer dimensions change, the old contents are kept at the
    /// origin (clipped, never resampled). When they don't, only the transform
    /// is updated.
    pub fn resize(&mut self, logical: LogicalSize, device_pixel_ratio: f32) {
        let scale = clamp_ratio(device_pixel_ratio);
        let width = device_len(logical.width, scale);
        let height = device_len(logical.height, scale);

        if (width, height) != self.buffer.dimensions() {
            let saved = self.snapshot().ok();
            self.buffer = PixelBuffer::new(width, height);
            if let Some(saved) = saved {
                self.buffer.blit_at_origin(&saved);
            }
            log::info!(
                "surface resized to {width}x{height} device px ({}x{} @ {scale})",
                logical.width,
                logical.height
            );
        }
        self.logical = logical;
        self.scale = scale;
    }

    /// Full copy of the current pixels.
    pub fn snapshot(&self) -> Result<PixelBuffer, SurfaceError> {
        if self.buffer.is_empty() {
            return Err(SurfaceError::Capture {
                width: self.buffer.width,
                height: self.buffer.height,
            });
        }
        Ok(self.buffer.clone())
    }

    /// Overwrite the buffer with `snapshot`. A snapshot of another size is
    /// clipped at the origin and the mismatch is logged.
    pub fn restore(&mut self, snapshot: &PixelBuffer) {
        if snapshot.dimensions() == self.buffer.dimensions() {
            self.buffer.pixels.copy_from_slice(&snapshot.pixels);
            return;
        }
        let err = SurfaceError::DimensionMismatch {
            expected: self.buffer.dimensions(),
            found: snapshot.dimensions(),
        };
        log::warn!("restoring clipped snapshot: {err}");
        self.buffer.fill(TRANSPARENT);
        self.buffer.blit_at_origin(snapshot);
    }

    /// Every pixel fully transparent.
    pub fn clear(&mut self) {
        self.buffer.fill(TRANSPARENT);
    }

    /// Stroke a segment given in logical coordinates and logical line width.
    pub fn stroke(&mut self, from: Point, to: Point, width: f32, op: Composite) {
        let (from, to) = (self.to_device(from), self.to_device(to));
        raster::stroke_segment(&mut self.buffer, from, to, width * self.scale, op);
    }

    /// Resample the logical content at `scale_factor` times the logical size,
    /// independent of the current device pixel ratio.
    pub fn export_scaled(&self, scale_factor: f32) -> Result<PixelBuffer, SurfaceError> {
        let source = self.snapshot()?;
        let k = scale_factor / self.scale;
        let width = (source.width as f32 * k).floor();
        let height = (source.height as f32 * k).floor();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(SurfaceError::EmptyExport(scale_factor));
        }
        let (width, height) = (width as u32, height as u32);

        if (width as usize, height as usize) == source.dimensions() {
            return Ok(source);
        }
        // Filter premultiplied, so transparent black can't bleed into edges.
        let resized = imageops::resize(&premultiplied(&source), width, height, FilterType::CatmullRom);
        Ok(unpremultiplied(&resized))
    }
}

fn premultiplied(buf: &PixelBuffer) -> RgbaImage {
    let mut img = buf.to_rgba_image();
    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        let mul = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        px.0 = [mul(r), mul(g), mul(b), a];
    }
    img
}

fn unpremultiplied(img: &RgbaImage) -> PixelBuffer {
    let mut buf = PixelBuffer::new(img.width() as usize, img.height() as usize);
    for (dst, px) in buf.pixels.iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = px.0;
        if a == 0 {
            continue;
        }
        let div = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
        *dst = pack_argb(a, div(r), div(g), div(b));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const RED: u32 = 0xFFFF_0000;

    fn painted(w: u32, h: u32) -> Surface {
        let mut s = Surface::new(LogicalSize::new(w, h), 1.0);
        for y in 0..h as usize {
            for x in 0..w as usize {
                s.set_pixel(x, y, 0xFF00_0000 | ((x as u32) << 8) | y as u32);
            }
        }
        s
    }

    #[test]
    fn buffer_tracks_logical_size_times_ratio() {
        let s = Surface::new(LogicalSize::new(100, 50), 2.0);
        assert_eq!((s.width(), s.height()), (200, 100));
        let s = Surface::new(LogicalSize::new(100, 50), 0.5);
        assert_eq!((s.width(), s.height()), (100, 50));
        assert_eq!(s.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn growing_keeps_content_at_origin() {
        let mut s = painted(4, 3);
        let before = s.buffer().clone();
        s.resize(LogicalSize::new(10, 8), 1.0);
        assert_eq!((s.width(), s.height()), (10, 8));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(s.pixel(x, y), before.get(x, y));
            }
        }
        assert_eq!(s.pixel(9, 7), Some(TRANSPARENT));
    }

    #[test]
    fn shrinking_drops_content_outside_bounds() {
        let mut s = painted(6, 6);
        let before = s.buffer().clone();
        s.resize(LogicalSize::new(2, 2), 1.0);
        assert_eq!(s.buffer().pixels.len(), 4);
        assert_eq!(s.pixel(1, 1), before.get(1, 1));
        s.resize(LogicalSize::new(6, 6), 1.0);
        assert_eq!(s.pixel(5, 5), Some(TRANSPARENT));
    }

    #[test]
    fn ratio_change_reapplies_transform() {
        let mut s = Surface::new(LogicalSize::new(10, 10), 1.0);
        s.resize(LogicalSize::new(5, 5), 2.0);
        // Same 10x10 buffer, new transform.
        assert_eq!((s.width(), s.height()), (10, 10));
        assert_eq!(s.to_device(Point::new(3.0, 4.0)), Point::new(6.0, 8.0));
    }

    #[test]
    fn growing_from_empty_does_not_fail() {
        let mut s = Surface::default();
        assert!(s.snapshot().is_err());
        s.resize(LogicalSize::new(3, 3), 1.0);
        assert!(s.buffer().pixels.iter().all(|&p| p == TRANSPARENT));
    }

    #[test]
    fn snapshot_of_zero_size_is_a_capture_error() {
        let s = Surface::new(LogicalSize::new(0, 10), 1.0);
        assert_eq!(
            s.snapshot(),
            Err(SurfaceError::Capture { width: 0, height: 10 })
        );
    }

    #[test]
    fn restore_round_trips_and_clips_mismatches() {
        let mut s = painted(4, 4);
        let snap = s.snapshot().unwrap();
        s.clear();
        s.restore(&snap);
        assert_eq!(s.buffer(), &snap);

        let mut small = PixelBuffer::new(2, 2);
        small.fill(RED);
        s.restore(&small);
        assert_eq!(s.pixel(1, 1), Some(RED));
        assert_eq!(s.pixel(3, 3), Some(TRANSPARENT));
    }

    #[test]
    fn stroke_is_scaled_by_ratio() {
        let mut s = Surface::new(LogicalSize::new(20, 20), 2.0);
        s.stroke(
            Point::new(2.0, 5.0),
            Point::new(18.0, 5.0),
            2.0,
            Composite::SourceOver(Rgba::opaque(255, 0, 0)),
        );
        // Logical y=5 is device y=10; width 2 -> 4 device px.
        assert_eq!(s.pixel(20, 10), Some(RED));
        assert_eq!(s.pixel(20, 8), Some(RED));
        assert_eq!(s.pixel(20, 14), Some(TRANSPARENT));
    }

    #[test]
    fn export_is_independent_of_ratio() {
        let lo = Surface::new(LogicalSize::new(30, 20), 1.0);
        let hi = Surface::new(LogicalSize::new(30, 20), 2.0);
        let a = lo.export_scaled(2.0).unwrap();
        let b = hi.export_scaled(2.0).unwrap();
        assert_eq!(a.dimensions(), (60, 40));
        assert_eq!(b.dimensions(), (60, 40));
    }

    #[test]
    fn export_preserves_solid_fill() {
        let mut s = Surface::new(LogicalSize::new(8, 8), 1.0);
        for y in 0..8 {
            for x in 0..8 {
                s.set_pixel(x, y, RED);
            }
        }
        let out = s.export_scaled(2.0).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
        assert_eq!(out.get(7, 7), Some(RED));
    }

    #[test]
    fn export_edges_keep_stroke_color() {
        let mut s = Surface::new(LogicalSize::new(20, 20), 1.0);
        s.stroke(
            Point::new(2.0, 10.0),
            Point::new(18.0, 10.0),
            4.0,
            Composite::SourceOver(Rgba::opaque(255, 0, 0)),
        );
        let out = s.export_scaled(2.0).unwrap();
        let mut visible = 0;
        for y in 0..out.height {
            for x in 0..out.width {
                let px = out.get(x, y).unwrap();
                if px >> 24 != 0 {
                    visible += 1;
                    assert_eq!(px & 0x00FF_FFFF, 0xFF_0000, "({x},{y}) a={}", px >> 24);
                }
            }
        }
        assert!(visible > 0);
    }

    #[test]
    fn export_rejects_empty_results() {
        let s = Surface::new(LogicalSize::new(8, 8), 1.0);
        assert_eq!(s.export_scaled(0.0), Err(SurfaceError::EmptyExport(0.0)));
        assert!(Surface::default().export_scaled(2.0).is_err());
    }
}
