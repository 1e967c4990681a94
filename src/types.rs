// Core types shared by the surface, the rasterizer and the window.

/// A position in logical (display) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale both coordinates (logical -> device pixels).
    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

/// Size of the drawing area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// RGBA raster in device pixels.
/// Each entry is 0xAARRGGBB with straight (non-premultiplied) alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,     // device pixels
    pub height: usize,    // device pixels
    pub pixels: Vec<u32>, // length = width * height
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width * height],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at (x,y), or `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Write a pixel if (x,y) is inside bounds.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, argb: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = argb;
        }
    }

    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Copy `src` onto this buffer with its origin at (0,0), clipping whatever
    /// falls outside either buffer.
    pub fn blit_at_origin(&mut self, src: &PixelBuffer) {
        let w = self.width.min(src.width);
        let h = self.height.min(src.height);
        for y in 0..h {
            let dst_row = y * self.width;
            let src_row = y * src.width;
            self.pixels[dst_row..dst_row + w].copy_from_slice(&src.pixels[src_row..src_row + w]);
        }
    }

    /// Convert to an `image` RGBA buffer (R,G,B,A byte order).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            let [a, r, g, b] = px.to_be_bytes();
            bytes.extend_from_slice(&[r, g, b, a]);
        }
        // Length always matches width*height*4, so this cannot fail.
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, bytes)
            .unwrap_or_else(|| image::RgbaImage::new(self.width as u32, self.height as u32))
    }

    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                u32::from_be_bytes([a, r, g, b])
            })
            .collect();
        Self {
            width: w as usize,
            height: h as usize,
            pixels,
        }
    }
}

// Snapshots can be megabytes; print the shape only.
impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub const TRANSPARENT: u32 = 0x0000_0000;

#[inline]
pub fn alpha_of(argb: u32) -> u8 {
    (argb >> 24) as u8
}

#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_to_smaller_destination() {
        let mut src = PixelBuffer::new(4, 4);
        src.fill(0xFF11_2233);
        let mut dst = PixelBuffer::new(2, 3);
        dst.blit_at_origin(&src);
        assert!(dst.pixels.iter().all(|&p| p == 0xFF11_2233));
    }

    #[test]
    fn blit_leaves_uncovered_area_untouched() {
        let mut src = PixelBuffer::new(1, 1);
        src.fill(0xFFFF_FFFF);
        let mut dst = PixelBuffer::new(3, 2);
        dst.blit_at_origin(&src);
        assert_eq!(dst.get(0, 0), Some(0xFFFF_FFFF));
        assert_eq!(dst.get(1, 0), Some(TRANSPARENT));
        assert_eq!(dst.get(0, 1), Some(TRANSPARENT));
    }

    #[test]
    fn image_conversion_keeps_channel_order() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.put(1, 0, pack_argb(0x80, 0x10, 0x20, 0x30));
        let img = buf.to_rgba_image();
        assert_eq!(img.get_pixel(1, 0).0, [0x10, 0x20, 0x30, 0x80]);
        assert_eq!(PixelBuffer::from_rgba_image(&img), buf);
    }
}
