// Software stroke rasterizer: one round-capped line segment at a time.
// A segment is a capsule (all points within width/2 of the segment), which
// gives round caps for free and round joins where consecutive segments meet.

use crate::color::Rgba;
use crate::types::{PixelBuffer, Point, alpha_of, pack_argb};

/// How new stroke pixels combine with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Composite {
    /// Normal painting over existing content.
    SourceOver(Rgba),
    /// Removes existing alpha under the stroke; color is irrelevant.
    DestinationOut,
}

/// Distance from `p` to the segment `a`-`b`.
#[inline]
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);
    let len2 = abx * abx + aby * aby;
    // Degenerate segment: plain distance to the point (a round dot).
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}

/// Stroke one segment (device pixel coordinates) into `buf`.
/// Edges are anti-aliased over one pixel. Non-finite input is ignored.
pub fn stroke_segment(buf: &mut PixelBuffer, from: Point, to: Point, width: f32, op: Composite) {
    if buf.is_empty() || !(width > 0.0) || !width.is_finite() {
        return;
    }
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return;
    }
    let half = width * 0.5;

    // Scan just the bounding box of the capsule, grown by the AA fringe.
    let pad = half + 1.0;
    let x0 = (from.x.min(to.x) - pad).floor().max(0.0) as usize;
    let y0 = (from.y.min(to.y) - pad).floor().max(0.0) as usize;
    let x1 = ((from.x.max(to.x) + pad).ceil().max(0.0) as usize).min(buf.width);
    let y1 = ((from.y.max(to.y) + pad).ceil().max(0.0) as usize).min(buf.height);

    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the pixel center.
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = distance_to_segment(center, from, to);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let idx = y * buf.width + x;
            buf.pixels[idx] = match op {
                Composite::SourceOver(paint) => source_over(buf.pixels[idx], paint, coverage),
                Composite::DestinationOut => destination_out(buf.pixels[idx], coverage),
            };
        }
    }
}

/// Straight-alpha "over": result = src + dst * (1 - src_a).
#[inline]
pub fn source_over(dst: u32, paint: Rgba, coverage: f32) -> u32 {
    let sa = paint.a * coverage;
    if sa <= 0.0 {
        return dst;
    }
    let [da8, dr, dg, db] = dst.to_be_bytes();
    let da = da8 as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return 0;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    pack_argb(
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        mix(paint.r, dr),
        mix(paint.g, dg),
        mix(paint.b, db),
    )
}

/// "Destination out" with a fully opaque source: dst_a *= 1 - coverage.
#[inline]
pub fn destination_out(dst: u32, coverage: f32) -> u32 {
    let da = alpha_of(dst);
    if da == 0 {
        return 0;
    }
    let a = (da as f32 * (1.0 - coverage)).round().clamp(0.0, 255.0) as u8;
    if a == 0 {
        // Fully erased pixels carry no color.
        return 0;
    }
    (dst & 0x00FF_FFFF) | ((a as u32) << 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    #[test]
    fn horizontal_segment_covers_its_band() {
        let mut buf = PixelBuffer::new(64, 32);
        stroke_segment(
            &mut buf,
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            5.0,
            Composite::SourceOver(RED),
        );
        for x in 10..50 {
            assert_eq!(buf.get(x, 10), Some(0xFFFF_0000), "x={x}");
            assert_eq!(buf.get(x, 9), Some(0xFFFF_0000), "x={x}");
        }
        assert_eq!(buf.get(30, 20), Some(0));
        assert_eq!(buf.get(30, 0), Some(0));
        // Round caps: nothing well past either end.
        assert_eq!(buf.get(2, 10), Some(0));
        assert_eq!(buf.get(58, 10), Some(0));
    }

    #[test]
    fn zero_length_segment_paints_a_dot() {
        let mut buf = PixelBuffer::new(16, 16);
        let p = Point::new(8.0, 8.0);
        stroke_segment(&mut buf, p, p, 4.0, Composite::SourceOver(RED));
        assert_eq!(buf.get(8, 8), Some(0xFFFF_0000));
        assert_eq!(buf.get(0, 0), Some(0));
    }

    #[test]
    fn half_opacity_over_transparent_keeps_color() {
        let px = source_over(0, Rgba { a: 0.5, ..RED }, 1.0);
        assert_eq!(px, pack_argb(128, 255, 0, 0));
    }

    #[test]
    fn over_opaque_background_mixes_color() {
        let white = 0xFFFF_FFFF;
        let px = source_over(white, Rgba { a: 0.5, ..RED }, 1.0);
        let [a, r, g, b] = px.to_be_bytes();
        assert_eq!((a, r), (255, 255));
        assert!((g as i32 - 128).abs() <= 1 && (b as i32 - 128).abs() <= 1);
    }

    #[test]
    fn destination_out_is_idempotent_on_transparency() {
        assert_eq!(destination_out(0, 1.0), 0);
        assert_eq!(destination_out(0, 0.3), 0);
        let mut buf = PixelBuffer::new(8, 8);
        stroke_segment(&mut buf, Point::new(0.0, 0.0), Point::new(8.0, 8.0), 6.0, Composite::DestinationOut);
        assert!(buf.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn destination_out_removes_alpha_only() {
        let px = destination_out(0xFF12_3456, 0.5);
        assert_eq!(px & 0x00FF_FFFF, 0x12_3456);
        assert_eq!(alpha_of(px), 128);
        assert_eq!(destination_out(0xFF12_3456, 1.0), 0);
    }

    #[test]
    fn ignores_bad_widths_and_coordinates() {
        let mut buf = PixelBuffer::new(8, 8);
        let a = Point::new(1.0, 1.0);
        stroke_segment(&mut buf, a, Point::new(6.0, 6.0), 0.0, Composite::SourceOver(RED));
        stroke_segment(&mut buf, a, Point::new(f32::NAN, 6.0), 3.0, Composite::SourceOver(RED));
        stroke_segment(&mut buf, a, Point::new(6.0, 6.0), f32::NAN, Composite::SourceOver(RED));
        assert!(buf.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn clips_segments_outside_the_buffer() {
        let mut buf = PixelBuffer::new(8, 8);
        stroke_segment(
            &mut buf,
            Point::new(-20.0, 4.0),
            Point::new(40.0, 4.0),
            2.0,
            Composite::SourceOver(RED),
        );
        assert_eq!(buf.get(0, 4), Some(0xFFFF_0000));
        assert_eq!(buf.get(7, 4), Some(0xFFFF_0000));
    }
}
