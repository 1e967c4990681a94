// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the sketch on white paper.
// 2) A crosshair cursor sized to the current tool.
// 3) A tiny 5x7 bitmap font to render the tool status on top of the sketch.

use crate::error::Error;
use crate::input::Command;
use crate::tool::ToolMode;
use crate::types::{LogicalSize, PixelBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

/// Background behind transparent canvas pixels.
pub const PAPER: u32 = 0x00_FF_FF_FF;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window of the given logical size.
    /// Visual: a new blank window appears with your chosen title.
    pub fn new(title: &str, size: LogicalSize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, size.width as usize, size.height as usize, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen. A device-pixel frame is
    /// stretched onto the logical window.
    pub fn present(&mut self, frame: &PixelBuffer) -> Result<(), Error> {
        if frame.is_empty() {
            // Minimized: nothing to show, but keep input flowing.
            self.window.update();
            return Ok(());
        }
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current window size; the drawing area fills the whole window.
    pub fn size(&self) -> LogicalSize {
        let (w, h) = self.window.get_size();
        LogicalSize::new(w as u32, h as u32)
    }

    /// Mouse position in logical coordinates, `None` once it leaves the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    fn modifier(&self, left: Key, right: Key) -> bool {
        self.window.is_key_down(left) || self.window.is_key_down(right)
    }

    /// Shortcuts pressed since the last frame.
    pub fn commands(&self) -> Vec<Command> {
        let pressed = |k| self.window.is_key_pressed(k, KeyRepeat::No);
        let ctrl = self.modifier(Key::LeftCtrl, Key::RightCtrl) || self.modifier(Key::LeftSuper, Key::RightSuper);
        let shift = self.modifier(Key::LeftShift, Key::RightShift);

        let mut out = Vec::new();
        if pressed(Key::B) { out.push(Command::SetMode(ToolMode::Brush)); }
        if pressed(Key::E) { out.push(Command::SetMode(ToolMode::Eraser)); }
        if ctrl && pressed(Key::Z) {
            out.push(if shift { Command::Redo } else { Command::Undo });
        }
        if !ctrl && pressed(Key::C) { out.push(Command::Clear); }
        if !ctrl && pressed(Key::S) { out.push(Command::Save); }
        if self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes) { out.push(Command::AdjustSize(-1.0)); }
        if self.window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes) { out.push(Command::AdjustSize(1.0)); }
        out
    }
}

/* ---------- Paper compositing ---------- */

/// Flatten the transparent sketch onto paper into a 0x00RRGGBB frame,
/// reallocating `frame` if the sketch size changed.
pub fn compose_on_paper(sketch: &PixelBuffer, frame: &mut PixelBuffer) {
    if frame.dimensions() != sketch.dimensions() {
        *frame = PixelBuffer::new(sketch.width, sketch.height);
    }
    let [_, pr, pg, pb] = PAPER.to_be_bytes();
    for (dst, &src) in frame.pixels.iter_mut().zip(&sketch.pixels) {
        let [a, r, g, b] = src.to_be_bytes();
        *dst = match a {
            0 => PAPER,
            255 => src & 0x00FF_FFFF,
            _ => {
                let a = a as u32;
                let mix = |s: u8, p: u8| (s as u32 * a + p as u32 * (255 - a) + 127) / 255;
                (mix(r, pr) << 16) | (mix(g, pg) << 8) | mix(b, pb)
            }
        };
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the frame if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut PixelBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    fb.put(x as usize, y as usize, color);
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a crosshair centered at (cx,cy) whose arms reach the tool radius.
/// Visual: a "+" shape (with a gap the width of the brush) follows your mouse.
pub fn draw_crosshair(fb: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let gap = radius.max(2);
    let arm = gap + 6;
    draw_line(fb, cx - arm, cy, cx - gap, cy, color);
    draw_line(fb, cx + gap, cy, cx + arm, cy, color);
    draw_line(fb, cx, cy - arm, cx, cy - gap, color);
    draw_line(fb, cx, cy + gap, cx, cy + arm, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (what the status line needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '·' => g!(0b00000,0b00000,0b00000,0b00100,0b00000,0b00000,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel white halo offset
/// so it stays readable over dark strokes.
fn draw_char_5x7(fb: &mut PixelBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, PAPER), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact status line; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut PixelBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
