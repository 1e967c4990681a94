// "Logical size changed" notifications, independent of how the host window
// reports its size. The window loop feeds every observed size in; listeners
// hear about actual changes only.

use crate::types::LogicalSize;

pub trait ResizeListener {
    fn on_resize(&mut self, logical: LogicalSize, device_pixel_ratio: f32);
}

#[derive(Debug, Default)]
pub struct ResizeNotifier {
    last: Option<(LogicalSize, f32)>,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward `size`/`dpr` to `listener` if either differs from the last
    /// observation (the first observation always notifies). Zero-area sizes
    /// (a minimized window) are dropped so the surface keeps its pixels.
    pub fn observe<L: ResizeListener + ?Sized>(
        &mut self,
        size: LogicalSize,
        device_pixel_ratio: f32,
        listener: &mut L,
    ) -> bool {
        if size.width == 0 || size.height == 0 {
            log::debug!("ignoring {}x{} resize", size.width, size.height);
            return false;
        }
        if self.last == Some((size, device_pixel_ratio)) {
            return false;
        }
        self.last = Some((size, device_pixel_ratio));
        listener.on_resize(size, device_pixel_ratio);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::engine::StrokeEngine;
    use crate::history::History;
    use crate::surface::Surface;
    use crate::tool::ToolConfig;
    use crate::types::Point;

    #[derive(Default)]
    struct Recorder(Vec<(LogicalSize, f32)>);

    impl ResizeListener for Recorder {
        fn on_resize(&mut self, logical: LogicalSize, dpr: f32) {
            self.0.push((logical, dpr));
        }
    }

    #[test]
    fn notifies_on_change_only() {
        let mut n = ResizeNotifier::new();
        let mut r = Recorder::default();
        let a = LogicalSize::new(10, 10);
        assert!(n.observe(a, 1.0, &mut r));
        assert!(!n.observe(a, 1.0, &mut r));
        assert!(n.observe(a, 2.0, &mut r));
        assert!(n.observe(LogicalSize::new(11, 10), 2.0, &mut r));
        assert_eq!(r.0.len(), 3);
    }

    #[test]
    fn minimize_and_restore_keeps_the_sketch() {
        let mut n = ResizeNotifier::new();
        let size = LogicalSize::new(20, 20);
        let mut engine = StrokeEngine::new(Surface::new(size, 1.0), History::default());
        n.observe(size, 1.0, &mut engine);

        let tool = ToolConfig::brush(HexColor::new(255, 0, 0), 4.0, 1.0);
        engine.begin_stroke(Point::new(2.0, 10.0), tool);
        engine.extend_stroke(Point::new(18.0, 10.0), &tool);
        engine.end_stroke();
        let painted = engine.surface().buffer().clone();

        assert!(!n.observe(LogicalSize::new(0, 0), 1.0, &mut engine));
        assert!(!n.observe(LogicalSize::new(20, 0), 1.0, &mut engine));
        assert_eq!(engine.surface().buffer(), &painted);

        assert!(!n.observe(size, 1.0, &mut engine));
        assert_eq!(engine.surface().buffer(), &painted);
    }
}
