// What you SEE:
// • A white sheet filling the window. Hold Left Mouse to draw.
// • B brush, E eraser, [ / ] tool size.
// • Ctrl+Z undo, Ctrl+Shift+Z redo, C clears, S saves a PNG. ESC quits.
// • Resizing the window keeps the drawing anchored at the top-left.

use clap::Parser;
use sketchpad::draw::{Drawer, compose_on_paper, draw_crosshair, draw_text_5x7};
use sketchpad::error::Error;
use sketchpad::export;
use sketchpad::input::{PointerTracker, dispatch_command, dispatch_pointer};
use sketchpad::settings::Settings;
use sketchpad::viewport::ResizeNotifier;
use sketchpad::{History, PixelBuffer, StrokeEngine, Surface};

fn main() -> Result<(), Error> {
    let settings = Settings::parse();
    let level = if settings.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    /* --- Window + engine setup ---
       Visual: window opens with an empty sheet. */
    let mut drawer = Drawer::new("Sketchpad", settings.logical_size())?;
    let mut engine = StrokeEngine::new(
        Surface::new(settings.logical_size(), settings.dpr),
        History::with_capacity(settings.history_depth),
    );
    let mut resizes = ResizeNotifier::new();
    let mut tool = settings.tool();
    let mut pointer = PointerTracker::default();

    // Reused every frame: the sketch flattened onto paper.
    let mut frame = PixelBuffer::new(0, 0);

    log::info!("sketchpad ready: {}", tool.status());

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Follow window resizes (content stays at the origin). */
        resizes.observe(drawer.size(), settings.dpr, &mut engine);

        /* 2) Shortcuts */
        for command in drawer.commands() {
            if dispatch_command(&mut engine, command, &mut tool) {
                save(&engine, &settings);
            }
        }

        /* 3) Pointer: down/move/up/leave drive the stroke. */
        let pos = drawer.mouse_pos();
        if let Some(event) = pointer.update(pos, drawer.left_mouse_down()) {
            dispatch_pointer(&mut engine, event, &tool);
        }

        /* 4) Paper, cursor, status line */
        compose_on_paper(engine.surface().buffer(), &mut frame);
        let dpr = engine.surface().device_pixel_ratio();
        if let Some(p) = pos {
            let radius = (tool.size * dpr * 0.5).round() as i32;
            draw_crosshair(&mut frame, (p.x * dpr) as i32, (p.y * dpr) as i32, radius, 0x00_80_80_80);
        }
        let shown = engine.active_tool().unwrap_or(&tool);
        let history = engine.history();
        let hud = format!("{} | UNDO {} | REDO {}", shown.status(), history.undo_len(), history.redo_len());
        draw_text_5x7(&mut frame, 8, 8, &hud, 0x00_30_30_30);

        /* 5) Present */
        drawer.present(&frame)?;
    }

    Ok(())
}

/// Export at the configured scale; failures are logged, the session goes on.
fn save(engine: &StrokeEngine, settings: &Settings) {
    let Some(image) = engine.export_scaled(settings.export_scale) else {
        return;
    };
    if let Err(err) = export::save_png(&image, &settings.out_dir) {
        log::error!("save failed: {err}");
    }
}
