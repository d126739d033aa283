//! Renders demo scenes of rounded controls offscreen and writes PNG snapshots.
//!
//! Usage: `roundel-studio [OUTPUT_DIR]` (default `roundel-out`).

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use image::RgbaImage;
use roundel_engine::logging::{init_logging, LoggingConfig};
use roundel_engine::raster::Pixmap;
use roundel_ui::prelude::*;

const WINDOW_BG: u32 = 0xE9ECF1;

/// A virtual screen: one window background, controls painted at their bounds,
/// overlays composited on top.
struct Screen {
    canvas: Canvas,
    controls: Vec<(Box<dyn Control>, Rc<HeadlessHost>)>,
}

impl Screen {
    fn new(width: u32, height: u32) -> Result<Self> {
        let mut canvas = Canvas::new(width, height).context("allocating screen")?;
        canvas.clear(Color::from_hex(WINDOW_BG));
        Ok(Self { canvas, controls: Vec::new() })
    }

    fn host(bounds: Rect) -> Rc<HeadlessHost> {
        Rc::new(HeadlessHost::new(bounds).with_parent_background(Color::from_hex(WINDOW_BG)))
    }

    fn add(&mut self, control: impl Control + 'static, host: Rc<HeadlessHost>) -> usize {
        self.controls.push((Box::new(control), host));
        self.controls.len() - 1
    }

    fn send(&mut self, index: usize, event: UiEvent) {
        if let Some((control, _)) = self.controls.get_mut(index) {
            control.on_event(&event);
        }
    }

    /// Delivers a focus change to the controls it names.
    fn apply_focus(&mut self, change: FocusChange) {
        for (control, _) in &mut self.controls {
            if change.lost == Some(control.id()) {
                control.on_event(&UiEvent::LostFocus);
            }
            if change.gained == Some(control.id()) {
                control.on_event(&UiEvent::GotFocus);
            }
        }
    }

    /// Paints every control, then composites visible overlays.
    fn render(mut self) -> Result<Pixmap> {
        for (control, host) in &mut self.controls {
            let bounds = host.bounds();
            let (w, h) = bounds.pixel_size(1.0);
            let mut surface = Canvas::new(w, h).with_context(|| format!("allocating {w}x{h} control surface"))?;
            if control.paint(&mut surface).is_none() {
                log::warn!("control {:?} painted nothing", control.id());
                continue;
            }
            self.canvas.draw_pixmap(surface.pixmap(), (bounds.x().round() as i32, bounds.y().round() as i32));
        }
        for (_, host) in &self.controls {
            for overlay in host.overlays() {
                if let (true, Some(bounds), Some(frame)) = (overlay.visible, overlay.bounds, &overlay.last_frame) {
                    self.canvas.draw_pixmap(frame, (bounds.x().round() as i32, bounds.y().round() as i32));
                }
            }
        }
        Ok(self.canvas.into_pixmap())
    }
}

fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).context("pixel buffer size mismatch")?;
    img.save(path).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

// ── scenes ────────────────────────────────────────────────────────────────

/// One focused control with a wide red ring.
fn focus_ring_scene() -> Result<Pixmap> {
    let mut screen = Screen::new(160, 100)?;
    let host = Screen::host(Rect::new(30.0, 30.0, 100.0, 40.0));
    let button = Button::new(host.clone())
        .corner_radius(CornerRadius::uniform(8))
        .with_appearance(|a| {
            a.set_border_width(1.0)?;
            a.set_focus_ring_width(4.0)?;
            a.set_focus_ring_color(Color::from_straight(1.0, 0.0, 0.0, 1.0))
        })?;
    let i = screen.add(button, host);
    screen.send(i, UiEvent::GotFocus);
    screen.render()
}

/// Buttons in every interaction state, per-corner radii, and toggles.
fn states_scene() -> Result<Pixmap> {
    let mut screen = Screen::new(580, 200)?;
    let mut focus = FocusManager::new();
    let pos = Vec2::new(10.0, 10.0);

    for (col, radius) in [
        CornerRadius::uniform(6),
        CornerRadius::uniform(6),
        CornerRadius::uniform(6),
        CornerRadius::uniform(6),
        CornerRadius::uniform(18),
    ]
    .into_iter()
    .enumerate()
    {
        let host = Screen::host(Rect::new(20.0 + col as f32 * 110.0, 20.0, 90.0, 36.0));
        let button = Button::new(host.clone()).corner_radius(radius);
        focus.register(button.id());
        let i = screen.add(button, host);
        match col {
            1 => screen.send(i, UiEvent::MouseEnter),
            2 => screen.send(i, UiEvent::MouseDown { button: MouseButton::Primary, pos }),
            3 => screen.send(i, UiEvent::EnabledChanged(false)),
            _ => {}
        }
    }
    let change = focus.advance(true);
    screen.apply_focus(change);

    for (col, radius) in [
        CornerRadius::per_corner(16, 0, 16, 0),
        CornerRadius::per_corner(0, 0, 12, 12),
        CornerRadius::per_corner(-4, 40, 0, 8),
    ]
    .into_iter()
    .enumerate()
    {
        let host = Screen::host(Rect::new(20.0 + col as f32 * 110.0, 80.0, 90.0, 36.0));
        screen.add(Button::new(host.clone()).corner_radius(radius), host);
    }

    for (col, checked) in [false, true].into_iter().enumerate() {
        let host = Screen::host(Rect::new(20.0 + col as f32 * 70.0, 140.0, 46.0, 24.0));
        screen.add(Toggle::new(host.clone()).checked(checked), host);
    }

    // Caught mid-slide: three ticks into the animation.
    let host = Screen::host(Rect::new(160.0, 140.0, 46.0, 24.0));
    let i = screen.add(Toggle::new(host.clone()), host);
    screen.send(i, UiEvent::MouseDown { button: MouseButton::Primary, pos });
    screen.send(i, UiEvent::MouseUp { button: MouseButton::Primary, pos });
    for _ in 0..3 {
        screen.send(i, UiEvent::TimerTick);
    }

    screen.render()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let out = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("roundel-out"));
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    save_png(&focus_ring_scene().context("rendering focus ring scene")?, &out.join("focus_ring.png"))?;
    save_png(&states_scene().context("rendering states scene")?, &out.join("states.png"))?;
    Ok(())
}
