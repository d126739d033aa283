//! Focus ring drawn on a separate top-level overlay.
//!
//! The ring extends past its control's bounds, so it cannot be painted into
//! the control's own surface. Instead a click-through overlay is placed over
//! the control, `ring_width` larger on every side, and filled with the band
//! between two concentric rounded outlines.
//!
//! ```text
//!   overlay_bounds = content_bounds.inflate(ring_width)
//!   ┌───────────────────────┐
//!   │  ╭─────────────────╮  │   outer outline: overlay rect
//!   │  │ content (empty) │  │   inner outline: content rect
//!   │  ╰─────────────────╯  │   ring = outer − inner
//!   └───────────────────────┘
//! ```

use roundel_engine::coords::Rect;
use roundel_engine::path::RoundedPathBuilder;
use roundel_engine::raster::{downsample, Canvas, RasterError, SUPERSAMPLE};

use crate::appearance::RingStyle;
use crate::host::{ControlHost, OverlayAttributes, OverlaySurface};

enum Surface {
    Uncreated,
    /// Creation failed once; the ring stays absent for this control.
    Failed,
    Ready(Box<dyn OverlaySurface>),
}

/// Lazily created overlay painting one control's focus ring.
pub struct FocusRingWindow {
    surface: Surface,
    content_bounds: Rect,
    overlay_bounds: Rect,
    style: Option<RingStyle>,
    /// Geometry and style of the pixels last presented.
    painted: Option<(Rect, RingStyle)>,
    repaints: usize,
}

impl Default for FocusRingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRingWindow {
    pub fn new() -> Self {
        Self {
            surface: Surface::Uncreated,
            content_bounds: Rect::default(),
            overlay_bounds: Rect::default(),
            style: None,
            painted: None,
            repaints: 0,
        }
    }

    /// Content rectangle of the last `show`, in screen coordinates.
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Overlay rectangle of the last `show`, in screen coordinates.
    pub fn overlay_bounds(&self) -> Rect {
        self.overlay_bounds
    }

    pub fn style(&self) -> Option<RingStyle> {
        self.style
    }

    /// The overlay surface exists.
    pub fn is_created(&self) -> bool {
        matches!(self.surface, Surface::Ready(_))
    }

    pub fn is_visible(&self) -> bool {
        match &self.surface {
            Surface::Ready(s) => s.is_visible(),
            _ => false,
        }
    }

    /// How many times ring pixels were rendered and presented.
    pub fn repaint_count(&self) -> usize {
        self.repaints
    }

    /// Shows the ring around `content` (screen coordinates).
    ///
    /// Creates the overlay on first use. Pixels are only re-rendered when the
    /// geometry or style differ from what is already on screen. Failures are
    /// logged and leave the ring absent.
    pub fn show(&mut self, host: &dyn ControlHost, content: Rect, style: RingStyle) {
        self.content_bounds = content;
        self.style = Some(style);

        if style.width <= 0.0 || !style.width.is_finite() || content.is_empty() {
            self.overlay_bounds = content;
            self.hide();
            return;
        }
        self.overlay_bounds = content.inflate(style.width);

        if matches!(self.surface, Surface::Uncreated) {
            self.surface = match host.create_overlay(&OverlayAttributes::FOCUS_RING) {
                Ok(surface) => {
                    log::debug!("focus ring overlay created");
                    Surface::Ready(surface)
                }
                Err(err) => {
                    log::warn!("focus ring unavailable: {err}");
                    Surface::Failed
                }
            };
        }
        if !self.is_created() {
            return;
        }

        if self.painted != Some((content, style)) {
            if let Err(err) = self.redraw() {
                log::warn!("focus ring repaint failed: {err}");
                self.hide();
                return;
            }
        }
        if let Surface::Ready(surface) = &mut self.surface {
            surface.show();
        }
    }

    /// Renders the ring band for the current bounds and style and presents it.
    ///
    /// Rendering happens at [`SUPERSAMPLE`]× resolution and is box-filtered
    /// down, which smooths the curved edges.
    pub fn redraw(&mut self) -> Result<(), RasterError> {
        let Some(style) = self.style else { return Ok(()); };
        let Surface::Ready(surface) = &mut self.surface else { return Ok(()); };

        let overlay = self.overlay_bounds;
        let content = self.content_bounds;
        let (w, h) = overlay.pixel_size(1.0);

        let (sw, sh) = w
            .checked_mul(SUPERSAMPLE)
            .zip(h.checked_mul(SUPERSAMPLE))
            .ok_or(RasterError::InvalidSize { width: w, height: h })?;
        let mut canvas = Canvas::new(sw, sh)?;
        {
            let mut guard = canvas.save();
            guard.scale(SUPERSAMPLE as f32);

            let outer = RoundedPathBuilder::build(overlay.at_origin(), style.radius);
            let inner = RoundedPathBuilder::build(
                Rect::new(style.width, style.width, content.width(), content.height()),
                style.radius,
            );
            let mut band = guard.region(&outer)?;
            band.difference(&guard.region(&inner)?)?;
            guard.fill_region(&band, style.color);
        }
        let pixels = downsample(canvas.pixmap(), SUPERSAMPLE)?;

        surface.set_bounds(overlay);
        surface.present(&pixels);
        self.painted = Some((content, style));
        self.repaints += 1;
        log::debug!("focus ring repainted at {overlay:?} ({w}x{h})");
        Ok(())
    }

    /// Takes the overlay off screen, keeping it for the next `show`.
    pub fn hide(&mut self) {
        if let Surface::Ready(surface) = &mut self.surface {
            if surface.is_visible() {
                surface.hide();
            }
        }
    }

    /// Destroys the overlay. A later `show` creates a fresh one.
    pub fn dispose(&mut self) {
        if matches!(self.surface, Surface::Ready(_)) {
            log::debug!("focus ring overlay disposed");
        }
        self.surface = Surface::Uncreated;
        self.painted = None;
    }
}

#[cfg(test)]
mod tests {
    use roundel_engine::coords::{CornerRadius, Vec2};
    use roundel_engine::paint::Color;
    use roundel_engine::raster::Pixmap;

    use super::*;
    use crate::headless::HeadlessHost;

    fn red_ring(width: f32, radius: CornerRadius) -> RingStyle {
        RingStyle { color: Color::from_straight(1.0, 0.0, 0.0, 1.0), width, radius }
    }

    fn host() -> HeadlessHost {
        HeadlessHost::new(Rect::from_size(100.0, 40.0))
    }

    fn alpha(frame: &Pixmap, x: u32, y: u32) -> u8 {
        frame.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    /// Whether `p` lies inside the rounded rect by at least `margin`.
    fn deep_inside(p: Vec2, rect: Rect, r: f32, margin: f32) -> bool {
        let inner = rect.inset(margin);
        if !inner.contains(p) {
            return false;
        }
        let r = (r - margin).max(0.0);
        let cx = p.x.clamp(inner.x() + r, inner.right() - r);
        let cy = p.y.clamp(inner.y() + r, inner.bottom() - r);
        p.distance(Vec2::new(cx, cy)) <= r
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn overlay_is_content_inflated_by_ring_width() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::new(0.0, 0.0, 100.0, 40.0), red_ring(4.0, CornerRadius::uniform(8)));

        assert_eq!(ring.overlay_bounds(), Rect::new(-4.0, -4.0, 108.0, 48.0));
        let rec = host.overlay(0).unwrap();
        assert_eq!(rec.bounds, Some(Rect::new(-4.0, -4.0, 108.0, 48.0)));
        let frame = rec.last_frame.unwrap();
        assert_eq!((frame.width(), frame.height()), (108, 48));
    }

    #[test]
    fn square_ring_never_touches_the_content_rect() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::new(0.0, 0.0, 100.0, 40.0), red_ring(4.0, CornerRadius::zero()));
        let frame = host.overlay(0).unwrap().last_frame.unwrap();

        // Content spans pixels 4..104 x 4..44; its edge pixels may carry
        // rounding residue from the band's anti-aliased inner edge.
        for y in 5..43 {
            for x in 5..103 {
                assert_eq!(alpha(&frame, x, y), 0, "pixel ({x}, {y}) inside content");
            }
        }
        // Band is solid on every side.
        assert_eq!(alpha(&frame, 1, 1), 255);
        assert_eq!(alpha(&frame, 2, 20), 255);
        assert_eq!(alpha(&frame, 105, 20), 255);
        assert_eq!(alpha(&frame, 50, 46), 255);
    }

    #[test]
    fn rounded_ring_stays_outside_the_inner_outline() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::new(0.0, 0.0, 100.0, 40.0), red_ring(4.0, CornerRadius::uniform(8)));
        let frame = host.overlay(0).unwrap().last_frame.unwrap();
        let inner = Rect::new(4.0, 4.0, 100.0, 40.0);

        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if deep_inside(center, inner, 8.0, 1.5) {
                    assert_eq!(alpha(&frame, x, y), 0, "pixel ({x}, {y}) inside inner outline");
                }
            }
        }
        // Mid-edge band pixels are painted; the rounded outer corner is not.
        assert_eq!(frame.pixel(1, 24).map(|p| (p.red(), p.alpha())), Some((255, 255)));
        assert_eq!(alpha(&frame, 0, 0), 0);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn repeated_show_with_same_input_repaints_once() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        let style = red_ring(4.0, CornerRadius::uniform(8));
        let content = Rect::new(0.0, 0.0, 100.0, 40.0);

        ring.show(&host, content, style);
        ring.show(&host, content, style);
        assert_eq!(ring.repaint_count(), 1);
        assert_eq!(host.overlay(0).unwrap().presents, 1);

        ring.show(&host, content.translate(Vec2::new(5.0, 0.0)), style);
        assert_eq!(ring.repaint_count(), 2);
        ring.show(&host, content.translate(Vec2::new(5.0, 0.0)), red_ring(2.0, CornerRadius::uniform(8)));
        assert_eq!(ring.repaint_count(), 3);
        assert_eq!(host.overlays().len(), 1);
    }

    #[test]
    fn overlay_attributes_are_click_through_and_non_activating() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::from_size(10.0, 10.0), red_ring(2.0, CornerRadius::zero()));
        let attrs = host.overlay(0).unwrap().attributes;
        assert!(attrs.input_transparent && attrs.topmost);
        assert!(!attrs.activatable && !attrs.show_in_switcher);
    }

    #[test]
    fn hide_keeps_the_surface_and_show_reuses_it() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        let style = red_ring(3.0, CornerRadius::uniform(4));
        ring.show(&host, Rect::from_size(20.0, 20.0), style);
        assert!(ring.is_visible());

        ring.hide();
        assert!(!ring.is_visible());
        assert!(ring.is_created());
        assert!(!host.overlay(0).unwrap().destroyed);

        ring.show(&host, Rect::from_size(20.0, 20.0), style);
        assert!(ring.is_visible());
        assert_eq!(ring.repaint_count(), 1);
        assert_eq!(host.overlays().len(), 1);
    }

    #[test]
    fn dispose_and_drop_destroy_the_surface() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(3.0, CornerRadius::zero()));
        ring.dispose();
        assert!(host.overlay(0).unwrap().destroyed);
        assert!(!ring.is_created());

        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(3.0, CornerRadius::zero()));
        drop(ring);
        assert!(host.overlay(1).unwrap().destroyed);
    }

    #[test]
    fn creation_failure_is_not_fatal() {
        let host = host();
        host.set_fail_overlays(true);
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(3.0, CornerRadius::zero()));
        assert!(!ring.is_created());
        assert!(!ring.is_visible());
        assert_eq!(ring.repaint_count(), 0);

        // Failure sticks; no retry on later shows.
        host.set_fail_overlays(false);
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(3.0, CornerRadius::zero()));
        assert!(host.overlays().is_empty());
    }

    #[test]
    fn zero_width_ring_hides_the_surface() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(3.0, CornerRadius::zero()));
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(0.0, CornerRadius::zero()));
        assert!(!ring.is_visible());
        assert_eq!(ring.repaint_count(), 1);
    }

    #[test]
    fn oversized_content_is_not_fatal() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::new(0.0, 0.0, 3.0e9, 10.0), red_ring(4.0, CornerRadius::zero()));
        assert_eq!(ring.repaint_count(), 0);
        assert!(!ring.is_visible());
        assert_eq!(host.overlay(0).unwrap().presents, 0);
    }

    #[test]
    fn zero_width_ring_never_creates_a_surface() {
        let host = host();
        let mut ring = FocusRingWindow::new();
        ring.show(&host, Rect::from_size(20.0, 20.0), red_ring(0.0, CornerRadius::zero()));
        assert!(host.overlays().is_empty());
    }
}
