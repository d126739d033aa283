use std::rc::{Rc, Weak};

use roundel_engine::coords::{CornerRadius, Rect, Vec2};
use roundel_engine::raster::Canvas;

use crate::appearance::InteractionAppearance;
use crate::compositor::{OverlayCompositor, PaintFrame};
use crate::event::{EventResult, UiEvent};
use crate::focus::ControlId;
use crate::focus_ring::FocusRingWindow;
use crate::host::ControlHost;
use crate::state::{InteractionState, InteractionStateTracker, Transition};

// ── Control trait ─────────────────────────────────────────────────────────

/// What a host drives: paint on demand, route events.
pub trait Control {
    fn id(&self) -> ControlId;

    /// Paints into `canvas`, whose origin is the control's top-left corner.
    fn paint(&mut self, canvas: &mut Canvas) -> Option<PaintFrame>;

    /// Route a host event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, event: &UiEvent) -> EventResult;

    /// Whether the control takes part in Tab focus cycling.
    fn is_focusable(&self) -> bool {
        true
    }
}

// ── RoundedControl ────────────────────────────────────────────────────────

/// Per-control state behind every rounded widget: radii, appearance,
/// interaction state and the focus ring overlay.
///
/// The appearance is created on first access and wired to invalidate the
/// host whenever one of its values changes.
pub struct RoundedControl {
    id: ControlId,
    host: Rc<dyn ControlHost>,
    radius: CornerRadius,
    appearance: Option<InteractionAppearance>,
    tracker: InteractionStateTracker,
    ring: FocusRingWindow,
}

fn observed_appearance(host: &Rc<dyn ControlHost>) -> InteractionAppearance {
    let host: Weak<dyn ControlHost> = Rc::downgrade(host);
    let mut appearance = InteractionAppearance::new();
    appearance.set_observer(move |property| {
        log::trace!("appearance {property} changed");
        if let Some(host) = host.upgrade() {
            host.invalidate();
        }
    });
    appearance
}

impl RoundedControl {
    pub fn new(host: Rc<dyn ControlHost>) -> Self {
        Self {
            id: ControlId::new(),
            host,
            radius: CornerRadius::default(),
            appearance: None,
            tracker: InteractionStateTracker::new(),
            ring: FocusRingWindow::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn host(&self) -> &Rc<dyn ControlHost> {
        &self.host
    }

    #[inline]
    pub fn corner_radius(&self) -> CornerRadius {
        self.radius
    }

    /// Replaces the radii wholesale; repaints when they differ.
    pub fn set_corner_radius(&mut self, radius: CornerRadius) {
        if self.radius != radius {
            self.radius = radius;
            self.host.invalidate();
        }
    }

    /// Colors and metrics, created on first access.
    pub fn appearance_mut(&mut self) -> &mut InteractionAppearance {
        let host = &self.host;
        self.appearance.get_or_insert_with(|| observed_appearance(host))
    }

    /// The appearance if it has been accessed before.
    pub fn appearance(&self) -> Option<&InteractionAppearance> {
        self.appearance.as_ref()
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.tracker.state()
    }

    pub fn ring(&self) -> &FocusRingWindow {
        &self.ring
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Transition {
        let t = self.tracker.set_enabled(enabled);
        self.settle(t)
    }

    /// Feeds `event` to the state machine and keeps the ring in sync.
    ///
    /// Returns the transition so widgets can react to completed presses.
    pub fn handle(&mut self, event: &UiEvent) -> Transition {
        let t = match event {
            UiEvent::MouseEnter => self.tracker.mouse_enter(),
            UiEvent::MouseLeave => self.tracker.mouse_leave(),
            UiEvent::MouseDown { button, .. } => self.tracker.mouse_down(*button),
            UiEvent::MouseUp { button, pos } => {
                let inside = self.client_rect().contains(*pos);
                self.tracker.mouse_up(*button, inside)
            }
            UiEvent::GotFocus => {
                let t = self.tracker.got_focus();
                self.show_ring();
                t
            }
            UiEvent::LostFocus => {
                let t = self.tracker.lost_focus();
                self.ring.hide();
                t
            }
            UiEvent::EnabledChanged(enabled) => self.tracker.set_enabled(*enabled),
            UiEvent::BoundsChanged => {
                if self.tracker.is_focused() {
                    self.show_ring();
                }
                self.host.invalidate();
                Transition::default()
            }
            UiEvent::TimerTick => Transition::default(),
        };
        self.settle(t)
    }

    /// Runs one paint pass.
    pub fn paint(&mut self, canvas: &mut Canvas) -> Option<PaintFrame> {
        let host = &self.host;
        let appearance = self.appearance.get_or_insert_with(|| observed_appearance(host));
        OverlayCompositor::new(appearance, &self.tracker, self.radius, &mut self.ring).paint(canvas, host.as_ref())
    }

    fn client_rect(&self) -> Rect {
        self.host.bounds().at_origin()
    }

    fn show_ring(&mut self) {
        let bounds = self.host.bounds();
        let screen = Rect::from_origin_size(self.host.client_to_screen(Vec2::zero()), bounds.size);
        let host = &self.host;
        let style = self.appearance.get_or_insert_with(|| observed_appearance(host)).ring_style(self.radius);
        self.ring.show(self.host.as_ref(), screen, style);
    }

    fn settle(&self, t: Transition) -> Transition {
        if t.changed {
            self.host.invalidate();
        }
        t
    }
}

impl Control for RoundedControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn paint(&mut self, canvas: &mut Canvas) -> Option<PaintFrame> {
        RoundedControl::paint(self, canvas)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        let t = self.handle(event);
        if t.changed || t.clicked || matches!(event, UiEvent::BoundsChanged) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl Drop for RoundedControl {
    fn drop(&mut self) {
        self.ring.dispose();
    }
}

#[cfg(test)]
mod tests {
    use roundel_engine::paint::Color;

    use super::*;
    use crate::event::MouseButton;
    use crate::headless::HeadlessHost;
    use crate::state::MouseState;

    fn control(bounds: Rect) -> (Rc<HeadlessHost>, RoundedControl) {
        let host = Rc::new(HeadlessHost::new(bounds));
        let control = RoundedControl::new(host.clone());
        (host, control)
    }

    fn down() -> UiEvent {
        UiEvent::MouseDown { button: MouseButton::Primary, pos: Vec2::new(5.0, 5.0) }
    }

    fn up_at(x: f32, y: f32) -> UiEvent {
        UiEvent::MouseUp { button: MouseButton::Primary, pos: Vec2::new(x, y) }
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn focused_control_paints_interior_and_ring() {
        let red = Color::from_straight(1.0, 0.0, 0.0, 1.0);
        let (host, mut c) = control(Rect::new(0.0, 0.0, 100.0, 40.0));
        c.set_corner_radius(CornerRadius::uniform(8));
        {
            let a = c.appearance_mut();
            a.set_border_width(1.0).unwrap();
            a.set_focus_ring_width(4.0).unwrap();
            a.set_focus_ring_color(red).unwrap();
        }
        c.on_event(&UiEvent::GotFocus);

        let mut canvas = Canvas::new(100, 40).unwrap();
        let frame = c.paint(&mut canvas).unwrap();
        assert_eq!(frame.interior_rect, Rect::new(1.0, 1.0, 98.0, 38.0));
        assert_eq!(frame.interior_radius, CornerRadius::uniform(7));
        assert!(frame.ring_shown);

        assert_eq!(c.ring().overlay_bounds(), Rect::new(-4.0, -4.0, 108.0, 48.0));
        // GotFocus showed the ring, paint showed it again unchanged.
        assert_eq!(c.ring().repaint_count(), 1);

        let rec = host.overlay(0).unwrap();
        assert_eq!(rec.bounds, Some(Rect::new(-4.0, -4.0, 108.0, 48.0)));
        assert!(rec.visible);
        let ring = rec.last_frame.unwrap();
        assert_eq!(ring.pixel(54, 24).map(|p| p.alpha()), Some(0));
        assert_eq!(ring.pixel(1, 24).map(|p| (p.red(), p.alpha())), Some((255, 255)));
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_inside_clicks() {
        let (_host, mut c) = control(Rect::new(10.0, 10.0, 50.0, 20.0));
        c.handle(&UiEvent::MouseEnter);
        c.handle(&down());
        assert_eq!(c.state().mouse, MouseState::Pressed);
        let t = c.handle(&up_at(49.0, 19.0));
        assert!(t.clicked);
        assert_eq!(c.state().mouse, MouseState::Hover);
    }

    #[test]
    fn release_outside_does_not_click() {
        let (_host, mut c) = control(Rect::new(10.0, 10.0, 50.0, 20.0));
        c.handle(&down());
        // Client coordinates: 50 is just past the right edge.
        let t = c.handle(&up_at(50.0, 5.0));
        assert!(!t.clicked);
        assert_eq!(c.state().mouse, MouseState::Normal);
    }

    #[test]
    fn disabling_mid_press_abandons_it() {
        let (_host, mut c) = control(Rect::from_size(50.0, 20.0));
        c.handle(&down());
        c.handle(&UiEvent::EnabledChanged(false));
        assert_eq!(c.state().mouse, MouseState::Normal);
        assert!(!c.handle(&up_at(5.0, 5.0)).clicked);
    }

    #[test]
    fn state_changes_invalidate() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        assert_eq!(c.on_event(&UiEvent::MouseEnter), EventResult::Consumed);
        assert_eq!(host.invalidations(), 1);
        assert_eq!(c.on_event(&UiEvent::MouseEnter), EventResult::Ignored);
        assert_eq!(host.invalidations(), 1);
    }

    #[test]
    fn appearance_changes_invalidate_only_when_different() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        assert!(c.appearance().is_none());
        c.appearance_mut().set_border_width(3.0).unwrap();
        assert_eq!(host.invalidations(), 1);
        c.appearance_mut().set_border_width(3.0).unwrap();
        assert_eq!(host.invalidations(), 1);
        assert!(c.appearance_mut().set_fill_color(Color::transparent()).is_err());
        assert_eq!(host.invalidations(), 1);
    }

    #[test]
    fn corner_radius_is_replaced_wholesale() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        assert!(c.corner_radius().is_default());
        c.set_corner_radius(CornerRadius::uniform(5));
        c.set_corner_radius(CornerRadius::per_corner(5, 5, 5, 5));
        assert_eq!(host.invalidations(), 1);
        assert!(!c.corner_radius().is_default());
    }

    // ── focus ring lifecycle ──────────────────────────────────────────────

    #[test]
    fn focus_shows_and_hides_the_ring() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        c.on_event(&UiEvent::GotFocus);
        assert!(c.ring().is_visible());
        c.on_event(&UiEvent::LostFocus);
        assert!(!c.ring().is_visible());
        assert!(!host.overlay(0).unwrap().destroyed);
    }

    #[test]
    fn ring_follows_the_control_when_it_moves() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        c.appearance_mut().set_focus_ring_width(2.0).unwrap();
        c.on_event(&UiEvent::GotFocus);
        host.set_bounds(Rect::new(30.0, 0.0, 50.0, 20.0));
        c.on_event(&UiEvent::BoundsChanged);
        assert_eq!(c.ring().overlay_bounds(), Rect::new(28.0, -2.0, 54.0, 24.0));
        assert_eq!(c.ring().repaint_count(), 2);
    }

    #[test]
    fn dropping_the_control_destroys_its_ring() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        c.on_event(&UiEvent::GotFocus);
        drop(c);
        assert!(host.overlay(0).unwrap().destroyed);
    }

    #[test]
    fn overlay_failure_leaves_control_usable() {
        let (host, mut c) = control(Rect::from_size(50.0, 20.0));
        host.set_fail_overlays(true);
        c.on_event(&UiEvent::GotFocus);
        let mut canvas = Canvas::new(50, 20).unwrap();
        let frame = c.paint(&mut canvas).unwrap();
        assert!(!frame.ring_shown);
        assert!(c.state().focused);
    }
}
