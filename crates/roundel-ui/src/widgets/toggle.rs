use std::rc::Rc;
use std::time::Duration;

use roundel_engine::coords::{CornerRadius, Rect};
use roundel_engine::paint::Color;
use roundel_engine::path::RoundedPathBuilder;
use roundel_engine::raster::Canvas;
use roundel_engine::time::{Tween, TICK_INTERVAL};

use crate::compositor::PaintFrame;
use crate::control::{Control, RoundedControl};
use crate::event::{EventResult, UiEvent};
use crate::focus::ControlId;
use crate::host::ControlHost;

/// Time the thumb takes to cross the track.
pub const TOGGLE_DURATION: Duration = Duration::from_millis(120);

/// A pill-shaped on/off switch whose thumb slides between the ends.
///
/// The track is a [`RoundedControl`] (state colors, border, focus ring); the
/// "on" tint and the thumb are painted on top. Sliding is driven by the
/// host timer and stops as soon as the thumb reaches its end.
///
/// # Example
/// ```rust,ignore
/// Toggle::new(host)
///     .checked(true)
///     .on_color(Color::from_straight(0.1, 0.7, 0.4, 1.0))
///     .on_change(|v| println!("toggle: {v}"))
/// ```
pub struct Toggle {
    control: RoundedControl,
    checked: bool,
    tween: Tween,
    on_color: Color,
    thumb_color: Color,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

fn pill(bounds: Rect) -> CornerRadius {
    CornerRadius::uniform((bounds.height() * 0.5).floor() as i32)
}

impl Toggle {
    pub fn new(host: Rc<dyn ControlHost>) -> Self {
        let radius = pill(host.bounds());
        let mut control = RoundedControl::new(host);
        control.set_corner_radius(radius);
        Self {
            control,
            checked: false,
            tween: Tween::new(TOGGLE_DURATION, false),
            on_color: Color::from_straight(0.1, 0.7, 0.45, 1.0),
            thumb_color: Color::white(),
            on_change: None,
        }
    }

    /// Initial state; no animation.
    pub fn checked(mut self, v: bool) -> Self {
        self.checked = v;
        self.tween.snap(v);
        self
    }

    pub fn on_color(mut self, v: Color) -> Self { self.on_color = v; self }
    pub fn thumb_color(mut self, v: Color) -> Self { self.thumb_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Eased thumb position: 0 at the left end, 1 at the right.
    pub fn thumb_position(&self) -> f32 {
        self.tween.value()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_running()
    }

    pub fn control(&self) -> &RoundedControl {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut RoundedControl {
        &mut self.control
    }

    /// Flips the state, notifies, and starts the slide.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        if let Some(f) = &mut self.on_change {
            f(self.checked);
        }
        if self.tween.retarget(self.checked) {
            self.control.host().start_timer(TICK_INTERVAL);
        }
        self.control.host().invalidate();
    }

    fn tick(&mut self) -> EventResult {
        if !self.tween.is_running() {
            self.control.host().stop_timer();
            return EventResult::Ignored;
        }
        if !self.tween.tick() {
            self.control.host().stop_timer();
        }
        self.control.host().invalidate();
        EventResult::Consumed
    }
}

impl Control for Toggle {
    fn id(&self) -> ControlId {
        self.control.id()
    }

    fn paint(&mut self, canvas: &mut Canvas) -> Option<PaintFrame> {
        let frame = self.control.paint(canvas)?;
        let bounds = self.control.host().bounds();
        let (w, h) = (bounds.width(), bounds.height());
        let v = self.tween.value();

        let mut smooth = canvas.save();
        smooth.set_anti_alias(true);
        if v > 0.0 {
            smooth.fill_path(&frame.interior, self.on_color.faded(v));
        }

        let margin = h * 0.13;
        let d = (h - 2.0 * margin).max(0.0);
        let travel = (w - d - 2.0 * margin).max(0.0);
        let thumb = Rect::new(margin + travel * v, margin, d, d);
        let round = CornerRadius::uniform((d * 0.5).ceil() as i32);
        smooth.fill_path(&RoundedPathBuilder::build(thumb, round), self.thumb_color);
        drop(smooth);

        Some(frame)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        match event {
            UiEvent::TimerTick => return self.tick(),
            UiEvent::BoundsChanged => {
                let radius = pill(self.control.host().bounds());
                self.control.set_corner_radius(radius);
            }
            _ => {}
        }
        let t = self.control.handle(event);
        if t.clicked {
            self.toggle();
            return EventResult::Consumed;
        }
        if t.changed { EventResult::Consumed } else { EventResult::Ignored }
    }
}
