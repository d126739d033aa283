use std::rc::Rc;

use roundel_engine::coords::CornerRadius;
use roundel_engine::raster::Canvas;

use crate::appearance::{AppearanceError, InteractionAppearance};
use crate::compositor::PaintFrame;
use crate::control::{Control, RoundedControl};
use crate::event::{EventResult, UiEvent};
use crate::focus::ControlId;
use crate::host::ControlHost;

/// A clickable rounded rectangle.
///
/// # Example
/// ```rust,ignore
/// let save = Button::new(host)
///     .corner_radius(CornerRadius::uniform(6))
///     .with_appearance(|a| a.set_fill_color(Color::from_hex(0x2F6BE0)))?
///     .on_click(|| println!("saved!"));
/// ```
pub struct Button {
    control: RoundedControl,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(host: Rc<dyn ControlHost>) -> Self {
        let mut control = RoundedControl::new(host);
        control.set_corner_radius(CornerRadius::uniform(4));
        Self { control, on_click: None }
    }

    pub fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.control.set_corner_radius(radius);
        self
    }

    /// Callback invoked when a press completes inside the button.
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Applies appearance changes, failing on the first invalid value.
    pub fn with_appearance(
        mut self,
        f: impl FnOnce(&mut InteractionAppearance) -> Result<(), AppearanceError>,
    ) -> Result<Self, AppearanceError> {
        f(self.control.appearance_mut())?;
        Ok(self)
    }

    pub fn control(&self) -> &RoundedControl {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut RoundedControl {
        &mut self.control
    }
}

impl Control for Button {
    fn id(&self) -> ControlId {
        self.control.id()
    }

    fn paint(&mut self, canvas: &mut Canvas) -> Option<PaintFrame> {
        self.control.paint(canvas)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        let t = self.control.handle(event);
        if t.clicked {
            if let Some(f) = &mut self.on_click {
                f();
            }
            return EventResult::Consumed;
        }
        if t.changed { EventResult::Consumed } else { EventResult::Ignored }
    }
}
