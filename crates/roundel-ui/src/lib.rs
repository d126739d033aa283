//! Roundel UI — rounded controls with interaction states and an overlay focus ring.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use roundel_ui::prelude::*;
//!
//! let host: Rc<dyn ControlHost> = my_toolkit_host();
//! let mut save = Button::new(host)
//!     .corner_radius(CornerRadius::uniform(8))
//!     .on_click(|| println!("saved!"));
//!
//! // Route toolkit events:
//! save.on_event(&UiEvent::GotFocus);
//! // Paint on invalidate:
//! save.paint(&mut canvas);
//! ```
//!
//! # Hosting
//!
//! Implement [`host::ControlHost`] for your toolkit. It supplies bounds,
//! screen mapping, the parent's background and top-level overlay surfaces
//! for focus rings. [`headless::HeadlessHost`] is an in-memory implementation
//! for tests and offscreen rendering.

pub mod appearance;
pub mod compositor;
pub mod control;
pub mod event;
pub mod focus;
pub mod focus_ring;
pub mod headless;
pub mod host;
pub mod state;
pub mod widgets;

/// Everything needed to host and build controls.
pub mod prelude {
    pub use crate::appearance::{AppearanceError, AppearanceProperty, InteractionAppearance, RingStyle};
    pub use crate::compositor::{OverlayCompositor, PaintFrame};
    pub use crate::control::{Control, RoundedControl};
    pub use crate::event::{EventResult, MouseButton, UiEvent};
    pub use crate::focus::{ControlId, FocusChange, FocusManager};
    pub use crate::focus_ring::FocusRingWindow;
    pub use crate::headless::HeadlessHost;
    pub use crate::host::{ControlHost, HostError, OverlayAttributes, OverlaySurface};
    pub use crate::state::{InteractionState, InteractionStateTracker, MouseState};
    pub use crate::widgets::{button::Button, toggle::Toggle};

    // Re-export the engine primitives everyone needs.
    pub use roundel_engine::coords::{CornerRadius, Rect, Vec2};
    pub use roundel_engine::paint::Color;
    pub use roundel_engine::raster::Canvas;
}
