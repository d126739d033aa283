//! Capabilities a windowing toolkit provides to rounded controls.
//!
//! A control never talks to native windows directly. Everything it needs from
//! its environment (invalidation, coordinates, the parent's background, and
//! top-level overlay surfaces) goes through [`ControlHost`].

use std::time::Duration;

use roundel_engine::coords::{Rect, Vec2};
use roundel_engine::raster::{Canvas, Pixmap};

/// Failures reported by a host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The platform refused to create an overlay surface.
    #[error("overlay surface could not be created: {0}")]
    OverlayCreation(String),
    /// The host has no overlay support at all.
    #[error("host does not support overlay surfaces")]
    OverlaysUnsupported,
}

/// Window attributes requested for an overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayAttributes {
    /// Pointer input passes through to whatever is underneath.
    pub input_transparent: bool,
    /// Showing the surface may take activation from the owner's window.
    pub activatable: bool,
    /// Stays above ordinary top-level windows.
    pub topmost: bool,
    /// Listed by task switchers.
    pub show_in_switcher: bool,
}

impl OverlayAttributes {
    /// Non-activating, click-through, top-most, hidden from task switchers.
    pub const FOCUS_RING: Self =
        Self { input_transparent: true, activatable: false, topmost: true, show_in_switcher: false };
}

/// A borderless top-level surface whose pixels are blended per-pixel alpha
/// over whatever lies beneath it.
pub trait OverlaySurface {
    /// Moves/resizes the surface. `bounds` is in screen coordinates.
    fn set_bounds(&mut self, bounds: Rect);

    /// Replaces the surface content. The pixmap is premultiplied RGBA and
    /// sized to the current bounds.
    fn present(&mut self, pixels: &Pixmap);

    fn show(&mut self);

    /// Removes the surface from screen without destroying it.
    fn hide(&mut self);

    fn is_visible(&self) -> bool;
}

/// What a control needs from the toolkit hosting it.
pub trait ControlHost {
    /// Schedules a repaint of the control.
    fn invalidate(&self);

    /// The control's bounds in its parent's coordinate space.
    fn bounds(&self) -> Rect;

    /// Maps a point in the control's client space to screen space.
    fn client_to_screen(&self, point: Vec2) -> Vec2;

    /// Paints the parent's background for `clip` (parent coordinates) into
    /// `canvas`, which is already translated into parent space.
    ///
    /// This is what makes the area outside a rounded outline look transparent.
    fn paint_parent_background(&self, _canvas: &mut Canvas, _clip: Rect) {}

    /// Creates an overlay surface. It starts hidden.
    fn create_overlay(&self, attributes: &OverlayAttributes) -> Result<Box<dyn OverlaySurface>, HostError>;

    /// Starts (or restarts) the control's periodic timer. Ticks arrive as
    /// [`crate::event::UiEvent::TimerTick`].
    fn start_timer(&self, _interval: Duration) {}

    fn stop_timer(&self) {}
}
