//! One paint pass of a rounded control.
//!
//! Order of operations:
//! 1. parent background under the whole control (corners look transparent)
//! 2. outline filled with the border color
//! 3. interior (outline inset by the border width) filled with the fill color
//! 4. focus ring shown or hidden to match the focus flag

use roundel_engine::coords::{CornerRadius, Rect, Vec2};
use roundel_engine::path::{ClosedPath, RoundedPathBuilder};
use roundel_engine::raster::Canvas;

use crate::appearance::{InteractionAppearance, ResolvedColors};
use crate::focus_ring::FocusRingWindow;
use crate::host::ControlHost;
use crate::state::InteractionStateTracker;

/// What a paint pass produced, for inspection.
#[derive(Debug, Clone)]
pub struct PaintFrame {
    pub colors: ResolvedColors,
    /// Control outline in client coordinates.
    pub outline: ClosedPath,
    pub interior: ClosedPath,
    pub interior_rect: Rect,
    /// Outline radii minus the border width, floored to whole pixels.
    pub interior_radius: CornerRadius,
    pub ring_shown: bool,
}

/// Paints one control from its appearance, state and radii.
pub struct OverlayCompositor<'a> {
    appearance: &'a InteractionAppearance,
    tracker: &'a InteractionStateTracker,
    radius: CornerRadius,
    ring: &'a mut FocusRingWindow,
}

impl<'a> OverlayCompositor<'a> {
    pub fn new(
        appearance: &'a InteractionAppearance,
        tracker: &'a InteractionStateTracker,
        radius: CornerRadius,
        ring: &'a mut FocusRingWindow,
    ) -> Self {
        Self { appearance, tracker, radius, ring }
    }

    /// Paints into `canvas`, whose origin is the control's top-left corner.
    ///
    /// Returns `None` without drawing when the control has no area.
    pub fn paint(self, canvas: &mut Canvas, host: &dyn ControlHost) -> Option<PaintFrame> {
        let bounds = host.bounds();
        if bounds.is_empty() || !bounds.is_finite() {
            return None;
        }

        let state = self.tracker.state();
        let colors = self.appearance.resolve(state);
        let content = bounds.at_origin();
        let outline = RoundedPathBuilder::build(content, self.radius);

        {
            let mut parent = canvas.save();
            parent.translate(-bounds.origin);
            host.paint_parent_background(&mut parent, bounds);
        }

        let border = self.appearance.border_width();
        let interior_rect = content.inset(border);
        let interior_radius = self.radius.inset(border);
        let interior = RoundedPathBuilder::build(interior_rect, interior_radius);
        {
            let mut smooth = canvas.save();
            smooth.set_anti_alias(true);
            smooth.fill_path(&outline, colors.border);
            smooth.fill_path(&interior, colors.fill);
        }

        if state.focused {
            let screen = Rect::from_origin_size(host.client_to_screen(Vec2::zero()), bounds.size);
            self.ring.show(host, screen, self.appearance.ring_style(self.radius));
        } else {
            self.ring.hide();
        }

        Some(PaintFrame {
            colors,
            outline,
            interior,
            interior_rect,
            interior_radius,
            ring_shown: self.ring.is_visible(),
        })
    }
}
