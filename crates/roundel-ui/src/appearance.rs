//! Per-control colors and metrics.
//!
//! Every setter validates eagerly and notifies the owner only when the stored
//! value actually changes. Border and fill must stay visible; the state
//! variants (hover, pressed, disabled) may be anything, transparent included.

use std::fmt;

use roundel_engine::coords::CornerRadius;
use roundel_engine::paint::Color;

use crate::state::{InteractionState, MouseState};

/// How far disabled colors are pushed towards white.
pub const DISABLED_LIGHTEN: f32 = 0.5;

/// Names every settable appearance attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceProperty {
    BorderColor,
    FillColor,
    HoverBorderColor,
    HoverFillColor,
    PressedBorderColor,
    PressedFillColor,
    DisabledBorderColor,
    DisabledFillColor,
    BorderWidth,
    FocusRingColor,
    FocusRingWidth,
}

impl fmt::Display for AppearanceProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppearanceProperty::BorderColor => "border color",
            AppearanceProperty::FillColor => "fill color",
            AppearanceProperty::HoverBorderColor => "hover border color",
            AppearanceProperty::HoverFillColor => "hover fill color",
            AppearanceProperty::PressedBorderColor => "pressed border color",
            AppearanceProperty::PressedFillColor => "pressed fill color",
            AppearanceProperty::DisabledBorderColor => "disabled border color",
            AppearanceProperty::DisabledFillColor => "disabled fill color",
            AppearanceProperty::BorderWidth => "border width",
            AppearanceProperty::FocusRingColor => "focus ring color",
            AppearanceProperty::FocusRingWidth => "focus ring width",
        };
        f.write_str(name)
    }
}

/// Why a value was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    TransparentColor,
    NegativeSize,
    NotFinite,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::TransparentColor => f.write_str("color must not be transparent"),
            InvalidReason::NegativeSize => f.write_str("size must not be negative"),
            InvalidReason::NotFinite => f.write_str("value must be finite"),
        }
    }
}

/// Configuration errors raised at assignment time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppearanceError {
    #[error("invalid {property}: {reason}")]
    InvalidAppearanceValue { property: AppearanceProperty, reason: InvalidReason },
}

/// Border/fill pair chosen for one interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColors {
    pub border: Color,
    pub fill: Color,
}

/// Everything the focus ring window needs for one show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub color: Color,
    pub width: f32,
    pub radius: CornerRadius,
}

type Observer = Box<dyn FnMut(AppearanceProperty)>;

/// Colors and metrics for one control, with change notification.
pub struct InteractionAppearance {
    border_color: Color,
    fill_color: Color,
    hover_border_color: Color,
    hover_fill_color: Color,
    pressed_border_color: Color,
    pressed_fill_color: Color,
    disabled_border_color: Option<Color>,
    disabled_fill_color: Option<Color>,
    border_width: f32,
    focus_ring_color: Color,
    focus_ring_width: f32,
    observer: Option<Observer>,
}

impl Default for InteractionAppearance {
    fn default() -> Self {
        Self {
            border_color: Color::from_hex(0x8A8F98),
            fill_color: Color::from_hex(0xF4F5F7),
            hover_border_color: Color::from_hex(0x5B8DEF),
            hover_fill_color: Color::from_hex(0xE8EFFD),
            pressed_border_color: Color::from_hex(0x2F6BE0),
            pressed_fill_color: Color::from_hex(0xD2E0FB),
            disabled_border_color: None,
            disabled_fill_color: None,
            border_width: 1.0,
            focus_ring_color: Color::from_straight(0.2, 0.45, 0.95, 0.6),
            focus_ring_width: 3.0,
            observer: None,
        }
    }
}

impl fmt::Debug for InteractionAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionAppearance")
            .field("border_color", &self.border_color)
            .field("fill_color", &self.fill_color)
            .field("border_width", &self.border_width)
            .field("focus_ring_color", &self.focus_ring_color)
            .field("focus_ring_width", &self.focus_ring_width)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

fn visible(property: AppearanceProperty, c: Color) -> Result<Color, AppearanceError> {
    if !c.is_finite() {
        return Err(AppearanceError::InvalidAppearanceValue { property, reason: InvalidReason::NotFinite });
    }
    if c.is_transparent() {
        return Err(AppearanceError::InvalidAppearanceValue {
            property,
            reason: InvalidReason::TransparentColor,
        });
    }
    Ok(c)
}

fn any_color(property: AppearanceProperty, c: Color) -> Result<Color, AppearanceError> {
    if c.is_finite() {
        Ok(c)
    } else {
        Err(AppearanceError::InvalidAppearanceValue { property, reason: InvalidReason::NotFinite })
    }
}

fn size(property: AppearanceProperty, v: f32) -> Result<f32, AppearanceError> {
    if !v.is_finite() {
        return Err(AppearanceError::InvalidAppearanceValue { property, reason: InvalidReason::NotFinite });
    }
    if v < 0.0 {
        return Err(AppearanceError::InvalidAppearanceValue { property, reason: InvalidReason::NegativeSize });
    }
    Ok(v)
}

/// Generates a validated, change-detecting setter.
macro_rules! setter {
    ($(#[$doc:meta])* $name:ident, $field:ident: $ty:ty, $prop:ident, $check:expr) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) -> Result<(), AppearanceError> {
            let value = $check(AppearanceProperty::$prop, value)?;
            if self.$field != value {
                self.$field = value;
                self.notify(AppearanceProperty::$prop);
            }
            Ok(())
        }
    };
}

impl InteractionAppearance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the owner's repaint callback, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(AppearanceProperty) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    fn notify(&mut self, property: AppearanceProperty) {
        if let Some(observer) = &mut self.observer {
            observer(property);
        }
    }

    // ── getters ───────────────────────────────────────────────────────────

    pub fn border_color(&self) -> Color { self.border_color }
    pub fn fill_color(&self) -> Color { self.fill_color }
    pub fn hover_border_color(&self) -> Color { self.hover_border_color }
    pub fn hover_fill_color(&self) -> Color { self.hover_fill_color }
    pub fn pressed_border_color(&self) -> Color { self.pressed_border_color }
    pub fn pressed_fill_color(&self) -> Color { self.pressed_fill_color }
    pub fn disabled_border_color(&self) -> Option<Color> { self.disabled_border_color }
    pub fn disabled_fill_color(&self) -> Option<Color> { self.disabled_fill_color }
    pub fn border_width(&self) -> f32 { self.border_width }
    pub fn focus_ring_color(&self) -> Color { self.focus_ring_color }
    pub fn focus_ring_width(&self) -> f32 { self.focus_ring_width }

    // ── setters ───────────────────────────────────────────────────────────

    setter!(
        /// Fails with `InvalidAppearanceValue` for transparent colors.
        set_border_color, border_color: Color, BorderColor, visible
    );
    setter!(
        /// Fails with `InvalidAppearanceValue` for transparent colors.
        set_fill_color, fill_color: Color, FillColor, visible
    );
    setter!(set_hover_border_color, hover_border_color: Color, HoverBorderColor, any_color);
    setter!(set_hover_fill_color, hover_fill_color: Color, HoverFillColor, any_color);
    setter!(set_pressed_border_color, pressed_border_color: Color, PressedBorderColor, any_color);
    setter!(set_pressed_fill_color, pressed_fill_color: Color, PressedFillColor, any_color);
    setter!(set_focus_ring_color, focus_ring_color: Color, FocusRingColor, any_color);
    setter!(
        /// Fails with `InvalidAppearanceValue` for negative widths.
        set_border_width, border_width: f32, BorderWidth, size
    );
    setter!(
        /// Fails with `InvalidAppearanceValue` for negative widths. `0` hides the ring.
        set_focus_ring_width, focus_ring_width: f32, FocusRingWidth, size
    );

    /// Explicit disabled border; `None` falls back to lightening.
    pub fn set_disabled_border_color(&mut self, value: Option<Color>) -> Result<(), AppearanceError> {
        let value = value.map(|c| any_color(AppearanceProperty::DisabledBorderColor, c)).transpose()?;
        if self.disabled_border_color != value {
            self.disabled_border_color = value;
            self.notify(AppearanceProperty::DisabledBorderColor);
        }
        Ok(())
    }

    /// Explicit disabled fill; `None` falls back to lightening.
    pub fn set_disabled_fill_color(&mut self, value: Option<Color>) -> Result<(), AppearanceError> {
        let value = value.map(|c| any_color(AppearanceProperty::DisabledFillColor, c)).transpose()?;
        if self.disabled_fill_color != value {
            self.disabled_fill_color = value;
            self.notify(AppearanceProperty::DisabledFillColor);
        }
        Ok(())
    }

    // ── resolution ────────────────────────────────────────────────────────

    /// Colors for `state`, by priority: disabled > pressed > hover > default.
    pub fn resolve(&self, state: InteractionState) -> ResolvedColors {
        if !state.enabled {
            return ResolvedColors {
                border: self
                    .disabled_border_color
                    .unwrap_or_else(|| self.border_color.lightened(DISABLED_LIGHTEN)),
                fill: self
                    .disabled_fill_color
                    .unwrap_or_else(|| self.fill_color.lightened(DISABLED_LIGHTEN)),
            };
        }
        match state.mouse {
            MouseState::Pressed => {
                ResolvedColors { border: self.pressed_border_color, fill: self.pressed_fill_color }
            }
            MouseState::Hover => {
                ResolvedColors { border: self.hover_border_color, fill: self.hover_fill_color }
            }
            MouseState::Normal => ResolvedColors { border: self.border_color, fill: self.fill_color },
        }
    }

    /// Ring snapshot for a control with corner radii `radius`.
    pub fn ring_style(&self, radius: CornerRadius) -> RingStyle {
        RingStyle { color: self.focus_ring_color, width: self.focus_ring_width, radius }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn observed() -> (InteractionAppearance, Rc<RefCell<Vec<AppearanceProperty>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut a = InteractionAppearance::new();
        let sink = Rc::clone(&log);
        a.set_observer(move |p| sink.borrow_mut().push(p));
        (a, log)
    }

    fn state(mouse: MouseState, enabled: bool) -> InteractionState {
        InteractionState { mouse, enabled, focused: false }
    }

    // ── notification ──────────────────────────────────────────────────────

    #[test]
    fn changed_value_notifies_once() {
        let (mut a, log) = observed();
        a.set_fill_color(Color::from_hex(0x112233)).unwrap();
        assert_eq!(*log.borrow(), vec![AppearanceProperty::FillColor]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let (mut a, log) = observed();
        let current = a.border_color();
        a.set_border_color(current).unwrap();
        a.set_border_width(a.border_width()).unwrap();
        assert!(log.borrow().is_empty());
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn transparent_border_or_fill_is_rejected() {
        let (mut a, log) = observed();
        let err = a.set_border_color(Color::transparent()).unwrap_err();
        assert_eq!(
            err,
            AppearanceError::InvalidAppearanceValue {
                property: AppearanceProperty::BorderColor,
                reason: InvalidReason::TransparentColor,
            }
        );
        assert!(a.set_fill_color(Color::from_straight(1.0, 0.0, 0.0, 0.0)).is_err());
        assert!(log.borrow().is_empty());
        assert!(!a.border_color().is_transparent());
    }

    #[test]
    fn state_variants_accept_transparent() {
        let mut a = InteractionAppearance::new();
        a.set_hover_fill_color(Color::transparent()).unwrap();
        a.set_pressed_border_color(Color::transparent()).unwrap();
        a.set_disabled_fill_color(Some(Color::transparent())).unwrap();
        a.set_focus_ring_color(Color::transparent()).unwrap();
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let mut a = InteractionAppearance::new();
        assert!(matches!(
            a.set_border_width(-1.0),
            Err(AppearanceError::InvalidAppearanceValue { reason: InvalidReason::NegativeSize, .. })
        ));
        assert!(a.set_focus_ring_width(-0.5).is_err());
        assert!(a.set_focus_ring_width(f32::NAN).is_err());
        assert!(a.set_focus_ring_width(0.0).is_ok());
    }

    #[test]
    fn error_message_names_the_property() {
        let err = InteractionAppearance::new().set_border_width(-2.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid border width: size must not be negative");
    }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn resolve_follows_mouse_state() {
        let a = InteractionAppearance::new();
        assert_eq!(a.resolve(state(MouseState::Normal, true)).fill, a.fill_color());
        assert_eq!(a.resolve(state(MouseState::Hover, true)).fill, a.hover_fill_color());
        assert_eq!(a.resolve(state(MouseState::Pressed, true)).border, a.pressed_border_color());
    }

    #[test]
    fn disabled_wins_and_lightens_by_default() {
        let a = InteractionAppearance::new();
        let r = a.resolve(state(MouseState::Pressed, false));
        assert_eq!(r.fill, a.fill_color().lightened(DISABLED_LIGHTEN));
        assert_eq!(r.border, a.border_color().lightened(DISABLED_LIGHTEN));
    }

    #[test]
    fn explicit_disabled_override_beats_lightening() {
        let mut a = InteractionAppearance::new();
        let grey = Color::from_hex(0x777777);
        a.set_disabled_fill_color(Some(grey)).unwrap();
        let r = a.resolve(state(MouseState::Normal, false));
        assert_eq!(r.fill, grey);
        assert_eq!(r.border, a.border_color().lightened(DISABLED_LIGHTEN));
    }

    #[test]
    fn ring_style_copies_ring_metrics() {
        let mut a = InteractionAppearance::new();
        a.set_focus_ring_width(4.0).unwrap();
        let s = a.ring_style(CornerRadius::uniform(8));
        assert_eq!(s.width, 4.0);
        assert_eq!(s.radius, CornerRadius::uniform(8));
        assert_eq!(s.color, a.focus_ring_color());
    }
}
