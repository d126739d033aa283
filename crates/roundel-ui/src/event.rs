use roundel_engine::coords::Vec2;

/// Mouse buttons a host reports. Only [`MouseButton::Primary`] presses controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Host notifications routed to a control.
///
/// Positions are in the control's client coordinates (origin at its top-left).
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Cursor entered the control's bounds.
    MouseEnter,
    /// Cursor left the control's bounds.
    MouseLeave,
    /// A button went down over the control.
    MouseDown { button: MouseButton, pos: Vec2 },
    /// A button was released; `pos` may lie outside the control while it holds capture.
    MouseUp { button: MouseButton, pos: Vec2 },
    /// The control received keyboard focus.
    GotFocus,
    /// The control lost keyboard focus.
    LostFocus,
    /// The control was enabled or disabled.
    EnabledChanged(bool),
    /// The control moved or resized; screen-space overlays need repositioning.
    BoundsChanged,
    /// The host's animation timer fired.
    TimerTick,
}

/// Result returned by [`crate::control::Control::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled — stop routing.
    Consumed,
    /// Event was not handled — keep routing.
    Ignored,
}
