//! Interaction state machine.
//!
//! ```text
//!            mouse_enter              mouse_down(primary)
//!   Normal ───────────────▶ Hover ─────────────────────▶ Pressed
//!     ▲  ◀─────────────────  │ ▲                           │
//!     │      mouse_leave       │ └── mouse_up(inside) ─────┤ (click)
//!     │                        │                           │
//!     └────────── mouse_up(outside) / mouse_leave ─────────┘
//!
//!   Normal ── mouse_down(primary) ──▶ Pressed   (no enter required)
//!   any    ── set_enabled(false)  ──▶ Normal    (press abandoned, no click)
//! ```
//!
//! `focused` and `enabled` are orthogonal flags carried alongside.

use crate::event::MouseButton;

/// Pointer-driven visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

/// Snapshot read by the paint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionState {
    pub mouse: MouseState,
    pub enabled: bool,
    pub focused: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self { mouse: MouseState::Normal, enabled: true, focused: false }
    }
}

/// Outcome of feeding one event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// The snapshot differs from before the event (a repaint is due).
    pub changed: bool,
    /// A press completed inside the control.
    pub clicked: bool,
}

/// One per control; mutated by input events, read by paint.
#[derive(Debug, Clone, Default)]
pub struct InteractionStateTracker {
    state: InteractionState,
}

impl InteractionStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    pub fn mouse(&self) -> MouseState {
        self.state.mouse
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    pub fn mouse_enter(&mut self) -> Transition {
        if !self.state.enabled || self.state.mouse != MouseState::Normal {
            return Transition::default();
        }
        self.set_mouse(MouseState::Hover)
    }

    pub fn mouse_leave(&mut self) -> Transition {
        if self.state.mouse == MouseState::Normal {
            return Transition::default();
        }
        // Leaving mid-press abandons the press.
        self.set_mouse(MouseState::Normal)
    }

    pub fn mouse_down(&mut self, button: MouseButton) -> Transition {
        if !self.state.enabled || button != MouseButton::Primary {
            return Transition::default();
        }
        self.set_mouse(MouseState::Pressed)
    }

    /// `inside`: whether the release happened within the control's bounds.
    pub fn mouse_up(&mut self, button: MouseButton, inside: bool) -> Transition {
        if button != MouseButton::Primary || self.state.mouse != MouseState::Pressed {
            return Transition::default();
        }
        if inside {
            Transition { clicked: true, ..self.set_mouse(MouseState::Hover) }
        } else {
            self.set_mouse(MouseState::Normal)
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Transition {
        let before = self.state;
        self.state.enabled = enabled;
        if !enabled {
            self.state.mouse = MouseState::Normal;
        }
        self.finish(before)
    }

    pub fn got_focus(&mut self) -> Transition {
        let before = self.state;
        self.state.focused = true;
        self.finish(before)
    }

    pub fn lost_focus(&mut self) -> Transition {
        let before = self.state;
        self.state.focused = false;
        self.finish(before)
    }

    fn set_mouse(&mut self, mouse: MouseState) -> Transition {
        let before = self.state;
        self.state.mouse = mouse;
        self.finish(before)
    }

    fn finish(&self, before: InteractionState) -> Transition {
        let changed = before != self.state;
        if changed {
            log::trace!("interaction state {before:?} -> {:?}", self.state);
        }
        Transition { changed, clicked: false }
    }
}
