//! Keyboard focus chain.
//!
//! [`FocusManager`] only decides *which* control holds focus. Delivering the
//! resulting [`UiEvent::GotFocus`](crate::event::UiEvent::GotFocus) /
//! [`UiEvent::LostFocus`](crate::event::UiEvent::LostFocus) pair is up to the
//! host, using the returned [`FocusChange`].

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

// ── ControlId ─────────────────────────────────────────────────────────────

/// Unique identifier of a control, allocated at construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ControlId(u64);

impl ControlId {
    /// Allocate a new, process-wide unique id.
    pub fn new() -> Self {
        ControlId(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ControlId {
    fn default() -> Self {
        Self::new()
    }
}

// ── FocusChange ───────────────────────────────────────────────────────────

/// Which control lost and which gained focus in one step.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FocusChange {
    pub lost: Option<ControlId>,
    pub gained: Option<ControlId>,
}

impl FocusChange {
    pub fn is_empty(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

// ── FocusManager ──────────────────────────────────────────────────────────

/// Tab order and the currently focused control.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<ControlId>,
    /// Focusable controls in Tab order.
    registered: Vec<ControlId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: ControlId) -> bool {
        self.focused == Some(id)
    }

    /// Appends `id` to the Tab order. Registering twice is a no-op.
    pub fn register(&mut self, id: ControlId) {
        if !self.registered.contains(&id) {
            self.registered.push(id);
        }
    }

    /// Removes `id` from the Tab order, dropping focus if it held it.
    pub fn unregister(&mut self, id: ControlId) -> FocusChange {
        self.registered.retain(|&x| x != id);
        if self.focused == Some(id) {
            self.focused = None;
            FocusChange { lost: Some(id), gained: None }
        } else {
            FocusChange::default()
        }
    }

    /// Moves focus to `id` (e.g. on click).
    pub fn request(&mut self, id: ControlId) -> FocusChange {
        self.set(Some(id))
    }

    /// Advance focus to the next (or previous, if `reverse`) registered control.
    pub fn advance(&mut self, reverse: bool) -> FocusChange {
        if self.registered.is_empty() {
            return FocusChange::default();
        }
        let n = self.registered.len();
        let next = match self.focused.and_then(|c| self.registered.iter().position(|&x| x == c)) {
            None => self.registered[if reverse { n - 1 } else { 0 }],
            Some(i) if reverse => self.registered[(i + n - 1) % n],
            Some(i) => self.registered[(i + 1) % n],
        };
        self.set(Some(next))
    }

    /// Clear focus (e.g. on Escape).
    pub fn clear(&mut self) -> FocusChange {
        self.set(None)
    }

    fn set(&mut self, id: Option<ControlId>) -> FocusChange {
        if self.focused == id {
            return FocusChange::default();
        }
        let lost = std::mem::replace(&mut self.focused, id);
        FocusChange { lost, gained: id }
    }
}
