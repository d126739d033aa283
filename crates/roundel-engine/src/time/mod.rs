//! Time subsystem.
//!
//! Fixed-interval animation helpers. The host owns the actual timer; widgets
//! start it when a [`Tween`] begins moving, call [`Tween::tick`] on every
//! timer callback and stop the timer as soon as `tick` reports completion.

mod tween;

pub use tween::{ease_out, Tween, TICK_INTERVAL};
