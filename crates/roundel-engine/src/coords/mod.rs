//! Coordinate and geometry types shared across the engine and the UI layer.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Screen-space overlay positions use the same conventions, offset by the
//! host's client-to-screen translation.

mod corner_radius;
mod rect;
mod vec2;

pub use corner_radius::CornerRadius;
pub use rect::Rect;
pub use vec2::Vec2;
