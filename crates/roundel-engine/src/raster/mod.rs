//! Software rasterization.
//!
//! Scope:
//! - [`Canvas`]: the drawing surface controls paint into (path fill, region fill,
//!   scoped state save/restore)
//! - [`Region`]: coverage masks with boolean difference
//! - [`downsample`]: box filter used by supersampled surfaces
//!
//! Pixels are premultiplied RGBA8 (`tiny_skia::Pixmap`), ready to hand to a
//! compositor that blends per-pixel alpha.

mod canvas;
mod region;
mod supersample;

pub use canvas::{Canvas, CanvasGuard, CanvasState};
pub use region::Region;
pub use supersample::{downsample, SUPERSAMPLE};

pub use tiny_skia::Pixmap;

/// Rasterization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// The requested surface has a zero or unallocatable dimension.
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },
    /// Downsampling requires dimensions divisible by the factor.
    #[error("{width}x{height} is not divisible by supersample factor {factor}")]
    NotDivisible { width: u32, height: u32, factor: u32 },
    /// Region operations need both operands on the same pixel grid.
    #[error("region grid mismatch: expected {expected:?}, found {found:?}")]
    GridMismatch { expected: (u32, u32), found: (u32, u32) },
}

/// Allocates a transparent pixmap.
pub(crate) fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RasterError> {
    Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })
}
