//! Roundel engine crate.
//!
//! Geometry, rounded outlines and the software rasterizer shared by every
//! rounded control in `roundel-ui`. Nothing here knows about windows or
//! input; hosts hand the UI layer a [`raster::Canvas`] to paint into.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod path;
pub mod raster;
pub mod time;
