use tiny_skia::{FillRule, Mask};

use crate::path::ClosedPath;

use super::{CanvasState, RasterError};

/// Per-pixel coverage of one or more outlines on a fixed-size device grid.
///
/// Regions are combined with boolean operations before being filled, which is
/// how a ring band is produced from two concentric outlines.
#[derive(Debug, Clone)]
pub struct Region {
    mask: Mask,
}

impl Region {
    /// A region covering nothing.
    pub fn empty(width: u32, height: u32) -> Result<Self, RasterError> {
        let mask = Mask::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self { mask })
    }

    /// Coverage of `path` mapped through `state`'s transform. Empty paths cover nothing.
    pub fn from_path(
        path: &ClosedPath,
        width: u32,
        height: u32,
        state: &CanvasState,
    ) -> Result<Self, RasterError> {
        let mut region = Self::empty(width, height)?;
        if let Some(sk) = path.to_skia() {
            region.mask.fill_path(&sk, FillRule::Winding, state.anti_alias, state.transform());
        }
        Ok(region)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Coverage (0–255) at device pixel `(x, y)`; 0 outside the grid.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width() || y >= self.height() {
            return 0;
        }
        self.mask.data()[(y * self.width() + x) as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.mask.data().iter().all(|&c| c == 0)
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.mask.data().iter().filter(|&&c| c != 0).count()
    }

    /// Removes `other` from this region: `self ∧ ¬other`, per pixel.
    ///
    /// Partial coverage subtracts proportionally, so anti-aliased edges of the
    /// two outlines meet without a seam.
    pub fn difference(&mut self, other: &Region) -> Result<(), RasterError> {
        self.ensure_same_grid(other)?;
        for (a, b) in self.mask.data_mut().iter_mut().zip(other.mask.data()) {
            *a = ((*a as u32 * (255 - *b as u32) + 127) / 255) as u8;
        }
        Ok(())
    }

    fn ensure_same_grid(&self, other: &Region) -> Result<(), RasterError> {
        if self.width() == other.width() && self.height() == other.height() {
            Ok(())
        } else {
            Err(RasterError::GridMismatch {
                expected: (self.width(), self.height()),
                found: (other.width(), other.height()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadius, Rect};
    use crate::path::RoundedPathBuilder;

    fn square_region(rect: Rect, size: u32) -> Region {
        let path = RoundedPathBuilder::build(rect, CornerRadius::zero());
        let state = CanvasState { anti_alias: false, ..CanvasState::default() };
        Region::from_path(&path, size, size, &state).unwrap()
    }

    #[test]
    fn empty_path_covers_nothing() {
        let r = Region::from_path(&ClosedPath::empty(), 4, 4, &CanvasState::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn difference_leaves_a_band() {
        let mut outer = square_region(Rect::new(0.0, 0.0, 10.0, 10.0), 10);
        let inner = square_region(Rect::new(2.0, 2.0, 6.0, 6.0), 10);
        outer.difference(&inner).unwrap();

        assert_eq!(outer.coverage(0, 0), 255);
        assert_eq!(outer.coverage(1, 5), 255);
        assert_eq!(outer.coverage(2, 2), 0);
        assert_eq!(outer.coverage(7, 7), 0);
        assert_eq!(outer.coverage(8, 8), 255);
        assert_eq!(outer.covered_pixels(), 100 - 36);
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let mut a = Region::empty(4, 4).unwrap();
        let b = Region::empty(8, 4).unwrap();
        assert!(matches!(a.difference(&b), Err(RasterError::GridMismatch { .. })));
    }

    #[test]
    fn coverage_outside_grid_is_zero() {
        let r = square_region(Rect::new(0.0, 0.0, 4.0, 4.0), 4);
        assert_eq!(r.coverage(10, 0), 0);
    }
}
