use core::hash::{Hash, Hasher};

/// Per-corner radii for a rounded rectangle, in whole logical pixels.
///
/// Corners follow CSS order: top-left, top-right, bottom-right, bottom-left.
/// Inputs are signed so callers can pass raw property values; negatives clamp to 0.
///
/// A value built with [`CornerRadius::uniform`] remembers that one radius was
/// requested for all corners until a single corner is set individually.
/// Equality ignores that flag: `per_corner(5, 5, 5, 5) == uniform(5)`.
#[derive(Debug, Copy, Clone)]
pub struct CornerRadius {
    top_left: u32,
    top_right: u32,
    bottom_right: u32,
    bottom_left: u32,
    uniform: bool,
}

#[inline]
fn clamp(v: i32) -> u32 {
    v.max(0) as u32
}

impl CornerRadius {
    /// Same radius on all four corners.
    #[inline]
    pub const fn uniform(value: i32) -> Self {
        let v = if value < 0 { 0 } else { value as u32 };
        Self { top_left: v, top_right: v, bottom_right: v, bottom_left: v, uniform: true }
    }

    /// Independent radius per corner. Never reports [`is_uniform`](Self::is_uniform).
    #[inline]
    pub fn per_corner(top_left: i32, top_right: i32, bottom_right: i32, bottom_left: i32) -> Self {
        Self {
            top_left: clamp(top_left),
            top_right: clamp(top_right),
            bottom_right: clamp(bottom_right),
            bottom_left: clamp(bottom_left),
            uniform: false,
        }
    }

    /// Square corners.
    #[inline]
    pub const fn zero() -> Self {
        Self::uniform(0)
    }

    #[inline]
    pub fn top_left(&self) -> u32 {
        self.top_left
    }

    #[inline]
    pub fn top_right(&self) -> u32 {
        self.top_right
    }

    #[inline]
    pub fn bottom_right(&self) -> u32 {
        self.bottom_right
    }

    #[inline]
    pub fn bottom_left(&self) -> u32 {
        self.bottom_left
    }

    /// Corners in CSS order.
    #[inline]
    pub fn corners(&self) -> [u32; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// `true` only when the value was built (or last reset) through the uniform path.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// The shared radius, if this value is in uniform mode.
    #[inline]
    pub fn uniform_value(&self) -> Option<u32> {
        self.uniform.then_some(self.top_left)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.corners().iter().all(|&r| r == 0)
    }

    /// Structural comparison against the library default (square corners).
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Resets all four corners and switches back to uniform mode.
    pub fn set_all(&mut self, value: i32) {
        *self = Self::uniform(value);
    }

    pub fn set_top_left(&mut self, value: i32) {
        self.top_left = clamp(value);
        self.uniform = false;
    }

    pub fn set_top_right(&mut self, value: i32) {
        self.top_right = clamp(value);
        self.uniform = false;
    }

    pub fn set_bottom_right(&mut self, value: i32) {
        self.bottom_right = clamp(value);
        self.uniform = false;
    }

    pub fn set_bottom_left(&mut self, value: i32) {
        self.bottom_left = clamp(value);
        self.uniform = false;
    }

    /// Radii of a shape inset by `amount` from this one: `max(0, r - amount)` per corner.
    ///
    /// Fractional results round down so the inner curve never bulges past the outer one.
    /// Uniform mode carries over.
    pub fn inset(&self, amount: f32) -> Self {
        let shrink = |r: u32| -> u32 {
            if !amount.is_finite() || amount <= 0.0 {
                return r;
            }
            (r as f32 - amount).max(0.0).floor() as u32
        };
        Self {
            top_left: shrink(self.top_left),
            top_right: shrink(self.top_right),
            bottom_right: shrink(self.bottom_right),
            bottom_left: shrink(self.bottom_left),
            uniform: self.uniform,
        }
    }
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for CornerRadius {
    fn eq(&self, other: &Self) -> bool {
        self.corners() == other.corners()
    }
}

impl Eq for CornerRadius {}

impl Hash for CornerRadius {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.corners().hash(state);
    }
}

impl From<i32> for CornerRadius {
    fn from(value: i32) -> Self {
        Self::uniform(value)
    }
}
