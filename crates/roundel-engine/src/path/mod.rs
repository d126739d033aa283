//! Vector outlines.
//!
//! Paths are recorded as a small segment list so geometry can be inspected
//! (tests, hit-testing) before it is flattened for the rasterizer.
//!
//! Extending:
//! - add a segment variant here
//! - teach [`ClosedPath::to_skia`] how to emit it

mod builder;

pub use builder::RoundedPathBuilder;

use crate::coords::{Rect, Vec2};

/// Cubic handle length for a quarter circle (4/3 · (√2 − 1)).
const KAPPA: f32 = 0.552_284_75;

/// Which rectangle corner an arc rounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Clockwise order starting at the top-left corner.
    pub const CLOCKWISE: [Corner; 4] =
        [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft];

    /// Unit vector from the arc center to the point where this corner's arc
    /// starts when traversed clockwise (screen space, y down).
    #[inline]
    pub const fn start_dir(self) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(-1.0, 0.0),
            Corner::TopRight => Vec2::new(0.0, -1.0),
            Corner::BottomRight => Vec2::new(1.0, 0.0),
            Corner::BottomLeft => Vec2::new(0.0, 1.0),
        }
    }

    /// Unit vector from the arc center to the arc's end point.
    #[inline]
    pub const fn end_dir(self) -> Vec2 {
        clockwise_normal(self.start_dir())
    }
}

/// Rotates a unit vector a quarter turn clockwise on screen.
#[inline]
const fn clockwise_normal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// A clockwise quarter-circle arc rounding one corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CornerArc {
    pub corner: Corner,
    pub center: Vec2,
    pub radius: f32,
}

impl CornerArc {
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.center + self.corner.start_dir() * self.radius
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.center + self.corner.end_dir() * self.radius
    }

    /// Bézier control points `(c1, c2, end)` approximating the arc.
    fn cubic(&self) -> (Vec2, Vec2, Vec2) {
        let p0 = self.start();
        let p3 = self.end();
        let k = KAPPA * self.radius;
        // Travel direction of a clockwise arc is the radius direction turned clockwise.
        let t0 = clockwise_normal(self.corner.start_dir());
        let t1 = clockwise_normal(self.corner.end_dir());
        (p0 + t0 * k, p3 - t1 * k, p3)
    }
}

/// One element of a recorded outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc(CornerArc),
    Close,
}

/// A closed outline built from straight edges and corner arcs.
///
/// An empty path (no segments) is the representation of degenerate geometry;
/// it fills nothing and never errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosedPath {
    segments: Vec<PathSegment>,
    bounds: Rect,
}

impl ClosedPath {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_segments(segments: Vec<PathSegment>, bounds: Rect) -> Self {
        debug_assert!(matches!(segments.last(), Some(PathSegment::Close)));
        Self { segments, bounds }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The rectangle the outline was built for.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of straight edges.
    pub fn line_count(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, PathSegment::LineTo(_))).count()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &CornerArc> + '_ {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Arc(a) => Some(a),
            _ => None,
        })
    }

    /// The arc rounding `corner`, if that corner is rounded.
    pub fn arc_at(&self, corner: Corner) -> Option<&CornerArc> {
        self.arcs().find(|a| a.corner == corner)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Flattens the outline into a rasterizable path. `None` for empty paths.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        if self.is_empty() {
            return None;
        }
        let mut pb = tiny_skia::PathBuilder::new();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
                PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
                PathSegment::Arc(arc) => {
                    let (c1, c2, end) = arc.cubic();
                    pb.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
                }
                PathSegment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}
