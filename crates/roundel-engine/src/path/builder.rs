use crate::coords::{CornerRadius, Rect, Vec2};

use super::{ClosedPath, Corner, CornerArc, PathSegment};

/// Builds closed rounded-rectangle outlines.
///
/// Rules:
/// - empty rectangles produce an empty path
/// - all-zero radii produce the exact rectangle (four straight edges, no arcs)
/// - each corner is clamped to half the rectangle's shorter side on its own;
///   a corner requesting 0 stays sharp even when its neighbours are rounded
/// - outlines run clockwise from the top-left corner and are always closed
///
/// Identical radii and winding on two outlines is what lets a region difference
/// of an outer and inner outline leave a seamless band.
pub struct RoundedPathBuilder;

impl RoundedPathBuilder {
    pub fn build(rect: Rect, radii: CornerRadius) -> ClosedPath {
        if rect.is_empty() || !rect.is_finite() {
            return ClosedPath::empty();
        }
        if radii.is_zero() {
            return Self::square(rect);
        }

        let limit = rect.min_side() / 2.0;
        let effective = |r: u32| (r as f32).min(limit);
        let [tl, tr, br, bl] = radii.corners().map(effective);

        let (x0, y0, x1, y1) = (rect.x(), rect.y(), rect.right(), rect.bottom());
        let mut out = Outline::default();

        // Each corner contributes its arc (or a sharp vertex); the straight
        // edges between corners are implied by the next corner's start point.
        out.corner(Corner::TopLeft, Vec2::new(x0, y0), Vec2::new(x0 + tl, y0 + tl), tl);
        out.corner(Corner::TopRight, Vec2::new(x1, y0), Vec2::new(x1 - tr, y0 + tr), tr);
        out.corner(Corner::BottomRight, Vec2::new(x1, y1), Vec2::new(x1 - br, y1 - br), br);
        out.corner(Corner::BottomLeft, Vec2::new(x0, y1), Vec2::new(x0 + bl, y1 - bl), bl);

        out.finish(rect)
    }

    fn square(rect: Rect) -> ClosedPath {
        let (x0, y0, x1, y1) = (rect.x(), rect.y(), rect.right(), rect.bottom());
        ClosedPath::from_segments(
            vec![
                PathSegment::MoveTo(Vec2::new(x0, y0)),
                PathSegment::LineTo(Vec2::new(x1, y0)),
                PathSegment::LineTo(Vec2::new(x1, y1)),
                PathSegment::LineTo(Vec2::new(x0, y1)),
                PathSegment::LineTo(Vec2::new(x0, y0)),
                PathSegment::Close,
            ],
            rect,
        )
    }
}

#[derive(Default)]
struct Outline {
    segments: Vec<PathSegment>,
    start: Option<Vec2>,
    pen: Vec2,
}

impl Outline {
    fn corner(&mut self, corner: Corner, vertex: Vec2, center: Vec2, radius: f32) {
        if radius > 0.0 {
            let arc = CornerArc { corner, center, radius };
            self.point(arc.start());
            self.segments.push(PathSegment::Arc(arc));
            self.pen = arc.end();
        } else {
            self.point(vertex);
        }
    }

    /// Moves (first call) or draws a straight edge to `p`, skipping zero-length edges.
    fn point(&mut self, p: Vec2) {
        match self.start {
            None => {
                self.start = Some(p);
                self.segments.push(PathSegment::MoveTo(p));
            }
            Some(_) if p != self.pen => self.segments.push(PathSegment::LineTo(p)),
            Some(_) => {}
        }
        self.pen = p;
    }

    fn finish(mut self, bounds: Rect) -> ClosedPath {
        if let Some(start) = self.start {
            if start != self.pen {
                self.segments.push(PathSegment::LineTo(start));
            }
        }
        self.segments.push(PathSegment::Close);
        ClosedPath::from_segments(self.segments, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f32, h: f32) -> Rect {
        Rect::new(0.0, 0.0, w, h)
    }

    // ── degeneracy ────────────────────────────────────────────────────────

    #[test]
    fn zero_width_or_height_is_empty() {
        let radii = CornerRadius::uniform(4);
        assert!(RoundedPathBuilder::build(rect(0.0, 10.0), radii).is_empty());
        assert!(RoundedPathBuilder::build(rect(10.0, 0.0), radii).is_empty());
        assert!(RoundedPathBuilder::build(rect(-5.0, 10.0), radii).is_empty());
    }

    #[test]
    fn zero_radius_is_an_exact_rectangle() {
        let p = RoundedPathBuilder::build(rect(10.0, 10.0), CornerRadius::uniform(0));
        assert_eq!(p.line_count(), 4);
        assert_eq!(p.arcs().count(), 0);
        assert!(p.is_closed());
        assert_eq!(p.segments()[0], PathSegment::MoveTo(Vec2::new(0.0, 0.0)));
        assert_eq!(p.segments()[1], PathSegment::LineTo(Vec2::new(10.0, 0.0)));
        assert_eq!(p.segments()[2], PathSegment::LineTo(Vec2::new(10.0, 10.0)));
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn oversized_radius_clamps_to_half_the_minor_side() {
        let p = RoundedPathBuilder::build(rect(10.0, 10.0), CornerRadius::uniform(100));
        assert_eq!(p.arcs().count(), 4);
        assert!(p.arcs().all(|a| a.radius == 5.0));
        // Circle: no straight edges survive.
        assert_eq!(p.line_count(), 0);
    }

    #[test]
    fn corners_clamp_independently_on_narrow_rects() {
        let p = RoundedPathBuilder::build(rect(40.0, 10.0), CornerRadius::per_corner(2, 20, 4, 0));
        assert_eq!(p.arc_at(Corner::TopLeft).map(|a| a.radius), Some(2.0));
        assert_eq!(p.arc_at(Corner::TopRight).map(|a| a.radius), Some(5.0));
        assert_eq!(p.arc_at(Corner::BottomRight).map(|a| a.radius), Some(4.0));
        assert!(p.arc_at(Corner::BottomLeft).is_none());
    }

    #[test]
    fn zero_corner_stays_sharp_next_to_rounded_ones() {
        let p = RoundedPathBuilder::build(rect(20.0, 20.0), CornerRadius::per_corner(0, 6, 6, 6));
        assert_eq!(p.segments()[0], PathSegment::MoveTo(Vec2::new(0.0, 0.0)));
        assert_eq!(p.arcs().count(), 3);
    }

    // ── winding / closure ─────────────────────────────────────────────────

    #[test]
    fn rounded_outline_runs_clockwise_from_top_left() {
        let p = RoundedPathBuilder::build(rect(100.0, 40.0), CornerRadius::uniform(8));
        let order: Vec<Corner> = p.arcs().map(|a| a.corner).collect();
        assert_eq!(order, Corner::CLOCKWISE.to_vec());

        match p.segments()[0] {
            PathSegment::MoveTo(start) => assert!(start.distance(Vec2::new(0.0, 8.0)) < 1e-4),
            other => panic!("expected MoveTo, got {other:?}"),
        }
        assert!(p.is_closed());
        // Four straight edges between the four arcs.
        assert_eq!(p.line_count(), 4);
    }

    #[test]
    fn bounds_are_the_input_rect() {
        let r = Rect::new(1.0, 1.0, 98.0, 38.0);
        assert_eq!(RoundedPathBuilder::build(r, CornerRadius::uniform(7)).bounds(), r);
    }

    #[test]
    fn rounded_path_rasterizes() {
        let p = RoundedPathBuilder::build(rect(30.0, 20.0), CornerRadius::uniform(6));
        let sk = p.to_skia().expect("non-empty path");
        let b = sk.bounds();
        assert!((b.left() - 0.0).abs() < 1e-3 && (b.right() - 30.0).abs() < 1e-3);
        assert!((b.top() - 0.0).abs() < 1e-3 && (b.bottom() - 20.0).abs() < 1e-3);
    }
}
