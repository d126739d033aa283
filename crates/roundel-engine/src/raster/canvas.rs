use std::ops::{Deref, DerefMut};

use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::path::ClosedPath;

use super::{new_pixmap, RasterError, Region};

/// Mutable drawing state of a [`Canvas`].
///
/// Points map to device pixels as `(p + offset) * scale`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasState {
    pub offset: Vec2,
    pub scale: f32,
    pub anti_alias: bool,
    /// Clip in device pixels. `None` = whole surface.
    pub clip: Option<Rect>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self { offset: Vec2::zero(), scale: 1.0, anti_alias: true, clip: None }
    }
}

impl CanvasState {
    #[inline]
    pub(crate) fn transform(&self) -> Transform {
        Transform::from_translate(self.offset.x, self.offset.y).post_scale(self.scale, self.scale)
    }

    #[inline]
    fn to_device(&self, rect: Rect) -> Rect {
        let r = rect.translate(self.offset);
        Rect::new(r.x() * self.scale, r.y() * self.scale, r.width() * self.scale, r.height() * self.scale)
    }
}

/// Pixel surface controls paint into.
///
/// State changes (translation, scale, anti-aliasing, clipping) are meant to be
/// made on a [`CanvasGuard`] obtained from [`Canvas::save`]; the guard restores
/// the previous state when dropped, including during unwinding.
pub struct Canvas {
    pixmap: Pixmap,
    state: CanvasState,
    depth: usize,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        Ok(Self::from_pixmap(new_pixmap(width, height)?))
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap, state: CanvasState::default(), depth: 0 }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn state(&self) -> CanvasState {
        self.state
    }

    /// Number of live [`CanvasGuard`]s.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[inline]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Premultiplied RGBA at device pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    // ── state ─────────────────────────────────────────────────────────────

    /// Pushes the current state; it is restored when the guard drops.
    pub fn save(&mut self) -> CanvasGuard<'_> {
        let saved = self.state;
        self.depth += 1;
        CanvasGuard { canvas: self, saved }
    }

    pub fn translate(&mut self, by: Vec2) {
        self.state.offset = self.state.offset + by;
    }

    /// Multiplies the current scale. Translation already applied stays in place.
    ///
    /// Factors that are not finite and positive are ignored.
    pub fn scale(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("ignoring canvas scale factor {factor}");
            return;
        }
        // (p + o) * s * f == (p + o/f) * (s * f)
        self.state.offset = self.state.offset * (1.0 / factor);
        self.state.scale *= factor;
    }

    pub fn set_anti_alias(&mut self, on: bool) {
        self.state.anti_alias = on;
    }

    /// Intersects the clip with `rect` (user space).
    pub fn clip_to(&mut self, rect: Rect) {
        let device = self.state.to_device(rect);
        self.state.clip = Some(match self.state.clip {
            None => device,
            Some(parent) => parent.intersect(device).unwrap_or_default(),
        });
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Fills the whole surface, ignoring transform and clip.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        let Some(r) = tiny_skia::Rect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height()) else {
            return;
        };
        let paint = self.paint(color);
        let mask = self.clip_mask();
        self.pixmap.fill_rect(r, &paint, self.state.transform(), mask.as_ref());
    }

    /// Fills a closed outline with the non-zero rule. Empty paths draw nothing.
    pub fn fill_path(&mut self, path: &ClosedPath, color: Color) {
        if color.is_transparent() {
            return;
        }
        let Some(sk) = path.to_skia() else { return; };
        let paint = self.paint(color);
        let mask = self.clip_mask();
        self.pixmap.fill_path(&sk, &paint, FillRule::Winding, self.state.transform(), mask.as_ref());
    }

    /// Coverage of `path` on this surface under the current transform.
    pub fn region(&self, path: &ClosedPath) -> Result<Region, RasterError> {
        Region::from_path(path, self.width(), self.height(), &self.state)
    }

    /// Paints `color` wherever `region` has coverage (device space).
    pub fn fill_region(&mut self, region: &Region, color: Color) {
        if color.is_transparent() {
            return;
        }
        if region.width() != self.width() || region.height() != self.height() {
            log::warn!(
                "fill_region: region {}x{} does not match canvas {}x{}; skipped",
                region.width(),
                region.height(),
                self.width(),
                self.height()
            );
            return;
        }
        let mut coverage = region.mask().clone();
        if let Some(clip) = self.clip_mask() {
            for (c, m) in coverage.data_mut().iter_mut().zip(clip.data()) {
                *c = ((*c as u32 * *m as u32 + 127) / 255) as u8;
            }
        }
        let Some(full) = tiny_skia::Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) else {
            return;
        };
        let mut paint = self.paint(color);
        paint.anti_alias = false;
        self.pixmap.fill_rect(full, &paint, Transform::identity(), Some(&coverage));
    }

    /// Source-over composites `src` with its top-left at device pixel `at`.
    pub fn draw_pixmap(&mut self, src: &Pixmap, at: (i32, i32)) {
        let mask = self.clip_mask();
        self.pixmap.draw_pixmap(
            at.0,
            at.1,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            mask.as_ref(),
        );
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = self.state.anti_alias;
        paint
    }

    fn clip_mask(&self) -> Option<Mask> {
        let clip = self.state.clip?;
        let mut mask = Mask::new(self.width(), self.height())?;
        if let Some(r) = tiny_skia::Rect::from_xywh(clip.x(), clip.y(), clip.width(), clip.height()) {
            mask.fill_path(&PathBuilder::from_rect(r), FillRule::Winding, false, Transform::identity());
        }
        Some(mask)
    }
}

/// Scoped canvas state. Dereferences to the [`Canvas`]; restores the saved
/// state on drop.
pub struct CanvasGuard<'a> {
    canvas: &'a mut Canvas,
    saved: CanvasState,
}

impl Deref for CanvasGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasGuard<'_> {
    fn drop(&mut self) {
        self.canvas.state = self.saved;
        self.canvas.depth -= 1;
    }
}
