//! In-memory [`ControlHost`] for tests and offscreen rendering.
//!
//! Overlay surfaces created through [`HeadlessHost`] record everything done to
//! them; [`HeadlessHost::overlays`] returns snapshots so callers can inspect
//! bounds, visibility and the last presented frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use roundel_engine::coords::{Rect, Vec2};
use roundel_engine::paint::Color;
use roundel_engine::raster::{Canvas, Pixmap};

use crate::host::{ControlHost, HostError, OverlayAttributes, OverlaySurface};

/// Everything observed on one overlay surface.
#[derive(Debug, Clone)]
pub struct OverlayRecord {
    pub attributes: OverlayAttributes,
    /// Last bounds set, in screen coordinates.
    pub bounds: Option<Rect>,
    pub visible: bool,
    /// Number of `present` calls.
    pub presents: usize,
    pub last_frame: Option<Pixmap>,
    /// The owning surface has been dropped.
    pub destroyed: bool,
}

struct HeadlessOverlay {
    record: Rc<RefCell<OverlayRecord>>,
}

impl OverlaySurface for HeadlessOverlay {
    fn set_bounds(&mut self, bounds: Rect) {
        self.record.borrow_mut().bounds = Some(bounds);
    }

    fn present(&mut self, pixels: &Pixmap) {
        let mut r = self.record.borrow_mut();
        r.presents += 1;
        r.last_frame = Some(pixels.clone());
    }

    fn show(&mut self) {
        self.record.borrow_mut().visible = true;
    }

    fn hide(&mut self) {
        self.record.borrow_mut().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.record.borrow().visible
    }
}

impl Drop for HeadlessOverlay {
    fn drop(&mut self) {
        let mut r = self.record.borrow_mut();
        r.destroyed = true;
        r.visible = false;
    }
}

/// Host without a display: a fixed control rectangle inside a window placed
/// somewhere on a virtual screen.
pub struct HeadlessHost {
    bounds: Cell<Rect>,
    window_origin: Cell<Vec2>,
    background: Cell<Option<Color>>,
    fail_overlays: Cell<bool>,
    invalidations: Cell<usize>,
    timer: Cell<Option<Duration>>,
    timer_starts: Cell<usize>,
    overlays: RefCell<Vec<Rc<RefCell<OverlayRecord>>>>,
}

impl HeadlessHost {
    /// A host whose control occupies `bounds` in a window at the screen origin.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Cell::new(bounds),
            window_origin: Cell::new(Vec2::zero()),
            background: Cell::new(None),
            fail_overlays: Cell::new(false),
            invalidations: Cell::new(0),
            timer: Cell::new(None),
            timer_starts: Cell::new(0),
            overlays: RefCell::new(Vec::new()),
        }
    }

    pub fn with_window_origin(self, origin: Vec2) -> Self {
        self.window_origin.set(origin);
        self
    }

    /// Parent background painted behind the control's rounded corners.
    pub fn with_parent_background(self, color: Color) -> Self {
        self.background.set(Some(color));
        self
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    /// Makes subsequent `create_overlay` calls fail.
    pub fn set_fail_overlays(&self, fail: bool) {
        self.fail_overlays.set(fail);
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.get()
    }

    /// The running timer's interval, if any.
    pub fn timer(&self) -> Option<Duration> {
        self.timer.get()
    }

    pub fn timer_starts(&self) -> usize {
        self.timer_starts.get()
    }

    /// Snapshots of every overlay created so far, in creation order.
    pub fn overlays(&self) -> Vec<OverlayRecord> {
        self.overlays.borrow().iter().map(|r| r.borrow().clone()).collect()
    }

    pub fn overlay(&self, index: usize) -> Option<OverlayRecord> {
        self.overlays.borrow().get(index).map(|r| r.borrow().clone())
    }
}

impl ControlHost for HeadlessHost {
    fn invalidate(&self) {
        self.invalidations.set(self.invalidations.get() + 1);
    }

    fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn client_to_screen(&self, point: Vec2) -> Vec2 {
        self.window_origin.get() + self.bounds.get().origin + point
    }

    fn paint_parent_background(&self, canvas: &mut Canvas, clip: Rect) {
        if let Some(color) = self.background.get() {
            canvas.fill_rect(clip, color);
        }
    }

    fn create_overlay(&self, attributes: &OverlayAttributes) -> Result<Box<dyn OverlaySurface>, HostError> {
        if self.fail_overlays.get() {
            return Err(HostError::OverlayCreation("headless host configured to fail".into()));
        }
        let record = Rc::new(RefCell::new(OverlayRecord {
            attributes: *attributes,
            bounds: None,
            visible: false,
            presents: 0,
            last_frame: None,
            destroyed: false,
        }));
        self.overlays.borrow_mut().push(Rc::clone(&record));
        Ok(Box::new(HeadlessOverlay { record }))
    }

    fn start_timer(&self, interval: Duration) {
        self.timer.set(Some(interval));
        self.timer_starts.set(self.timer_starts.get() + 1);
    }

    fn stop_timer(&self) {
        self.timer.set(None);
    }
}
