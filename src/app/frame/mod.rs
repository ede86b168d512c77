// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/frame/mod.rs
//
// Ratio frame: a live image kept at a fixed aspect ratio with a draggable
// region-of-interest overlay.

mod drag;
mod feed;
mod redraw;

use std::sync::{Arc, MutexGuard};

use image::RgbaImage;

pub use drag::{DragPhase, DragState, clamp_to_content};
pub use feed::{FrameImage, ImageFeed};
pub use redraw::{RedrawReceiver, RedrawSender, redraw_queue};

use self::feed::ImageSlot;
use super::surface::{Rgba, Surface};
use crate::config::FrameConfig;
use crate::constant::MAX_FRAME_EXTENT;
use crate::domain::{AspectRatio, Point, Rect, Roi, Size, to_image_coordinates};

/// Borrow of the frame's current image. Holds the image lock while alive,
/// so keep it short and on the UI thread.
pub struct ImageGuard<'a> {
    guard: MutexGuard<'a, Option<FrameImage>>,
}

impl ImageGuard<'_> {
    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.guard.as_ref().map(|image| &image.pixels)
    }

    pub fn generation(&self) -> Option<u64> {
        self.guard.as_ref().map(|image| image.generation)
    }
}

/// The widget model. Everything except the image slot is UI-thread state.
pub struct RatioFrame {
    slot: Arc<ImageSlot>,
    redraw_tx: RedrawSender,
    redraw_rx: RedrawReceiver,
    /// Generation whose dimensions `aspect` was last derived from.
    seen_generation: u64,
    aspect: AspectRatio,
    drag: DragState,

    // Geometry (outer bounds include the border).
    outer: Size,
    border: i32,
    minimum: Size,
    maximum: Size,

    // Appearance.
    accent: Rgba,
    gradient_start: Rgba,
    gradient_end: Rgba,
}

impl Default for RatioFrame {
    fn default() -> Self {
        Self::new(&FrameConfig::default())
    }
}

impl RatioFrame {
    pub fn new(config: &FrameConfig) -> Self {
        let (redraw_tx, redraw_rx) = redraw_queue();
        let border = config.border.max(0);
        Self {
            slot: Arc::new(ImageSlot::default()),
            redraw_tx,
            redraw_rx,
            seen_generation: 0,
            aspect: AspectRatio::default(),
            drag: DragState::default(),
            outer: config.content_size.expanded(border.saturating_mul(2)),
            border,
            minimum: Size::ZERO,
            maximum: Size::new(MAX_FRAME_EXTENT, MAX_FRAME_EXTENT),
            accent: config.accent,
            gradient_start: config.gradient_start,
            gradient_end: config.gradient_end,
        }
    }

    // =========================================================================
    // Image
    // =========================================================================

    /// Handle for pushing images from other threads.
    pub fn feed(&self) -> ImageFeed {
        ImageFeed::new(Arc::clone(&self.slot), self.redraw_tx.clone())
    }

    /// Replace the image with a copy of `image`, adopt its aspect ratio and
    /// queue a repaint.
    pub fn set_image(&mut self, image: &RgbaImage) {
        let generation = self.slot.store(image);
        self.adopt(generation, image.width(), image.height());
        self.redraw_tx.request();
    }

    /// Borrow the current image in place.
    pub fn image(&self) -> ImageGuard<'_> {
        ImageGuard {
            guard: self.slot.lock(),
        }
    }

    /// Independent copy of the current image.
    pub fn image_snapshot(&self) -> Option<RgbaImage> {
        self.slot.snapshot()
    }

    /// Drain the redraw queue and pick up images pushed through an
    /// [`ImageFeed`]. Returns `true` when a repaint was requested.
    pub fn sync(&mut self) -> bool {
        let pending = self.redraw_rx.take();
        let latest = self
            .slot
            .lock()
            .as_ref()
            .map(|image| (image.generation, image.pixels.width(), image.pixels.height()));
        if let Some((generation, width, height)) = latest {
            self.adopt(generation, width, height);
        }
        pending
    }

    fn adopt(&mut self, generation: u64, width: u32, height: u32) {
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.set_aspect_ratio(width, height);
        }
    }

    // =========================================================================
    // Aspect ratio and layout
    // =========================================================================

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    /// Set the ratio from a pixel size. Sizes with a zero side are ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        match AspectRatio::reduced(width, height) {
            Some(ratio) => {
                if ratio != self.aspect {
                    log::debug!("aspect ratio {} -> {ratio}", self.aspect);
                }
                self.aspect = ratio;
            }
            None => log::debug!("ignoring degenerate size {width}x{height} for aspect ratio"),
        }
    }

    /// Largest rectangle at `available`'s origin that has the frame's ratio.
    pub fn compute_fit_rect(&self, available: Rect) -> Rect {
        self.aspect.fit(available)
    }

    /// Shrink the frame so its content area matches the aspect ratio.
    pub fn fit_to_aspect(&mut self) {
        let fit = self.compute_fit_rect(self.content_rect());
        self.resize(fit.size().expanded(self.border.saturating_mul(2)));
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    /// Outer bounds, border included.
    pub fn outer_size(&self) -> Size {
        self.outer
    }

    pub fn preferred_size(&self) -> Size {
        self.outer
    }

    /// Drawable area excluding the border.
    pub fn content_rect(&self) -> Rect {
        Rect::from_size(self.outer).inset(self.border)
    }

    pub fn minimum_size(&self) -> Size {
        self.minimum
    }

    pub fn maximum_size(&self) -> Size {
        self.maximum
    }

    /// Set the outer size, honouring the minimum/maximum constraints.
    pub fn resize(&mut self, outer: Size) {
        let outer = outer.clamped(self.minimum, self.maximum);
        if outer != self.outer {
            log::debug!(
                "frame resized {}x{} -> {}x{}",
                self.outer.width,
                self.outer.height,
                outer.width,
                outer.height
            );
            self.outer = outer;
        }
    }

    /// Minimum content size; the border is added on top.
    pub fn set_content_minimum_size(&mut self, size: Size) {
        self.minimum = size.expanded(self.border.saturating_mul(2));
        self.resize(self.outer);
        self.redraw_tx.request();
    }

    /// Maximum content size; the border is added on top.
    pub fn set_content_maximum_size(&mut self, size: Size) {
        self.maximum = size.expanded(self.border.saturating_mul(2));
        self.resize(self.outer);
        self.redraw_tx.request();
    }

    pub fn set_content_fixed_size(&mut self, size: Size) {
        self.set_content_minimum_size(size);
        self.set_content_maximum_size(size);
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the image (or the placeholder) and the ROI outline.
    ///
    /// The image lock is held for the whole pass so a concurrent store
    /// cannot swap the bitmap mid-paint.
    pub fn paint<S: Surface>(&mut self, surface: &mut S) {
        let slot = Arc::clone(&self.slot);
        let image = slot.lock();

        match image.as_ref() {
            Some(current) => {
                let (width, height) = current.pixels.dimensions();
                self.adopt(current.generation, width, height);
                // The available area may have changed since the last resize.
                self.fit_to_aspect();
                let target = self.compute_fit_rect(self.content_rect());
                surface.draw_image(target, current);
            }
            None => {
                surface.fill_gradient(
                    Rect::from_size(self.outer),
                    self.gradient_start,
                    self.gradient_end,
                );
            }
        }

        surface.stroke_rect(self.drag.rect(), self.accent);
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn on_pointer_press(&mut self, at: Point) {
        log::trace!("pointer press at ({}, {})", at.x, at.y);
        self.drag.press(at);
    }

    /// Returns `true` when the overlay needs repainting.
    pub fn on_pointer_move(&mut self, at: Point) -> bool {
        let content = self.content_rect().size();
        self.drag.update(at, content)
    }

    /// Finish a drag; a non-degenerate one yields the ROI in image pixels.
    pub fn on_pointer_release(&mut self, at: Point) -> Option<Roi> {
        log::trace!("pointer release at ({}, {})", at.x, at.y);
        let content = self.content_rect().size();
        let (anchor, end) = self.drag.release(at, content)?;
        let roi = Roi::from_corners(
            self.to_image_coordinates(anchor),
            self.to_image_coordinates(end),
        );
        log::info!("ROI selected: {roi}");
        Some(roi)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Overlay rectangle in widget-local pixels.
    pub fn drag_rect(&self) -> Rect {
        self.drag.rect()
    }

    /// Map a widget-local point into image pixels, stretching the image over
    /// the content area. Letterbox padding is not compensated.
    pub fn to_image_coordinates(&self, p: Point) -> Point {
        let image_size = self.slot.lock().as_ref().map_or(Size::ZERO, FrameImage::size);
        to_image_coordinates(p, image_size, self.content_rect().size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::surface::{Canvas, PaintOp, Scene};
    use crate::domain::gcd;

    fn frame_with_content(width: i32, height: i32) -> RatioFrame {
        RatioFrame::new(&FrameConfig {
            border: 0,
            content_size: Size::new(width, height),
            ..FrameConfig::default()
        })
    }

    fn pattern(width: u32, height: u32, seed: u8) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([seed, (x % 256) as u8, (y % 256) as u8, 255])
        })
    }

    #[test]
    fn default_ratio_is_four_by_three() {
        let frame = RatioFrame::default();
        assert_eq!((frame.aspect_ratio().width(), frame.aspect_ratio().height()), (4, 3));
    }

    #[test]
    fn set_aspect_ratio_reduces() {
        let mut frame = RatioFrame::default();
        for (w, h) in [(1920, 1080), (1280, 1024), (3, 2), (1001, 7)] {
            frame.set_aspect_ratio(w, h);
            let ratio = frame.aspect_ratio();
            assert_eq!(gcd(ratio.width(), ratio.height()), 1);
            assert_eq!(ratio.width() * h, ratio.height() * w);
        }
    }

    #[test]
    fn set_aspect_ratio_ignores_zero_sides() {
        let mut frame = RatioFrame::default();
        frame.set_aspect_ratio(16, 10);
        for (w, h) in [(0, 0), (5, 0), (0, 5)] {
            frame.set_aspect_ratio(w, h);
            assert_eq!(frame.aspect_ratio().to_string(), "8:5");
        }
    }

    #[test]
    fn set_image_adopts_ratio_and_requests_redraw() {
        let mut frame = RatioFrame::default();
        frame.set_image(&pattern(1920, 1080, 0));
        assert_eq!(frame.aspect_ratio().to_string(), "16:9");
        assert!(frame.sync());
        assert!(!frame.sync());
    }

    #[test]
    fn zero_sized_image_keeps_ratio() {
        let mut frame = RatioFrame::default();
        frame.set_image(&pattern(30, 20, 0));
        frame.set_image(&RgbaImage::new(0, 0));
        assert_eq!(frame.aspect_ratio().to_string(), "3:2");
        assert!(frame.image().pixels().is_some());
    }

    #[test]
    fn compute_fit_rect_rounds_half_up() {
        let mut frame = RatioFrame::default();
        frame.set_aspect_ratio(16, 9);
        assert_eq!(
            frame.compute_fit_rect(Rect::new(0, 0, 300, 100)),
            Rect::new(0, 0, 178, 100)
        );
    }

    #[test]
    fn fit_to_aspect_adds_border_back() {
        let mut frame = RatioFrame::new(&FrameConfig {
            border: 2,
            content_size: Size::new(300, 100),
            ..FrameConfig::default()
        });
        frame.set_aspect_ratio(16, 9);
        frame.fit_to_aspect();
        assert_eq!(frame.outer_size(), Size::new(182, 104));
        assert_eq!(frame.content_rect(), Rect::new(2, 2, 178, 100));
    }

    #[test]
    fn sizing_constraints_include_border() {
        let mut frame = RatioFrame::new(&FrameConfig {
            border: 3,
            content_size: Size::new(100, 100),
            ..FrameConfig::default()
        });
        frame.set_content_minimum_size(Size::new(200, 150));
        assert_eq!(frame.minimum_size(), Size::new(206, 156));
        assert_eq!(frame.outer_size(), Size::new(206, 156));

        frame.set_content_maximum_size(Size::new(400, 300));
        assert_eq!(frame.maximum_size(), Size::new(406, 306));
        frame.resize(Size::new(1000, 1000));
        assert_eq!(frame.outer_size(), Size::new(406, 306));
        assert!(frame.sync());
    }

    #[test]
    fn fixed_size_pins_both_bounds() {
        let mut frame = RatioFrame::default();
        frame.set_content_fixed_size(Size::new(320, 240));
        let border = frame.border();
        assert_eq!(frame.minimum_size(), frame.maximum_size());
        assert_eq!(frame.outer_size(), Size::new(320 + 2 * border, 240 + 2 * border));
    }

    #[test]
    fn unbounded_maximum_saturates() {
        let mut frame = frame_with_content(200, 100);
        frame.set_content_maximum_size(Size::new(i32::MAX, i32::MAX));
        assert_eq!(frame.maximum_size(), Size::new(i32::MAX, i32::MAX));
        assert_eq!(frame.outer_size(), Size::new(200, 100));

        let mut bordered = RatioFrame::default();
        bordered.set_content_maximum_size(Size::new(i32::MAX, i32::MAX));
        assert_eq!(bordered.maximum_size(), Size::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn paint_without_image_draws_gradient_then_outline() {
        let mut frame = frame_with_content(40, 30);
        let mut scene = Scene::new();
        frame.paint(&mut scene);
        assert_eq!(scene.ops.len(), 2);
        assert!(matches!(
            scene.ops[0],
            PaintOp::Gradient { target, .. } if target == Rect::new(0, 0, 40, 30)
        ));
        assert!(matches!(scene.ops[1], PaintOp::Outline { .. }));
    }

    #[test]
    fn paint_with_image_refits_and_draws_into_fit_rect() {
        let mut frame = frame_with_content(300, 100);
        frame.set_image(&pattern(160, 90, 0));
        let mut scene = Scene::new();
        frame.paint(&mut scene);
        assert_eq!(frame.outer_size(), Size::new(178, 100));
        assert!(matches!(
            scene.ops[0],
            PaintOp::Image { target, size, .. }
                if target == Rect::new(0, 0, 178, 100) && size == Size::new(160, 90)
        ));
    }

    #[test]
    fn paint_adopts_ratio_of_fed_image() {
        let mut frame = frame_with_content(400, 400);
        let feed = frame.feed();
        std::thread::spawn(move || feed.set_image(&pattern(200, 100, 1)))
            .join()
            .unwrap();
        let mut scene = Scene::new();
        frame.paint(&mut scene);
        assert_eq!(frame.aspect_ratio().to_string(), "2:1");
        assert_eq!(frame.content_rect(), Rect::new(0, 0, 400, 200));
    }

    #[test]
    fn paint_into_canvas_stretches_pixels() {
        let mut frame = frame_with_content(40, 20);
        frame.set_image(&RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255])));
        let mut canvas = Canvas::new(frame.outer_size());
        frame.paint(&mut canvas);
        assert_eq!(*canvas.pixels().get_pixel(20, 10), image::Rgba([10, 20, 30, 255]));
        assert_eq!(*canvas.pixels().get_pixel(39, 19), image::Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn degenerate_click_emits_nothing() {
        let mut frame = frame_with_content(200, 100);
        frame.set_image(&pattern(400, 200, 0));
        frame.on_pointer_press(Point::new(10, 10));
        assert_eq!(frame.on_pointer_release(Point::new(10, 10)), None);
        assert!(!frame.is_dragging());
    }

    #[test]
    fn drag_reports_roi_in_image_pixels() {
        let mut frame = frame_with_content(200, 100);
        frame.set_image(&pattern(400, 200, 0));
        frame.on_pointer_press(Point::new(10, 10));
        frame.on_pointer_move(Point::new(50, 10));
        let roi = frame.on_pointer_release(Point::new(50, 60));
        assert_eq!(
            roi,
            Some(Roi {
                top_left: Point::new(20, 20),
                bottom_right: Point::new(100, 120),
            })
        );
        assert_eq!(frame.drag_rect(), Rect::new(10, 10, 40, 50));
    }

    #[test]
    fn reversed_drag_reports_normalised_roi() {
        let mut frame = frame_with_content(200, 100);
        frame.set_image(&pattern(400, 200, 0));
        frame.on_pointer_press(Point::new(50, 60));
        frame.on_pointer_move(Point::new(10, 10));
        let roi = frame.on_pointer_release(Point::new(10, 10));
        assert_eq!(
            roi,
            Some(Roi {
                top_left: Point::new(20, 20),
                bottom_right: Point::new(100, 120),
            })
        );
    }

    #[test]
    fn release_outside_is_clamped_to_last_pixel() {
        let mut frame = frame_with_content(200, 100);
        frame.set_image(&pattern(200, 100, 0));
        frame.on_pointer_press(Point::new(10, 10));
        let roi = frame.on_pointer_release(Point::new(900, -40));
        assert_eq!(
            roi,
            Some(Roi {
                top_left: Point::new(10, 0),
                bottom_right: Point::new(199, 10),
            })
        );
    }

    #[test]
    fn mapping_ignores_letterbox_padding() {
        // A 2:1 image in a frame pinned to 200x200 content is drawn into the
        // top 200x100, yet the mapping still stretches over all 200x200.
        let mut frame = frame_with_content(200, 200);
        frame.set_content_fixed_size(Size::new(200, 200));
        frame.set_image(&pattern(400, 200, 0));
        let mut scene = Scene::new();
        frame.paint(&mut scene);
        assert_eq!(frame.content_rect().size(), Size::new(200, 200));
        assert!(matches!(
            scene.ops[0],
            PaintOp::Image { target, .. } if target == Rect::new(0, 0, 200, 100)
        ));
        assert_eq!(frame.to_image_coordinates(Point::new(100, 100)), Point::new(200, 100));
    }

    #[test]
    fn outline_survives_repaint_after_release() {
        let mut frame = frame_with_content(200, 100);
        frame.on_pointer_press(Point::new(5, 5));
        frame.on_pointer_move(Point::new(25, 35));
        frame.on_pointer_release(Point::new(25, 35));
        let mut scene = Scene::new();
        frame.paint(&mut scene);
        assert_eq!(scene.outline(), Some(Rect::new(5, 5, 20, 30)));
    }

    #[test]
    fn snapshot_matches_input_and_is_independent() {
        let mut frame = RatioFrame::default();
        let first = pattern(8, 6, 7);
        frame.set_image(&first);
        let snapshot = frame.image_snapshot();
        frame.set_image(&pattern(8, 6, 99));
        assert_eq!(snapshot.as_ref(), Some(&first));
    }

    #[test]
    fn concurrent_producers_never_tear_the_buffer() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::{Duration, Instant};

        let frame = RatioFrame::default();
        let stop = Arc::new(AtomicBool::new(false));
        let producers: Vec<_> = (0..4u8)
            .map(|seed| {
                let feed = frame.feed();
                let stop = Arc::clone(&stop);
                std::thread::spawn(move || {
                    let image = RgbaImage::from_pixel(32, 24, image::Rgba([seed, seed, seed, 255]));
                    while !stop.load(Ordering::Relaxed) {
                        feed.set_image(&image);
                    }
                })
            })
            .collect();

        // Keep reading while the producers are still writing.
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut checked = 0;
        while checked < 500 && Instant::now() < deadline {
            if let Some(snapshot) = frame.image_snapshot() {
                let first = *snapshot.get_pixel(0, 0);
                assert!(snapshot.pixels().all(|p| *p == first));
                checked += 1;
            }
        }
        stop.store(true, Ordering::Relaxed);

        for producer in producers {
            producer.join().unwrap();
        }
        assert_eq!(checked, 500);
        let last = frame.image_snapshot().unwrap();
        let first = *last.get_pixel(0, 0);
        assert!(last.pixels().all(|p| *p == first));
    }
}
