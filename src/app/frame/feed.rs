// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/frame/feed.rs
//
// Shared image slot and the producer-side handle that pushes frames into it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::RgbaImage;

use super::redraw::RedrawSender;
use crate::domain::Size;

/// An image held by the frame, tagged with the store that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameImage {
    pub pixels: RgbaImage,
    /// Increases with every store into the slot.
    pub generation: u64,
}

impl FrameImage {
    /// Pixel dimensions, saturated into `i32`.
    pub fn size(&self) -> Size {
        let (w, h) = self.pixels.dimensions();
        Size::new(
            i32::try_from(w).unwrap_or(i32::MAX),
            i32::try_from(h).unwrap_or(i32::MAX),
        )
    }
}

/// The single piece of state shared between producer threads and the UI.
#[derive(Debug, Default)]
pub(crate) struct ImageSlot {
    image: Mutex<Option<FrameImage>>,
    generation: AtomicU64,
}

impl ImageSlot {
    /// Lock the slot. A poisoned lock is recovered: stores only ever swap a
    /// complete image in, so the content is never torn.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Option<FrameImage>> {
        self.image.lock().unwrap_or_else(|poisoned| {
            log::warn!("image slot lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Store a copy of `pixels` and return its generation.
    pub(crate) fn store(&self, pixels: &RgbaImage) -> u64 {
        // Copy before locking so the critical section is a move.
        let pixels = pixels.clone();
        let mut slot = self.lock();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        *slot = Some(FrameImage { pixels, generation });
        generation
    }

    pub(crate) fn snapshot(&self) -> Option<RgbaImage> {
        self.lock().as_ref().map(|image| image.pixels.clone())
    }
}

/// Cloneable, thread-safe handle for pushing frames into a
/// [`RatioFrame`](super::RatioFrame) from a producer thread.
#[derive(Debug, Clone)]
pub struct ImageFeed {
    slot: Arc<ImageSlot>,
    redraw: RedrawSender,
}

impl ImageFeed {
    pub(crate) fn new(slot: Arc<ImageSlot>, redraw: RedrawSender) -> Self {
        Self { slot, redraw }
    }

    /// Replace the displayed image with a copy of `image` and request a
    /// repaint. Never blocks on painting beyond the copy hand-off.
    ///
    /// The frame adopts the image's aspect ratio on the UI thread.
    pub fn set_image(&self, image: &RgbaImage) {
        let generation = self.slot.store(image);
        log::trace!(
            "feed stored {}x{} image, generation {generation}",
            image.width(),
            image.height()
        );
        self.redraw.request();
    }

    /// Independent copy of the current image.
    pub fn image_snapshot(&self) -> Option<RgbaImage> {
        self.slot.snapshot()
    }
}
