// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/surface.rs
//
// Paint target abstraction plus a recording scene and a software canvas.

use image::{Rgba as PixelRgba, RgbaImage, imageops};

use super::frame::FrameImage;
use crate::domain::{Rect, Size};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear blend, `t` clamped to `[0, 1]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub const fn to_pixel(self) -> PixelRgba<u8> {
        PixelRgba([self.r, self.g, self.b, self.a])
    }
}

/// Anything a [`RatioFrame`](super::frame::RatioFrame) can paint into.
///
/// Coordinates are widget-local pixels.
pub trait Surface {
    /// Draw `image` stretched to exactly cover `target`.
    fn draw_image(&mut self, target: Rect, image: &FrameImage);

    /// Fill `target` with a diagonal gradient from its top-left to its
    /// bottom-right corner.
    fn fill_gradient(&mut self, target: Rect, start: Rgba, end: Rgba);

    /// Outline `rect` with a one pixel line, interior untouched.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba);
}

// =============================================================================
// Scene
// =============================================================================

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOp {
    Image {
        target: Rect,
        generation: u64,
        size: Size,
    },
    Gradient {
        target: Rect,
        start: Rgba,
        end: Rgba,
    },
    Outline {
        rect: Rect,
        color: Rgba,
    },
}

/// Surface that records what was drawn, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub ops: Vec<PaintOp>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outline drawn last, if any.
    pub fn outline(&self) -> Option<Rect> {
        self.ops.iter().rev().find_map(|op| match op {
            PaintOp::Outline { rect, .. } => Some(*rect),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn draw_image(&mut self, target: Rect, image: &FrameImage) {
        self.ops.push(PaintOp::Image {
            target,
            generation: image.generation,
            size: image.size(),
        });
    }

    fn fill_gradient(&mut self, target: Rect, start: Rgba, end: Rgba) {
        self.ops.push(PaintOp::Gradient { target, start, end });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(PaintOp::Outline { rect, color });
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// Software surface backed by an RGBA buffer.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Transparent canvas; non-positive sizes give an empty buffer.
    pub fn new(size: Size) -> Self {
        let width = u32::try_from(size.width).unwrap_or(0);
        let height = u32::try_from(size.height).unwrap_or(0);
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.pixels.width() && y < self.pixels.height() {
            self.pixels.put_pixel(x, y, color.to_pixel());
        }
    }
}

impl Surface for Canvas {
    fn draw_image(&mut self, target: Rect, image: &FrameImage) {
        if target.is_empty() || image.pixels.width() == 0 || image.pixels.height() == 0 {
            return;
        }
        let (Ok(width), Ok(height)) = (u32::try_from(target.width), u32::try_from(target.height))
        else {
            return;
        };
        let scaled = imageops::resize(&image.pixels, width, height, imageops::FilterType::Nearest);
        imageops::replace(
            &mut self.pixels,
            &scaled,
            i64::from(target.x),
            i64::from(target.y),
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn fill_gradient(&mut self, target: Rect, start: Rgba, end: Rgba) {
        if target.is_empty() {
            return;
        }
        // Project each pixel onto the corner-to-corner diagonal.
        let (dx, dy) = (target.width as f32, target.height as f32);
        let length_sq = dx * dx + dy * dy;
        for y in target.y..target.y + target.height {
            for x in target.x..target.x + target.width {
                let px = (x - target.x) as f32;
                let py = (y - target.y) as f32;
                let t = (px * dx + py * dy) / length_sq;
                self.put(x, y, start.lerp(end, t));
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
        for x in left..=right {
            self.put(x, top, color);
            self.put(x, bottom, color);
        }
        for y in top..=bottom {
            self.put(left, y, color);
            self.put(right, y, color);
        }
    }
}
