// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry.rs
//
// Integer pixel geometry shared by the frame, the surfaces and the adapters.

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow both axes by `amount` (negative values shrink).
    pub const fn expanded(self, amount: i32) -> Self {
        Self {
            width: self.width.saturating_add(amount),
            height: self.height.saturating_add(amount),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Clamp each axis independently into `[min, max]`.
    ///
    /// `min` wins when the bounds cross, like a layout engine honouring the
    /// minimum size first.
    pub fn clamped(self, min: Self, max: Self) -> Self {
        Self {
            width: self.width.min(max.width).max(min.width),
            height: self.height.min(max.height).max(min.height),
        }
    }
}

/// An axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Normalised rectangle spanning two corners (either order).
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    /// Shrink by `inset` on every side.
    pub const fn inset(&self, inset: i32) -> Self {
        Self::new(
            self.x.saturating_add(inset),
            self.y.saturating_add(inset),
            self.width.saturating_sub(inset.saturating_mul(2)),
            self.height.saturating_sub(inset.saturating_mul(2)),
        )
    }
}
