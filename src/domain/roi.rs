// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/roi.rs
//
// Region of interest in image pixel coordinates.

use std::fmt;

use super::geometry::{Point, Size};

/// A user-selected region, both corners in image pixel coordinates.
///
/// `top_left` never lies right of or below `bottom_right`, whichever way the
/// drag went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Roi {
    /// Build from two opposite corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.top_left.x, self.top_left.y, self.bottom_right.x, self.bottom_right.y
        )
    }
}

/// Map a widget-local point to image pixels assuming the image is stretched
/// over the whole content area.
///
/// No letterbox offset is applied. Integer division; an empty content area
/// maps everything to the origin.
pub fn to_image_coordinates(p: Point, image: Size, content: Size) -> Point {
    if content.is_empty() {
        return Point::ORIGIN;
    }
    let scale = |v: i32, img: i32, area: i32| -> i32 {
        // i64 keeps large frames from overflowing the product.
        let mapped = i64::from(v) * i64::from(img) / i64::from(area);
        i32::try_from(mapped).unwrap_or(if mapped < 0 { i32::MIN } else { i32::MAX })
    };
    Point::new(
        scale(p.x, image.width, content.width),
        scale(p.y, image.height, content.height),
    )
}
