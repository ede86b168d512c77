// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Toolkit-independent value types.

pub mod aspect;
pub mod geometry;
pub mod roi;

pub use aspect::{AspectRatio, gcd};
pub use geometry::{Point, Rect, Size};
pub use roi::{Roi, to_image_coordinates};
