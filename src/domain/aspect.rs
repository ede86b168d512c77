// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/aspect.rs
//
// Reduced aspect ratio and the ratio-preserving fit computation.

use std::fmt;

use super::geometry::Rect;
use crate::constant::DEFAULT_ASPECT_RATIO;

/// Greatest common divisor, iterative Euclid.
///
/// `gcd(a, 0) == a`, so `gcd(0, 0) == 0`.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A width:height ratio kept in lowest terms.
///
/// Both components are always non-zero and coprime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        let (width, height) = DEFAULT_ASPECT_RATIO;
        Self { width, height }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl AspectRatio {
    /// Reduce a pixel size to a ratio. `None` when either side is zero.
    pub fn reduced(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let divisor = gcd(width, height);
        Some(Self {
            width: width / divisor,
            height: height / divisor,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Largest rectangle anchored at `available`'s origin that has this ratio.
    ///
    /// The proportionally larger side is shrunk and rounded half-up.
    #[allow(clippy::cast_possible_truncation)]
    pub fn fit(&self, available: Rect) -> Rect {
        if available.is_empty() {
            return Rect::new(available.x, available.y, 0, 0);
        }

        let (rw, rh) = (i64::from(self.width), i64::from(self.height));
        let (aw, ah) = (i64::from(available.width), i64::from(available.height));
        let mut fitted = available;

        if aw * rh > ah * rw {
            // too wide
            let width = f64::from(available.height) * f64::from(self.width) / f64::from(self.height);
            fitted.width = (width + 0.5) as i32;
        } else {
            // too tall
            let height = f64::from(available.width) * f64::from(self.height) / f64::from(self.width);
            fitted.height = (height + 0.5) as i32;
        }

        fitted
    }
}
