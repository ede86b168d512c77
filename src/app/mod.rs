// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Toolkit-independent widget model, paint targets and demo feed.

pub mod frame;
pub mod pattern;
pub mod surface;

pub use frame::{FrameImage, ImageFeed, RatioFrame};
pub use surface::{Canvas, PaintOp, Rgba, Scene, Surface};
