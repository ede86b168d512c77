// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

use crate::app::surface::Rgba;

/// Ratio used until the first image arrives.
pub const DEFAULT_ASPECT_RATIO: (u32, u32) = (4, 3);

/// Border drawn around the content area, in pixels.
pub const DEFAULT_BORDER: i32 = 1;

/// Initial content size of a new frame (matches the default ratio).
pub const DEFAULT_CONTENT_SIZE: (i32, i32) = (640, 480);

/// Largest outer size a frame may take unless constrained.
pub const MAX_FRAME_EXTENT: i32 = 16_777_215;

/// Outline colour of the drag rectangle.
pub const ACCENT_COLOR: Rgba = Rgba::new(0, 255, 255, 255);

/// Placeholder gradient start (top-left corner).
pub const GRADIENT_START: Rgba = Rgba::new(255, 255, 255, 255);

/// Placeholder gradient end (bottom-right corner).
pub const GRADIENT_END: Rgba = Rgba::new(0, 0, 0, 255);

/// Interval at which the GUI drains the redraw queue.
pub const REDRAW_POLL_MS: u64 = 16;

/// Default frame rate of the demo test pattern.
pub const PATTERN_FPS: u32 = 30;
