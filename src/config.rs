// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Runtime configuration for a ratio frame. Built by the host, never persisted.

use crate::app::surface::Rgba;
use crate::constant::{
    ACCENT_COLOR, DEFAULT_BORDER, DEFAULT_CONTENT_SIZE, GRADIENT_END, GRADIENT_START,
};
use crate::domain::Size;

/// Appearance and initial geometry of a [`RatioFrame`](crate::app::frame::RatioFrame).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    /// Border thickness around the content area, in pixels.
    pub border: i32,
    /// Initial content size (excluding the border).
    pub content_size: Size,
    /// Outline colour of the drag rectangle.
    pub accent: Rgba,
    /// Placeholder gradient colour at the top-left corner.
    pub gradient_start: Rgba,
    /// Placeholder gradient colour at the bottom-right corner.
    pub gradient_end: Rgba,
}

impl Default for FrameConfig {
    fn default() -> Self {
        let (width, height) = DEFAULT_CONTENT_SIZE;
        Self {
            border: DEFAULT_BORDER,
            content_size: Size::new(width, height),
            accent: ACCENT_COLOR,
            gradient_start: GRADIENT_START,
            gradient_end: GRADIENT_END,
        }
    }
}
