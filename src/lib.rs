// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Aspect-ratio locked live image frame with a drag-to-select region of
// interest.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
#[cfg(feature = "gui")]
pub mod ui;

pub use app::{ImageFeed, RatioFrame};
pub use config::FrameConfig;
pub use domain::{AspectRatio, Point, Rect, Roi, Size};
