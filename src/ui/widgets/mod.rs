// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/mod.rs
//
// Custom widgets module.

pub mod roi_overlay;

pub use roi_overlay::RoiOverlay;
