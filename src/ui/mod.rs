// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// libcosmic host for the ratio frame.

pub mod app;
pub mod message;
pub mod view;
pub mod widgets;

pub use app::{Flags, RoiviewApp};
pub use message::AppMessage;
