// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/message.rs
//
// Application messages: pointer input, layout changes and redraw polling.

use crate::domain::{Point, Size};

#[derive(Debug, Clone)]
pub enum AppMessage {
    // Redraw queue polling.
    Tick,

    // Layout.
    FrameResized(Size),

    // Pointer input, widget-local pixels.
    PointerPressed(Point),
    PointerMoved(Point),
    PointerReleased(Point),
}
