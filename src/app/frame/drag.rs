// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/frame/drag.rs
//
// Pointer drag state machine for the ROI overlay.

use crate::domain::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Button held; `press` is not shown until the pointer moves.
    Dragging { press: Point },
}

/// Drag state in widget-local pixels.
///
/// `anchor` and `end` outlive the drag and describe the rectangle that stays
/// on screen until the next drag replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub phase: DragPhase,
    pub anchor: Point,
    pub end: Point,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn press(&mut self, at: Point) {
        self.phase = DragPhase::Dragging { press: at };
    }

    /// Follow the pointer. Returns `true` when the visible rectangle changed.
    pub fn update(&mut self, at: Point, content: Size) -> bool {
        let DragPhase::Dragging { press } = self.phase else {
            return false;
        };
        let before = (self.anchor, self.end);
        self.anchor = press;
        self.end = clamp_to_content(at, content);
        before != (self.anchor, self.end)
    }

    /// Finish the drag.
    ///
    /// Returns the committed `(anchor, end)` corners, or `None` when the
    /// pointer came back on the press point's row or column. Either way the
    /// state is idle afterwards.
    pub fn release(&mut self, at: Point, content: Size) -> Option<(Point, Point)> {
        let DragPhase::Dragging { press } = self.phase else {
            return None;
        };
        self.phase = DragPhase::Idle;

        if at.x == press.x || at.y == press.y {
            return None;
        }

        self.anchor = press;
        self.end = clamp_to_content(at, content);
        Some((self.anchor, self.end))
    }

    /// The rectangle to outline, normalised.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.anchor, self.end)
    }
}

/// Pin a point to the valid pixel indices of a content area of size `content`.
pub fn clamp_to_content(p: Point, content: Size) -> Point {
    Point::new(
        p.x.clamp(0, (content.width - 1).max(0)),
        p.y.clamp(0, (content.height - 1).max(0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: Size = Size::new(200, 100);

    #[test]
    fn press_alone_shows_nothing() {
        let mut drag = DragState::default();
        drag.press(Point::new(10, 10));
        assert!(drag.is_dragging());
        assert_eq!(drag.rect(), Rect::default());
    }

    #[test]
    fn move_commits_anchor_and_clamps() {
        let mut drag = DragState::default();
        drag.press(Point::new(10, 10));
        assert!(drag.update(Point::new(500, -20), CONTENT));
        assert_eq!(drag.anchor, Point::new(10, 10));
        assert_eq!(drag.end, Point::new(199, 0));
        assert!(!drag.update(Point::new(600, -1), CONTENT));
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut drag = DragState::default();
        assert!(!drag.update(Point::new(5, 5), CONTENT));
        assert_eq!(drag, DragState::default());
    }

    #[test]
    fn degenerate_release_keeps_previous_rectangle() {
        let mut drag = DragState::default();
        drag.press(Point::new(10, 10));
        drag.release(Point::new(40, 40), CONTENT);
        let shown = drag.rect();

        drag.press(Point::new(60, 60));
        assert_eq!(drag.release(Point::new(60, 90), CONTENT), None);
        assert!(!drag.is_dragging());
        assert_eq!(drag.rect(), shown);
    }

    #[test]
    fn release_without_move_commits_press_point() {
        let mut drag = DragState::default();
        drag.press(Point::new(10, 20));
        let corners = drag.release(Point::new(30, 40), CONTENT);
        assert_eq!(corners, Some((Point::new(10, 20), Point::new(30, 40))));
    }

    #[test]
    fn clamp_handles_empty_content() {
        assert_eq!(clamp_to_content(Point::new(5, -5), Size::ZERO), Point::ORIGIN);
    }
}
