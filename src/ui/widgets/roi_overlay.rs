// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/roi_overlay.rs
//
// Overlay widget: frame border, placeholder gradient, ROI outline and pointer
// input for a ratio frame.

use std::f32::consts::FRAC_PI_2;

use cosmic::{
    Element, Renderer,
    iced::{
        Background, Border, Color, Length, Point, Radians, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            layout::{Limits, Node},
            renderer::{Quad, Renderer as QuadRenderer},
            widget::{Tree, tree},
        },
        event::{Event, Status},
        gradient::Linear,
        mouse::{self, Button, Cursor},
    },
};

use crate::app::surface::Rgba;
use crate::domain;
use crate::ui::AppMessage;

const FRAME_COLOR: Color = Color::from_rgb(0.5, 0.5, 0.5);
const OUTLINE_WIDTH: f32 = 1.0;

/// Pointer position seen during the current drag, kept in the widget tree
/// because the overlay itself is rebuilt on every view.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct PointerTrack {
    last: Option<domain::Point>,
}

impl PointerTrack {
    fn record(&mut self, at: domain::Point) {
        self.last = Some(at);
    }

    /// Where to report a release: the cursor if it is known, otherwise the
    /// last press or move position. Clears the track.
    fn release(&mut self, cursor: Option<domain::Point>) -> Option<domain::Point> {
        let at = cursor.or(self.last);
        self.last = None;
        at
    }
}

pub struct RoiOverlay {
    /// Size last reported to the frame as available.
    available: domain::Size,
    outer: domain::Size,
    border: i32,
    gradient: Option<(domain::Rect, Rgba, Rgba)>,
    outline: Option<(domain::Rect, Rgba)>,
    dragging: bool,
}

impl RoiOverlay {
    pub fn new(
        available: domain::Size,
        outer: domain::Size,
        border: i32,
        gradient: Option<(domain::Rect, Rgba, Rgba)>,
        outline: Option<(domain::Rect, Rgba)>,
        dragging: bool,
    ) -> Self {
        Self {
            available,
            outer,
            border,
            gradient,
            outline,
            dragging,
        }
    }

    fn draw_frame_border(&self, renderer: &mut Renderer, bounds: Rectangle) {
        if self.border <= 0 {
            return;
        }
        draw_outline(
            renderer,
            offset(bounds, domain::Rect::from_size(self.outer)),
            FRAME_COLOR,
            self.border as f32,
        );
    }

    fn draw_placeholder(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let Some((target, start, end)) = self.gradient else {
            return;
        };
        if target.is_empty() {
            return;
        }

        // Angle measured from "upwards", so this points at the bottom-right corner.
        let angle = FRAC_PI_2 + (target.height as f32 / target.width as f32).atan();
        let gradient = Linear::new(Radians(angle))
            .add_stop(0.0, to_color(start))
            .add_stop(1.0, to_color(end));

        renderer.fill_quad(
            Quad {
                bounds: offset(bounds, target),
                ..Quad::default()
            },
            Background::Gradient(gradient.into()),
        );
    }

    fn draw_roi(&self, renderer: &mut Renderer, bounds: Rectangle) {
        let Some((rect, color)) = self.outline else {
            return;
        };
        // The outline spans both corner pixels.
        let mut covered = offset(bounds, rect);
        covered.width += OUTLINE_WIDTH;
        covered.height += OUTLINE_WIDTH;
        draw_outline(renderer, covered, to_color(color), OUTLINE_WIDTH);
    }

    fn report_resize(&self, bounds: Rectangle, shell: &mut Shell<'_, AppMessage>) {
        #[allow(clippy::cast_possible_truncation)]
        let size = domain::Size::new(bounds.width as i32, bounds.height as i32);
        if size != self.available {
            shell.publish(AppMessage::FrameResized(size));
        }
    }
}

impl Widget<AppMessage, cosmic::Theme, Renderer> for RoiOverlay {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<PointerTrack>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(PointerTrack::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        Node::new(limits.max())
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced::advanced::renderer::Style,
        layout: Layout<'_>,
        _cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        self.draw_placeholder(renderer, bounds);
        self.draw_frame_border(renderer, bounds);
        self.draw_roi(renderer, bounds);
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, AppMessage>,
        _viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();
        self.report_resize(bounds, shell);
        let track = tree.state.downcast_mut::<PointerTrack>();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    let local = to_local(pos);
                    track.record(local);
                    shell.publish(AppMessage::PointerPressed(local));
                    self.dragging = true;
                    return Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                // Keep tracking outside the bounds; the frame clamps.
                if self.dragging {
                    let local = to_local(Point::new(position.x - bounds.x, position.y - bounds.y));
                    track.record(local);
                    shell.publish(AppMessage::PointerMoved(local));
                    return Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(Button::Left)) => {
                if self.dragging {
                    let cursor = cursor
                        .position()
                        .map(|p| to_local(Point::new(p.x - bounds.x, p.y - bounds.y)));
                    self.dragging = false;
                    if let Some(local) = track.release(cursor) {
                        shell.publish(AppMessage::PointerReleased(local));
                    }
                    return Status::Captured;
                }
            }
            _ => {}
        }

        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if self.dragging || cursor.is_over(layout.bounds()) {
            return mouse::Interaction::Crosshair;
        }

        mouse::Interaction::None
    }
}

impl<'a> From<RoiOverlay> for Element<'a, AppMessage> {
    fn from(widget: RoiOverlay) -> Self {
        Element::new(widget)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_local(p: Point) -> domain::Point {
    domain::Point::new(p.x.floor() as i32, p.y.floor() as i32)
}

/// Widget-local rectangle to screen space.
fn offset(bounds: Rectangle, rect: domain::Rect) -> Rectangle {
    Rectangle::new(
        Point::new(bounds.x + rect.x as f32, bounds.y + rect.y as f32),
        Size::new(rect.width as f32, rect.height as f32),
    )
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, f32::from(c.a) / 255.0)
}

fn draw_outline(renderer: &mut Renderer, bounds: Rectangle, color: Color, width: f32) {
    renderer.fill_quad(
        Quad {
            bounds,
            border: Border {
                color,
                width,
                ..Border::default()
            },
            ..Quad::default()
        },
        Color::TRANSPARENT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_prefers_the_live_cursor() {
        let mut track = PointerTrack::default();
        track.record(domain::Point::new(10, 10));
        let at = track.release(Some(domain::Point::new(40, 30)));
        assert_eq!(at, Some(domain::Point::new(40, 30)));
        assert_eq!(track, PointerTrack::default());
    }

    #[test]
    fn release_without_cursor_uses_last_move() {
        let mut track = PointerTrack::default();
        track.record(domain::Point::new(10, 10));
        track.record(domain::Point::new(55, 70));
        assert_eq!(track.release(None), Some(domain::Point::new(55, 70)));
        assert_eq!(track.release(None), None);
    }
}
