// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/view.rs
//
// Turn a ratio frame paint pass into libcosmic elements.

use cosmic::Element;
use cosmic::iced::{ContentFit, Length, Padding};
use cosmic::iced_widget::stack;
use cosmic::widget::container;
use cosmic::widget::image::Image;

use super::widgets::RoiOverlay;
use crate::app::frame::{FrameImage, RatioFrame};
use crate::app::surface::{Rgba, Surface};
use crate::domain::{Rect, Size};
use crate::ui::AppMessage;

/// Re-export the image handle type for use by the view.
pub type ImageHandle = cosmic::iced::widget::image::Handle;

/// Create an iced image handle from a frame image.
pub fn create_image_handle(image: &FrameImage) -> ImageHandle {
    let (w, h) = image.pixels.dimensions();
    ImageHandle::from_rgba(w, h, image.pixels.as_raw().clone())
}

/// Paint target that keeps the last pass in a form the view can render.
///
/// The image handle is rebuilt only when a new generation is painted.
#[derive(Default)]
pub struct FrameView {
    handle: Option<(u64, ImageHandle)>,
    image_target: Option<Rect>,
    gradient: Option<(Rect, Rgba, Rgba)>,
    outline: Option<(Rect, Rgba)>,
}

impl FrameView {
    /// Repaint `frame` into this view.
    pub fn repaint(&mut self, frame: &mut RatioFrame) {
        self.image_target = None;
        self.gradient = None;
        self.outline = None;
        frame.paint(self);
    }
}

impl Surface for FrameView {
    fn draw_image(&mut self, target: Rect, image: &FrameImage) {
        let stale = self
            .handle
            .as_ref()
            .is_none_or(|(generation, _)| *generation != image.generation);
        if stale {
            self.handle = Some((image.generation, create_image_handle(image)));
        }
        self.image_target = Some(target);
    }

    fn fill_gradient(&mut self, target: Rect, start: Rgba, end: Rgba) {
        self.gradient = Some((target, start, end));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.outline = Some((rect, color));
    }
}

/// Render the frame area: the stretched image underneath, the overlay on top.
pub fn view<'a>(
    frame_view: &'a FrameView,
    frame: &RatioFrame,
    available: Size,
) -> Element<'a, AppMessage> {
    let overlay = RoiOverlay::new(
        available,
        frame.outer_size(),
        frame.border(),
        frame_view.gradient,
        frame_view.outline,
        frame.is_dragging(),
    );

    match (&frame_view.handle, frame_view.image_target) {
        (Some((_, handle)), Some(target)) if !target.is_empty() => {
            let image = Image::new(handle.clone())
                .content_fit(ContentFit::Fill)
                .width(Length::Fixed(target.width as f32))
                .height(Length::Fixed(target.height as f32));

            let placed = container(image)
                .padding(Padding {
                    top: target.y as f32,
                    right: 0.0,
                    bottom: 0.0,
                    left: target.x as f32,
                })
                .width(Length::Fill)
                .height(Length::Fill);

            stack![placed, overlay].into()
        }
        _ => container(overlay)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    }
}
