// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/app.rs
//
// COSMIC application wiring: hosts one ratio frame fed by the test pattern.

use std::thread::JoinHandle;
use std::time::Duration;

use cosmic::app::Core;
use cosmic::iced::Subscription;
use cosmic::iced::time;
use cosmic::iced::window;
use cosmic::widget::text;
use cosmic::{Action, Element, Task};

use super::message::AppMessage;
use super::view::{self, FrameView};
use crate::app::frame::RatioFrame;
use crate::app::pattern;
use crate::config::FrameConfig;
use crate::constant::REDRAW_POLL_MS;
use crate::domain::{Roi, Size};

/// Flags passed from `main` into the application.
#[derive(Debug, Clone)]
pub struct Flags {
    pub frame: FrameConfig,
    /// Test pattern size in pixels.
    pub pattern_size: (u32, u32),
    pub fps: u32,
}

/// Main application type.
pub struct RoiviewApp {
    core: Core,
    frame: RatioFrame,
    frame_view: FrameView,
    /// Space the layout currently offers the frame.
    available: Size,
    last_roi: Option<Roi>,
    _producer: JoinHandle<()>,
}

impl cosmic::Application for RoiviewApp {
    type Executor = cosmic::SingleThreadExecutor;
    type Flags = Flags;
    type Message = AppMessage;

    const APP_ID: &'static str = "org.example.Roiview";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let mut frame = RatioFrame::new(&flags.frame);
        let (width, height) = flags.pattern_size;
        let producer = pattern::spawn(frame.feed(), width, height, flags.fps, None);

        let mut frame_view = FrameView::default();
        frame_view.repaint(&mut frame);

        (
            Self {
                core,
                available: frame.outer_size(),
                frame,
                frame_view,
                last_roi: None,
                _producer: producer,
            },
            Task::none(),
        )
    }

    fn on_close_requested(&self, _id: window::Id) -> Option<Self::Message> {
        None
    }

    fn update(&mut self, message: Self::Message) -> Task<Action<Self::Message>> {
        let repaint = match message {
            AppMessage::Tick => self.frame.sync(),
            AppMessage::FrameResized(size) => {
                self.available = size;
                self.frame.resize(size);
                true
            }
            AppMessage::PointerPressed(at) => {
                self.frame.on_pointer_press(at);
                false
            }
            AppMessage::PointerMoved(at) => self.frame.on_pointer_move(at),
            AppMessage::PointerReleased(at) => {
                if let Some(roi) = self.frame.on_pointer_release(at) {
                    self.last_roi = Some(roi);
                }
                true
            }
        };

        if repaint {
            self.frame_view.repaint(&mut self.frame);
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Self::Message> {
        view::view(&self.frame_view, &self.frame, self.available)
    }

    fn footer(&self) -> Option<Element<'_, Self::Message>> {
        let label = match self.last_roi {
            Some(roi) => format!("ROI {roi} | aspect {}", self.frame.aspect_ratio()),
            None => format!("Drag to select a region | aspect {}", self.frame.aspect_ratio()),
        };
        Some(text(label).into())
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        time::every(Duration::from_millis(REDRAW_POLL_MS)).map(|_| AppMessage::Tick)
    }
}
