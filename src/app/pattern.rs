// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/pattern.rs
//
// Synthetic moving test pattern used to drive the frame in the demo host.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use image::{Rgba, RgbaImage};

use super::frame::ImageFeed;

/// Render frame number `tick` of the pattern: colour bars with a bright bar
/// sweeping left to right.
#[allow(clippy::cast_possible_truncation)]
pub fn render(width: u32, height: u32, tick: u64) -> RgbaImage {
    const BARS: [[u8; 3]; 7] = [
        [192, 192, 192],
        [192, 192, 0],
        [0, 192, 192],
        [0, 192, 0],
        [192, 0, 192],
        [192, 0, 0],
        [0, 0, 192],
    ];

    let sweep = if width == 0 { 0 } else { (tick % u64::from(width)) as u32 };
    let bar_width = (width / BARS.len() as u32).max(1);

    RgbaImage::from_fn(width, height, |x, _y| {
        if x.abs_diff(sweep) < 2 {
            return Rgba([255, 255, 255, 255]);
        }
        let index = ((x / bar_width) as usize).min(BARS.len() - 1);
        let [r, g, b] = BARS[index];
        Rgba([r, g, b, 255])
    })
}

/// Push pattern frames into `feed` at `fps` until `frames` have been sent
/// (or forever when `frames` is `None`).
pub fn spawn(
    feed: ImageFeed,
    width: u32,
    height: u32,
    fps: u32,
    frames: Option<u64>,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(1) / fps.max(1);
    thread::spawn(move || {
        log::info!("test pattern {width}x{height} at {fps} fps");
        let mut tick = 0;
        while frames.is_none_or(|limit| tick < limit) {
            feed.set_image(&render(width, height, tick));
            tick += 1;
            thread::sleep(interval);
        }
        log::debug!("test pattern stopped after {tick} frames");
    })
}
