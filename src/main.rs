// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Entry point: open the demo window, or render a headless snapshot.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use roiview::FrameConfig;
use roiview::app::pattern;
use roiview::app::{Canvas, RatioFrame};
use roiview::constant::PATTERN_FPS;
use roiview::domain::Size;

/// Live image frame with drag-to-select regions of interest.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Width of the test pattern in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Height of the test pattern in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Border thickness around the image, in pixels.
    #[arg(long, default_value_t = 1)]
    pub border: i32,

    /// Frames per second pushed by the test pattern.
    #[arg(long, default_value_t = PATTERN_FPS)]
    pub fps: u32,

    /// Render one frame into this PNG instead of opening a window.
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            border: self.border,
            ..FrameConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match &args.snapshot {
        Some(path) => snapshot(&args, path),
        None => run_gui(&args),
    }
}

/// Paint a single pattern frame through a software canvas and save it.
fn snapshot(args: &Args, path: &Path) -> anyhow::Result<()> {
    let mut frame = RatioFrame::new(&args.frame_config());
    pattern::spawn(frame.feed(), args.width, args.height, args.fps, Some(1))
        .join()
        .map_err(|_| anyhow::anyhow!("test pattern thread panicked"))?;
    frame.sync();

    let content = Size::new(
        i32::try_from(args.width).context("Pattern width out of range")?,
        i32::try_from(args.height).context("Pattern height out of range")?,
    );
    frame.resize(content.expanded(frame.border().saturating_mul(2)));

    let mut canvas = Canvas::new(frame.outer_size());
    frame.paint(&mut canvas);

    canvas
        .into_pixels()
        .save(path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    log::info!("snapshot written to {}", path.display());
    Ok(())
}

#[cfg(feature = "gui")]
fn run_gui(args: &Args) -> anyhow::Result<()> {
    use roiview::ui::{Flags, RoiviewApp};

    let flags = Flags {
        frame: args.frame_config(),
        pattern_size: (args.width, args.height),
        fps: args.fps,
    };
    cosmic::app::run::<RoiviewApp>(cosmic::app::Settings::default(), flags)
        .context("Failed to run the COSMIC application")
}

#[cfg(not(feature = "gui"))]
fn run_gui(_args: &Args) -> anyhow::Result<()> {
    anyhow::bail!("built without the `gui` feature; use --snapshot PATH")
}
