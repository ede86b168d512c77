// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/frame/redraw.rs
//
// Single-slot coalescing redraw queue between producers and the UI loop.

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Create a connected sender/receiver pair.
///
/// The channel holds at most one pending request; further requests made
/// before the UI drains it collapse into that one.
pub fn redraw_queue() -> (RedrawSender, RedrawReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (RedrawSender { tx }, RedrawReceiver { rx })
}

/// Producer side, cheap to clone and usable from any thread.
#[derive(Debug, Clone)]
pub struct RedrawSender {
    tx: mpsc::Sender<()>,
}

impl RedrawSender {
    /// Ask for a repaint. Returns immediately.
    pub fn request(&self) {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Closed(())) => {
                log::debug!("redraw requested after the UI loop went away");
            }
        }
    }
}

/// UI side, drained by the event loop.
#[derive(Debug)]
pub struct RedrawReceiver {
    rx: mpsc::Receiver<()>,
}

impl RedrawReceiver {
    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
        }
    }
}
