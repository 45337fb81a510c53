//! Live preview of the canvas as it assembles
//!
//! The render worker and the preview display communicate over a single
//! unbounded channel. The worker is the sole producer and must never stall
//! on the display, so sends are fire-and-forget: a closed or absent window
//! just drops frames. The display polls at a fixed rate and drains at most
//! one message per tick; intermediate snapshots it never saw are simply
//! superseded, which is fine because only the latest canvas matters.

use crate::io::configuration::PREVIEW_FPS;
use crate::io::error::{RenderError, Result};
use image::imageops::FilterType;
use image::{RgbImage, imageops};
use minifb::{Key, Window, WindowOptions};
use std::sync::mpsc;

/// One message from the render worker to the display
pub enum PreviewMessage {
    /// A full snapshot of the canvas so far
    Frame(RgbImage),
    /// Terminal sentinel: the render is finished
    Close,
}

/// Producer half of the preview channel, held by the render worker
pub struct PreviewSender {
    tx: mpsc::Sender<PreviewMessage>,
}

impl PreviewSender {
    /// Send a snapshot of the canvas so far
    ///
    /// Clones the canvas so the worker can keep mutating its own copy.
    /// Never blocks and never fails; if the display is gone the frame is
    /// silently dropped.
    pub fn send_frame(&self, canvas: &RgbImage) {
        let _ = self.tx.send(PreviewMessage::Frame(canvas.clone()));
    }

    /// Send the terminal sentinel
    pub fn close(&self) {
        let _ = self.tx.send(PreviewMessage::Close);
    }
}

/// Consumer half of the preview channel: a polling window
pub struct PreviewWindow {
    rx: mpsc::Receiver<PreviewMessage>,
    width: usize,
    height: usize,
}

/// Create a connected sender/window pair for the given preview size
pub fn channel(width: usize, height: usize) -> (PreviewSender, PreviewWindow) {
    let (tx, rx) = mpsc::channel();
    (
        PreviewSender { tx },
        PreviewWindow { rx, width, height },
    )
}

impl PreviewWindow {
    /// Drain at most one pending message without blocking
    ///
    /// `None` covers both an empty queue (the normal steady state between
    /// ticks) and a disconnected producer.
    pub fn poll(&self) -> Option<PreviewMessage> {
        self.rx.try_recv().ok()
    }

    /// Open the window and block running the display loop
    ///
    /// Shows `initial` until the first snapshot arrives, then one received
    /// frame per tick, resized to the preview size. Returns when the Close
    /// sentinel arrives, the producer disconnects, or the user closes the
    /// window or presses Escape; a user close never aborts the render.
    ///
    /// # Errors
    ///
    /// Returns `Preview` when the window cannot be created or updated.
    pub fn run(self, initial: &RgbImage) -> Result<()> {
        let mut window = Window::new(
            "paratile preview",
            self.width,
            self.height,
            WindowOptions::default(),
        )
        .map_err(|e| RenderError::Preview {
            reason: e.to_string(),
        })?;
        window.set_target_fps(PREVIEW_FPS);

        let mut buffer = encode_frame(initial, self.width, self.height);
        while window.is_open() && !window.is_key_down(Key::Escape) {
            match self.rx.try_recv() {
                Ok(PreviewMessage::Frame(frame)) => {
                    buffer = encode_frame(&frame, self.width, self.height);
                }
                Ok(PreviewMessage::Close) | Err(mpsc::TryRecvError::Disconnected) => break,
                // An empty queue is the normal steady state between ticks
                Err(mpsc::TryRecvError::Empty) => {}
            }

            window
                .update_with_buffer(&buffer, self.width, self.height)
                .map_err(|e| RenderError::Preview {
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }
}

/// Resize a canvas snapshot to the preview size and pack it as 0RGB
pub fn encode_frame(frame: &RgbImage, width: usize, height: usize) -> Vec<u32> {
    let resized = if frame.dimensions() == (width as u32, height as u32) {
        frame.clone()
    } else {
        imageops::resize(frame, width as u32, height as u32, FilterType::Triangle)
    };
    resized
        .pixels()
        .map(|pixel| {
            (u32::from(pixel[0]) << 16) | (u32::from(pixel[1]) << 8) | u32::from(pixel[2])
        })
        .collect()
}
