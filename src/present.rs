// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The hand-off between the render loop and whoever shows the
//! pictures.  The controller owns the back buffer that passes write
//! into; only after a pass has been joined does it hand that buffer
//! to a `Presenter`.  The display never sees a frame in progress.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::buffer::PixelBuffer;
use crate::planes::ViewportState;

/// Receives each completed frame, once, in order.
pub trait Presenter: Send {
    /// Show `frame`, which was rendered for `viewport`.  The borrow
    /// ends when this returns; copy out whatever needs to outlive it.
    fn present(&mut self, frame: &PixelBuffer, viewport: &ViewportState);
}

impl<F> Presenter for F
where
    F: FnMut(&PixelBuffer, &ViewportState) + Send,
{
    fn present(&mut self, frame: &PixelBuffer, viewport: &ViewportState) {
        self(frame, viewport)
    }
}

/// The last completed frame and the viewport it shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// The pixels.
    pub pixels: PixelBuffer,
    /// Where they were rendered.
    pub viewport: ViewportState,
}

/// A shared slot holding the most recent completed frame.  The render
/// side publishes into it, the display side reads from it; cloning the
/// handle shares the slot.
#[derive(Clone, Debug, Default)]
pub struct FrontBuffer {
    slot: Arc<Mutex<Option<Frame>>>,
}

impl FrontBuffer {
    /// An empty slot.
    pub fn new() -> Self {
        FrontBuffer::default()
    }

    // A panicking reader cannot leave a frame half-copied, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Option<Frame>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current frame with a copy of `pixels`.
    pub fn publish(&self, pixels: &PixelBuffer, viewport: &ViewportState) {
        let mut slot = self.lock();
        match *slot {
            Some(ref mut frame) => {
                frame.pixels.clone_from(pixels);
                frame.viewport = *viewport;
            }
            None => {
                *slot = Some(Frame {
                    pixels: pixels.clone(),
                    viewport: *viewport,
                })
            }
        }
    }

    /// Run `f` against the current frame, if there is one.
    pub fn with_latest<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&Frame) -> T,
    {
        self.lock().as_ref().map(f)
    }

    /// A copy of the current frame.
    pub fn latest(&self) -> Option<Frame> {
        self.with_latest(Frame::clone)
    }
}

impl Presenter for FrontBuffer {
    fn present(&mut self, frame: &PixelBuffer, viewport: &ViewportState) {
        self.publish(frame, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    #[test]
    fn empty_until_published() {
        let front = FrontBuffer::new();
        assert!(front.latest().is_none());
    }

    #[test]
    fn clones_share_the_slot() {
        let front = FrontBuffer::new();
        let mut writer = front.clone();
        let vp = ViewportState::new(2.0, Complex::new(0.5, 0.0));
        writer.present(&PixelBuffer::new(2, 2), &vp);
        let frame = front.latest().unwrap();
        assert_eq!(frame.viewport, vp);
        assert_eq!(frame.pixels.width(), 2);
    }

    #[test]
    fn later_frames_replace_earlier_ones() {
        let front = FrontBuffer::new();
        front.publish(&PixelBuffer::new(1, 1), &ViewportState::default());
        let vp = ViewportState::new(4.0, Complex::new(0.0, 0.0));
        front.publish(&PixelBuffer::new(3, 1), &vp);
        assert_eq!(front.with_latest(|f| (f.pixels.width(), f.viewport.zoom)), Some((3, 4.0)));
    }

    #[test]
    fn closures_present() {
        let mut seen = Vec::new();
        {
            let mut p = |_: &PixelBuffer, vp: &ViewportState| seen.push(vp.zoom);
            p.present(&PixelBuffer::new(1, 1), &ViewportState::default());
        }
        assert_eq!(seen, vec![1.0]);
    }
}
