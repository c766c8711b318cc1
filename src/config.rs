// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixed constants for both front ends, and the two small records
//! that carry them around: `RenderConfig` for what a frame looks like
//! and `RedrawSettings` for how the interactive controller paces its
//! redraws.

use std::time::Duration;

use crate::errors::{MandelError, Result};

/// Width of the still image.
pub const STILL_WIDTH: usize = 800;
/// Height of the still image.
pub const STILL_HEIGHT: usize = 600;
/// Iteration bound for the still image.
pub const STILL_MAX_ITERATIONS: usize = 1000;
/// The still image shows -2..2 on the real axis at zoom 1.
pub const STILL_HALF_EXTENT: f64 = 2.0;

/// Width of the explorer window.
pub const WINDOW_WIDTH: usize = 1280;
/// Height of the explorer window.
pub const WINDOW_HEIGHT: usize = 800;
/// Iteration bound for the explorer.
pub const WINDOW_MAX_ITERATIONS: usize = 1000;
/// The explorer shows -1..1 on the real axis at zoom 1.
pub const WINDOW_HALF_EXTENT: f64 = 1.0;

/// How long input has to be quiet before the explorer redraws.
pub const DEBOUNCE: Duration = Duration::from_secs(1);
/// Distance one pan event moves the centre, at zoom 1.
pub const PAN_STEP: f64 = 0.1;
/// Multiplier applied to the zoom by one zoom event.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Describes a frame: its size, how hard to look at each pixel, how
/// many threads to split it across, and how much of the plane a zoom
/// of one covers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iterations before a point is declared inside the set.
    pub max_iterations: usize,
    /// Number of row bands, and so of worker threads, per pass.
    pub threads: usize,
    /// Half the width of the plane visible at zoom 1.
    pub half_extent: f64,
}

impl RenderConfig {
    /// The single-frame export defaults.
    pub fn still() -> Self {
        RenderConfig {
            width: STILL_WIDTH,
            height: STILL_HEIGHT,
            max_iterations: STILL_MAX_ITERATIONS,
            threads: num_cpus::get(),
            half_extent: STILL_HALF_EXTENT,
        }
    }

    /// The interactive explorer defaults.
    pub fn window() -> Self {
        RenderConfig {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            max_iterations: WINDOW_MAX_ITERATIONS,
            threads: num_cpus::get(),
            half_extent: WINDOW_HALF_EXTENT,
        }
    }

    /// Replace the image size.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replace the worker count.  Zero is treated as one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Rejects frames with no pixels in them.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MandelError::EmptyImage(self.width, self.height));
        }
        Ok(())
    }
}

/// How the controller reacts to input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RedrawSettings {
    /// Quiet period required after the last input before a redraw.
    pub debounce: Duration,
    /// Plane distance one pan moves, divided by the current zoom.
    pub pan_step: f64,
    /// Factor one zoom event multiplies or divides by.
    pub zoom_factor: f64,
}

impl Default for RedrawSettings {
    fn default() -> Self {
        RedrawSettings {
            debounce: DEBOUNCE,
            pan_step: PAN_STEP,
            zoom_factor: ZOOM_FACTOR,
        }
    }
}

impl RedrawSettings {
    /// Replace the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
