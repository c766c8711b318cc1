// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fans a frame out across threads.  The image is cut into one band of
//! rows per worker, every band is rendered on its own scoped thread,
//! and the call does not return until every thread has been joined.
//! When it returns `Ok` the buffer holds a complete frame for exactly
//! the viewport it was given.

use std::ops::Range;
use std::time::Instant;

use log::debug;

use crate::buffer::{Band, PixelBuffer};
use crate::config::RenderConfig;
use crate::errors::{MandelError, Result};
use crate::planes::{ViewportMapper, ViewportState};
use crate::tile::TileRenderer;

/// Split `height` rows into `bands` contiguous runs of `height / bands`
/// rows each, the last run taking whatever is left over.  There are
/// never more bands than rows, and never fewer than one.
pub fn partition(height: usize, bands: usize) -> Vec<Range<usize>> {
    let bands = bands.max(1).min(height.max(1));
    let size = height / bands;
    (0..bands)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == bands { height } else { start + size };
            start..end
        })
        .collect()
}

// Run `work` over every band on its own thread and wait for all of
// them.  A panic on any thread fails the whole pass.
fn run_bands<F>(bands: Vec<Band>, work: F) -> Result<()>
where
    F: Fn(&mut Band) + Sync,
{
    let work = &work;
    crossbeam::scope(|spawner| {
        for mut band in bands {
            spawner.spawn(move |_| work(&mut band));
        }
    })
    .map_err(|_| MandelError::WorkerPanicked)
}

/// Renders whole frames for one fixed `RenderConfig`.
#[derive(Copy, Clone, Debug)]
pub struct RenderScheduler {
    config: RenderConfig,
}

impl RenderScheduler {
    /// Checks that the frame has pixels in it.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(RenderScheduler { config })
    }

    /// The frame description this scheduler renders.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// A blank buffer of the right size for this scheduler.
    pub fn blank(&self) -> PixelBuffer {
        PixelBuffer::new(self.config.width, self.config.height)
    }

    /// Render `viewport` into `buffer`.  The viewport is taken by value;
    /// every pixel of the pass sees the same one.  On error the buffer
    /// may hold a mix of old and new rows and should not be shown.
    pub fn render(&self, viewport: ViewportState, buffer: &mut PixelBuffer) -> Result<()> {
        let RenderConfig {
            width,
            height,
            max_iterations,
            threads,
            half_extent,
        } = self.config;
        if buffer.width() != width || buffer.height() != height {
            *buffer = self.blank();
        }

        let started = Instant::now();
        let tiles = TileRenderer::new(
            ViewportMapper::new(width, height, half_extent, viewport),
            max_iterations,
        );
        let rows = partition(height, threads);
        let bands = rows.len();
        run_bands(buffer.bands_mut(&rows), |band| tiles.render(band))?;
        debug!(
            "rendered {}x{} at zoom {} centre {} with {} bands in {:?}",
            width,
            height,
            viewport.zoom,
            viewport.center,
            bands,
            started.elapsed()
        );
        Ok(())
    }

    /// Render `viewport` into a fresh buffer.
    pub fn render_frame(&self, viewport: ViewportState) -> Result<PixelBuffer> {
        let mut buffer = self.blank();
        self.render(viewport, &mut buffer)?;
        Ok(buffer)
    }
}
