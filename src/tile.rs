// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders one band of rows.  Every pixel goes pixel -> point ->
//! escape count -> colour, and lands in the band's own slice of the
//! frame.

use itertools::iproduct;
use log::trace;

use crate::buffer::Band;
use crate::escape::escape_time;
use crate::palette::colour_for;
use crate::planes::{Pixel, ViewportMapper};

/// Renders bands of the image for one fixed viewport.  It borrows
/// nothing mutable and is `Sync`, so every worker of a pass can share
/// one.
#[derive(Copy, Clone, Debug)]
pub struct TileRenderer {
    mapper: ViewportMapper,
    max_iterations: usize,
}

impl TileRenderer {
    /// A renderer for the viewport baked into `mapper`.
    pub fn new(mapper: ViewportMapper, max_iterations: usize) -> Self {
        TileRenderer {
            mapper,
            max_iterations,
        }
    }

    /// The colour of a single pixel.
    pub fn shade(&self, pixel: &Pixel) -> image::Rgb<u8> {
        let point = self.mapper.pixel_to_point(pixel);
        colour_for(escape_time(&point, self.max_iterations), self.max_iterations)
    }

    /// Fill every pixel of `band`.
    pub fn render(&self, band: &mut Band) {
        let rows = band.rows();
        trace!("band {:?} start", rows);
        for (row, column) in iproduct!(rows.clone(), 0..band.width()) {
            let pixel = Pixel(column, row);
            band.put(pixel, self.shade(&pixel));
        }
        trace!("band {:?} done", rows);
    }
}
