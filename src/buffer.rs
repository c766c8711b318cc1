// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer a render pass writes into.  It is stored as packed
//! RGB bytes, row by row, so that a band of whole rows is a single
//! contiguous slice and can be handed to a worker thread as its own
//! `&mut [u8]`.  No two bands overlap, so the workers never need a
//! lock; the only synchronisation is the join at the end of the pass.

use std::ops::Range;

use image::RgbImage;

use crate::palette::Rgb;
use crate::planes::Pixel;

const CHANNELS: usize = 3;

/// A `width` by `height` grid of colours.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// An all-black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width,
            height,
            data: vec![0 as u8; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGB bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// The colour of one pixel.
    pub fn get(&self, pixel: Pixel) -> Rgb {
        let o = (pixel.1 * self.width + pixel.0) * CHANNELS;
        image::Rgb([self.data[o], self.data[o + 1], self.data[o + 2]])
    }

    /// Cut the buffer into bands of whole rows.  `rows` must be sorted,
    /// contiguous, and start at zero; anything past the last range is
    /// left out.
    pub fn bands_mut(&mut self, rows: &[Range<usize>]) -> Vec<Band<'_>> {
        let stride = self.width * CHANNELS;
        let width = self.width;
        let mut rest: &mut [u8] = &mut self.data;
        let mut bands = Vec::with_capacity(rows.len());
        for range in rows {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * stride);
            bands.push(Band {
                rows: range.clone(),
                width,
                pixels: head,
            });
            rest = tail;
        }
        bands
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        img.copy_from_slice(&self.data);
        img
    }

    /// Expand into RGBA bytes, which is what window surfaces want.
    pub fn write_rgba(&self, frame: &mut [u8]) {
        for (rgba, rgb) in frame.chunks_exact_mut(4).zip(self.data.chunks_exact(CHANNELS)) {
            rgba[..CHANNELS].copy_from_slice(rgb);
            rgba[3] = 0xff;
        }
    }
}

/// A run of whole rows owned exclusively by one worker for the length
/// of a pass.
#[derive(Debug)]
pub struct Band<'a> {
    rows: Range<usize>,
    width: usize,
    pixels: &'a mut [u8],
}

impl<'a> Band<'a> {
    /// The image rows this band covers.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Width of every row in the band.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Set one pixel.  `pixel` is in image coordinates, so its row has
    /// to lie inside this band.
    pub fn put(&mut self, pixel: Pixel, colour: Rgb) {
        debug_assert!(self.rows.contains(&pixel.1));
        let o = ((pixel.1 - self.rows.start) * self.width + pixel.0) * CHANNELS;
        self.pixels[o..o + CHANNELS].copy_from_slice(&colour.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.as_raw().len(), 36);
        assert!(buf.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn bands_write_their_own_rows() {
        let mut buf = PixelBuffer::new(2, 4);
        {
            let mut bands = buf.bands_mut(&[0..1, 1..4]);
            assert_eq!(bands.len(), 2);
            bands[0].put(Pixel(1, 0), image::Rgb([1, 2, 3]));
            bands[1].put(Pixel(0, 3), image::Rgb([4, 5, 6]));
            bands[1].put(Pixel(1, 1), image::Rgb([7, 8, 9]));
        }
        assert_eq!(buf.get(Pixel(1, 0)), image::Rgb([1, 2, 3]));
        assert_eq!(buf.get(Pixel(0, 3)), image::Rgb([4, 5, 6]));
        assert_eq!(buf.get(Pixel(1, 1)), image::Rgb([7, 8, 9]));
        assert_eq!(buf.get(Pixel(0, 0)), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn image_and_rgba_copies_agree() {
        let mut buf = PixelBuffer::new(2, 1);
        {
            let mut bands = buf.bands_mut(&[0..1]);
            bands[0].put(Pixel(0, 0), image::Rgb([10, 20, 30]));
        }
        let img = buf.to_image();
        assert_eq!(img.get_pixel(0, 0), &image::Rgb([10, 20, 30]));

        let mut frame = vec![0u8; 8];
        buf.write_rgba(&mut frame);
        assert_eq!(frame, vec![10, 20, 30, 255, 0, 0, 0, 255]);
    }
}
