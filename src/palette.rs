// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one colour law we know.  Each channel is a Bernstein-style
//! polynomial in `t = iterations / max_iterations`, so both the fast
//! escapers at `t = 0` and the points inside the set at `t = 1` come
//! out black, and the colour blooms along the boundary.

use num::clamp;

/// A pixel colour, red, green and blue.
pub type Rgb = image::Rgb<u8>;

/// Black, for convenience.
pub const BLACK: Rgb = image::Rgb([0, 0, 0]);

// Truncate toward zero and saturate at the ends of a byte rather
// than wrapping.
#[inline]
fn clamp_byte(v: f64) -> u8 {
    clamp(v, 0.0, 255.0) as u8
}

/// Convert an escape count into a colour.
pub fn colour_for(iterations: usize, max_iterations: usize) -> Rgb {
    if max_iterations == 0 {
        return BLACK;
    }
    let t = (iterations as f64) / (max_iterations as f64);
    let u = 1.0 - t;
    image::Rgb([
        clamp_byte(9.0 * u * t * t * t * 255.0),
        clamp_byte(15.0 * u * u * t * t * 255.0),
        clamp_byte(8.5 * u * u * u * t * 255.0),
    ])
}
