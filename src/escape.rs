// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time classifier.

use num::Complex;

use crate::planes::ComplexPoint;

/// This is our classic iterator function.  Starting at zero, it
/// applies `z <- z^2 + c` until `z` leaves the circle of radius two or
/// `max_iterations` have been spent, and returns how many steps that
/// took.  A result equal to `max_iterations` means the point never
/// escaped and is drawn as part of the set.
pub fn escape_time(c: &ComplexPoint, max_iterations: usize) -> usize {
    let mut z: ComplexPoint = Complex::new(0.0, 0.0);
    let mut iterations = 0;
    while iterations < max_iterations && z.norm_sqr() < 4.0 {
        z = z * z + c;
        iterations += 1;
    }
    iterations
}

/// True when `c` escaped before the iteration budget ran out.
pub fn escapes(c: &ComplexPoint, max_iterations: usize) -> bool {
    escape_time(c, max_iterations) < max_iterations
}
