#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of `z <- z^2 + c`, started at zero, stays
//! bounded.  For every pixel of an image we find the matching point
//! on the plane, count how many iterations it takes that orbit to
//! leave the circle of radius two (giving up at some maximum), and
//! turn that count into a colour.  Points that never leave are the
//! black heart of the set; the colours around it record how quickly
//! their neighbours fled.
//!
//! The work is embarrassingly parallel.  A frame is cut into
//! horizontal bands of rows, each band is handed to its own thread,
//! and the frame is only considered finished once every band has
//! been joined.  The interactive explorer wraps that in a small
//! controller that owns the viewport, folds bursts of input into a
//! single pending redraw, and only renders once the burst has gone
//! quiet.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod buffer;
pub mod config;
pub mod controller;
pub mod errors;
pub mod escape;
pub mod export;
pub mod palette;
pub mod parse;
pub mod planes;
pub mod present;
pub mod scheduler;
pub mod tile;

pub use buffer::PixelBuffer;
pub use config::{RedrawSettings, RenderConfig};
pub use controller::{InputEvent, RedrawController, RedrawHandle};
pub use errors::{MandelError, Result};
pub use escape::escape_time;
pub use palette::{colour_for, Rgb};
pub use planes::{ComplexPoint, Pixel, ViewportMapper, ViewportState};
pub use present::{FrontBuffer, Presenter};
pub use scheduler::RenderScheduler;
