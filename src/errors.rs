// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors for the renderer.  The arithmetic itself cannot fail; what
//! can go wrong is asking for an empty image, losing a worker thread
//! in the middle of a pass, or failing to write the finished frame.

use failure::Fail;

/// Everything that can go wrong while rendering or exporting a frame.
#[derive(Debug, Fail)]
pub enum MandelError {
    /// Either dimension of the requested image was zero.
    #[fail(display = "image dimensions must be non-zero, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// A row-band worker panicked.  The pass is abandoned and the
    /// buffer may be partially written.
    #[fail(display = "a render worker panicked; the pass was abandoned")]
    WorkerPanicked,

    /// The redraw controller thread could not be started.
    #[fail(display = "could not start the redraw thread: {}", _0)]
    Thread(#[fail(cause)] std::io::Error),

    /// The redraw controller thread died.
    #[fail(display = "the redraw controller panicked")]
    ControllerPanicked,

    /// The output path did not end in an extension we can encode.
    #[fail(display = "unsupported output format: {}", _0)]
    UnsupportedFormat(String),

    /// The encoder refused to write the frame.
    #[fail(display = "could not write {}: {}", path, cause)]
    Export {
        /// The file we were writing.
        path: String,
        /// What the encoder said.
        #[fail(cause)]
        cause: image::ImageError,
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, MandelError>;
