// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes finished frames to disk.  The format follows the file
//! extension.

use std::path::Path;

use image::{ColorType, ImageFormat};
use log::info;

use crate::buffer::PixelBuffer;
use crate::errors::{MandelError, Result};

/// The raster formats we can write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Portable Network Graphics.
    Png,
    /// Windows bitmap, 24 bits per pixel.
    Bmp,
    /// Binary portable pixmap.
    Ppm,
}

impl ExportFormat {
    /// Pick a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "bmp" => Ok(ExportFormat::Bmp),
            "ppm" => Ok(ExportFormat::Ppm),
            _ => Err(MandelError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Bmp => ImageFormat::Bmp,
            ExportFormat::Ppm => ImageFormat::Pnm,
        }
    }
}

/// Encode `pixels` into `path`.
pub fn write_image<P: AsRef<Path>>(path: P, pixels: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    image::save_buffer_with_format(
        path,
        pixels.as_raw(),
        pixels.width() as u32,
        pixels.height() as u32,
        ColorType::Rgb8,
        format.image_format(),
    )
    .map_err(|cause| MandelError::Export {
        path: path.display().to_string(),
        cause,
    })?;
    info!("wrote {:?} to {}", format, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::Pixel;
    use std::path::PathBuf;

    #[test]
    fn format_follows_extension() {
        let f = |s: &str| ExportFormat::from_path(&PathBuf::from(s));
        assert_eq!(f("a.png").unwrap(), ExportFormat::Png);
        assert_eq!(f("a.PNG").unwrap(), ExportFormat::Png);
        assert_eq!(f("dir/b.bmp").unwrap(), ExportFormat::Bmp);
        assert_eq!(f("c.ppm").unwrap(), ExportFormat::Ppm);
        assert!(f("d.gif").is_err());
        assert!(f("noext").is_err());
    }

    #[test]
    fn written_files_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = PixelBuffer::new(3, 2);
        {
            let mut bands = buf.bands_mut(&[0..2]);
            bands[0].put(Pixel(2, 1), image::Rgb([200, 100, 50]));
        }
        for name in &["f.png", "f.bmp", "f.ppm"] {
            let path = dir.path().join(name);
            write_image(&path, &buf).unwrap();
            let back = image::open(&path).unwrap().to_rgb8();
            assert_eq!(back.dimensions(), (3, 2));
            assert_eq!(back.get_pixel(2, 1), &image::Rgb([200, 100, 50]));
            assert_eq!(back.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn unknown_extension_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.xyz");
        assert!(write_image(&path, &PixelBuffer::new(1, 1)).is_err());
        assert!(!path.exists());
    }
}
