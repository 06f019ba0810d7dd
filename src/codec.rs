// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting pixels in and out of files
//!
//! Thin wrappers over `image`: anything it can decode comes in as
//! RGBA8; on the way out only the logical width is written, in the
//! format the destination's extension asks for.

use crate::energy::{energy_to_image, Energy};
use crate::error::CarveError;
use crate::pixelbuffer::PixelBuffer;
use crate::twodmap::TwoDimensionalMap;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// JPEG quality when none is given.
pub const DEFAULT_QUALITY: u8 = 90;

/// Decode the image at `path` into a fresh pixel buffer.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, CarveError> {
    let path = path.as_ref();
    let unreadable = |source| CarveError::UnreadableSource {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let decoded = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(unreadable)?
        .decode()
        .map_err(|source| CarveError::DecodeFailure {
            path: path.to_path_buf(),
            source,
        })?;

    let image = PixelBuffer::from_rgba_image(decoded.to_rgba8())?;
    info!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

fn create(path: &Path) -> Result<BufWriter<File>, CarveError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| CarveError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<(), CarveError> {
    writer.flush().map_err(|source| CarveError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn encode_failure(path: &Path) -> impl Fn(image::ImageError) -> CarveError + '_ {
    move |source| CarveError::EncodeFailure {
        path: path.to_path_buf(),
        source,
    }
}

// Pick the format from the extension.  Anything unknown is an
// encoding problem, not an I/O one.
fn output_format(path: &Path) -> Result<ImageFormat, CarveError> {
    ImageFormat::from_path(path).map_err(encode_failure(path))
}

/// Write the logical region of `image` to `path`.  `quality` (1-100)
/// only matters for JPEG, which also has no alpha channel to keep.
pub fn save_image<P: AsRef<Path>>(image: &PixelBuffer, path: P, quality: u8) -> Result<(), CarveError> {
    let path = path.as_ref();
    let format = output_format(path)?;
    let rgba = DynamicImage::ImageRgba8(image.to_rgba_image());
    let mut writer = create(path)?;

    if format == ImageFormat::Jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
        rgba.to_rgb8()
            .write_with_encoder(encoder)
            .map_err(encode_failure(path))?;
    } else {
        rgba.write_to(&mut writer, format).map_err(encode_failure(path))?;
    }
    finish(writer, path)?;
    info!("Saved {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

/// Write a graymap picture of an energy map to `path`.
pub fn save_energy_image<P: AsRef<Path>>(energy: &TwoDimensionalMap<Energy>, path: P) -> Result<(), CarveError> {
    let path = path.as_ref();
    let format = output_format(path)?;
    let mut writer = create(path)?;
    DynamicImage::ImageLuma8(energy_to_image(energy))
        .write_to(&mut writer, format)
        .map_err(encode_failure(path))?;
    finish(writer, path)
}
