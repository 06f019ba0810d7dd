// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The in-place RGBA pixel store
//!
//! Carving never reallocates the image.  The physical storage and the
//! stride are fixed when the buffer is created; removing a seam only
//! slides pixels left within each row and shrinks the *logical*
//! width.  Whatever lies in a row past `width * 4` bytes is stale and
//! is never handed out by any accessor here.

use crate::error::CarveError;
use image::RgbaImage;

/// Bytes per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

#[derive(Debug, Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
    stride: usize,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap raw row-major RGBA storage.  `stride` is the number of
    /// bytes from the start of one row to the start of the next.
    pub fn new(data: Vec<u8>, stride: usize, width: u32, height: u32) -> Result<Self, CarveError> {
        if width < 1 || height < 1 {
            return Err(CarveError::ImageTooSmall { width, height });
        }
        if stride < width as usize * CHANNELS {
            return Err(CarveError::InvalidStride { stride, width });
        }
        let expected = stride * height as usize;
        if data.len() < expected {
            return Err(CarveError::BufferTooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            data,
            stride,
            width,
            height,
        })
    }

    /// Take ownership of a decoded image; its rows are tightly packed.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        PixelBuffer::new(image.into_raw(), width as usize * CHANNELS, width, height)
    }

    /// Copy the logical region out into a fresh, tightly packed image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut raw = Vec::with_capacity(self.width as usize * self.height as usize * CHANNELS);
        for y in 0..self.height {
            raw.extend_from_slice(self.row(y));
        }
        // The length is exactly width * height * 4, so this cannot fail.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The whole physical store, stale bytes included.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    fn row_start(&self, y: u32) -> usize {
        y as usize * self.stride
    }

    /// The live bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.row_start(y);
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.row_start(y);
        let end = start + self.width as usize * CHANNELS;
        &mut self.data[start..end]
    }

    /// The four channels of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height);
        let start = self.row_start(y) + x as usize * CHANNELS;
        &self.data[start..start + CHANNELS]
    }

    /// Drop `by` columns from the logical width.  Callers have
    /// already compacted the surviving pixels to the left.
    pub(crate) fn shrink_width(&mut self, by: u32) -> Result<(), CarveError> {
        if by >= self.width {
            return Err(CarveError::ImageTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        self.width -= by;
        Ok(())
    }
}
