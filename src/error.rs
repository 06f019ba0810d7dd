// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarveError {
    /// The image has no pixels to work with, or the request would
    /// leave it with none.
    #[error("image of {width}x{height} is too small to carve")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("stride of {stride} bytes cannot hold a row {width} pixels wide")]
    InvalidStride { stride: usize, width: u32 },

    #[error("pixel storage holds {actual} bytes, expected at least {expected}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("seam has {actual} rows, image has {expected}")]
    SeamLength { expected: usize, actual: usize },

    #[error("seam column {column} in row {row} is outside an image {width} pixels wide")]
    InvalidSeam { row: usize, column: u32, width: u32 },

    #[error("deletion mask is {mask_width}x{mask_height}, image is {width}x{height}")]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    #[error("batch size must be at least one seam")]
    InvalidBatchSize,

    #[error("cannot read {path}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}")]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot encode {path}")]
    EncodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write {path}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
