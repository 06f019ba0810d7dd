// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the squared colour gradient across it,
//! horizontally and vertically:
//!
//! ```text
//!        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//!       e(x,y) = |Δx|²+|Δy|²
//! ```
//!
//! Neighbours that would fall off the image are clamped to the pixel
//! itself, on all four edges, so every pixel of the map is filled.
//! Alpha never contributes.
//!
//! Two engines are provided: a straightforward sequential one, and
//! one that carves the receiving map into bands of rows and fills
//! each band on its own thread.  Both run the exact same per-row
//! routine, so their output is identical.

use crate::cq;
use crate::parallel::{available_workers, for_each_row_band};
use crate::pixelbuffer::PixelBuffer;
use crate::twodmap::TwoDimensionalMap;
use image::{GrayImage, Luma};

/// Energy of a single pixel.  The largest possible value is
/// 6 * 255², comfortably inside a `u32`.
pub type Energy = u32;

/// Something that can fill an energy map from an image.
pub trait EnergyComputer {
    /// Reshape `energy` to the image's current size and overwrite
    /// every cell of it.
    fn compute_energy(&self, image: &PixelBuffer, energy: &mut TwoDimensionalMap<Energy>);
}

/// Computes the map one row after another on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialEnergy;

/// Computes the map in contiguous bands of rows, one band per worker.
#[derive(Debug, Clone, Copy)]
pub struct ParallelEnergy {
    workers: usize,
}

impl ParallelEnergy {
    pub fn new(workers: usize) -> Self {
        ParallelEnergy {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ParallelEnergy {
    fn default() -> Self {
        ParallelEnergy::new(available_workers())
    }
}

// Takes the RGB channels from two pixels, squares the difference
// between each, and sums them up.
#[inline]
fn energy_of_pair(p1: &[u8], p2: &[u8]) -> Energy {
    p1.iter()
        .zip(p2)
        .take(3)
        .map(|(c1, c2)| {
            let d = i32::from(*c1) - i32::from(*c2);
            (d * d) as Energy
        })
        .sum()
}

// Fill `out`, the energy of row `y`.  The one and only place the
// border rules live.
fn energy_of_row(image: &PixelBuffer, y: u32, out: &mut [Energy]) {
    let (width, height) = image.dimensions();
    let (mw, mh) = (width - 1, height - 1);
    let up = cq!(y == 0, y, y - 1);
    let down = cq!(y >= mh, y, y + 1);

    for (x, cell) in (0..width).zip(out.iter_mut()) {
        let left = cq!(x == 0, x, x - 1);
        let right = cq!(x >= mw, x, x + 1);
        *cell = energy_of_pair(image.pixel(left, y), image.pixel(right, y))
            + energy_of_pair(image.pixel(x, up), image.pixel(x, down));
    }
}

impl EnergyComputer for SequentialEnergy {
    fn compute_energy(&self, image: &PixelBuffer, energy: &mut TwoDimensionalMap<Energy>) {
        let width = image.width() as usize;
        energy.reshape(image.width(), image.height());
        for (y, row) in energy.as_mut_slice().chunks_mut(width).enumerate() {
            energy_of_row(image, y as u32, row);
        }
    }
}

impl EnergyComputer for ParallelEnergy {
    fn compute_energy(&self, image: &PixelBuffer, energy: &mut TwoDimensionalMap<Energy>) {
        let width = image.width() as usize;
        energy.reshape(image.width(), image.height());
        for_each_row_band(energy.as_mut_slice(), width, self.workers, |first, band| {
            for (i, row) in band.chunks_mut(width).enumerate() {
                energy_of_row(image, (first + i) as u32, row);
            }
        });
    }
}

/// Render an energy map as a graymap, scaled so that the most
/// energetic pixel is white.  A flat map stays black.
pub fn energy_to_image(energy: &TwoDimensionalMap<Energy>) -> GrayImage {
    let factor = u64::from(energy.as_slice().iter().copied().max().unwrap_or(0).max(1));
    GrayImage::from_fn(energy.width(), energy.height(), |x, y| {
        let scaled = u64::from(energy[(x, y)]) * 255 / factor;
        Luma([scaled.min(255) as u8])
    })
}
