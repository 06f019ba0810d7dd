// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest top-to-bottom seam through an energy map
//!
//! A classic dynamic program.  The first row of the cumulative map is
//! the energy map's first row; every later cell is its own energy
//! plus the cheapest of the (up to) three cells touching it in the row
//! above, and records which of the three that was.  The seam ends at
//! the cheapest cell of the bottom row and is recovered by following
//! the recorded offsets back up.

use crate::energy::Energy;
use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;
use itertools::Itertools;

/// Cumulative cost of the cheapest path reaching a pixel.
pub type Cost = u64;

/// One column index per row, top to bottom.  Consecutive entries
/// never differ by more than one.
pub type Seam = Vec<u32>;

/// Holds the cumulative cost map and the backtrace pointers between
/// calls, so they are allocated once per image rather than once per
/// seam.
#[derive(Debug, Clone)]
pub struct SeamFinder {
    cumulative: TwoDimensionalMap<Cost>,
    backtrace: TwoDimensionalMap<i8>,
}

impl SeamFinder {
    /// Scratch space for images up to `width` by `height`.
    pub fn new(width: u32, height: u32) -> Self {
        SeamFinder {
            cumulative: TwoDimensionalMap::new(width, height),
            backtrace: TwoDimensionalMap::new(width, height),
        }
    }

    pub fn cumulative(&self) -> &TwoDimensionalMap<Cost> {
        &self.cumulative
    }

    /// The offset, -1, 0 or +1, from each pixel to its parent in the
    /// row above.  Row 0 holds no meaningful offsets.
    pub fn backtrace(&self) -> &TwoDimensionalMap<i8> {
        &self.backtrace
    }

    /// The forward pass: fill the cumulative map and the backtrace
    /// pointers for the whole of `energy`.
    pub fn accumulate(&mut self, energy: &TwoDimensionalMap<Energy>) -> Result<(), CarveError> {
        let (width, height) = (energy.width(), energy.height());
        if width < 1 || height < 1 {
            return Err(CarveError::ImageTooSmall { width, height });
        }
        self.cumulative.reshape(width, height);
        self.backtrace.reshape(width, height);

        for x in 0..width {
            self.cumulative[(x, 0)] = Cost::from(energy[(x, 0)]);
            self.backtrace[(x, 0)] = 0;
        }

        let maxwidth = width - 1;
        for y in 1..height {
            for x in 0..width {
                // Centre first; left or right only displace it when
                // strictly cheaper, so ties go centre, then left.
                let mut offset = 0i8;
                let mut best = self.cumulative[(x, y - 1)];
                if x > 0 && self.cumulative[(x - 1, y - 1)] < best {
                    offset = -1;
                    best = self.cumulative[(x - 1, y - 1)];
                }
                if x < maxwidth && self.cumulative[(x + 1, y - 1)] < best {
                    offset = 1;
                    best = self.cumulative[(x + 1, y - 1)];
                }
                self.cumulative[(x, y)] = Cost::from(energy[(x, y)]) + best;
                self.backtrace[(x, y)] = offset;
            }
        }
        Ok(())
    }

    /// Follow the backtrace pointers up from column `bottom_x` of the
    /// last row.  Only meaningful after `accumulate`.
    pub fn trace(&self, bottom_x: u32) -> Seam {
        let height = self.backtrace.height();
        let mut seam_col = bottom_x;
        // Working backwards, generate a vec of x coordinates that map
        // to the seam, reverse and return.
        (0..height)
            .rev()
            .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
                acc.push(seam_col);
                if y > 0 {
                    seam_col = step(seam_col, self.backtrace[(seam_col, y)]);
                }
                acc
            })
            .into_iter()
            .rev()
            .collect()
    }

    /// Run the forward pass over `energy` and return its cheapest
    /// vertical seam.  Among equally cheap bottom cells the leftmost
    /// wins.
    pub fn find_vertical_seam(&mut self, energy: &TwoDimensionalMap<Energy>) -> Result<Seam, CarveError> {
        self.accumulate(energy)?;
        let bottom = self.cumulative.row(self.cumulative.height() - 1);
        let seam_col = bottom.iter().position_min().unwrap_or(0);
        Ok(self.trace(seam_col as u32))
    }
}

/// Apply a backtrace offset to a column.
#[inline]
pub(crate) fn step(x: u32, offset: i8) -> u32 {
    (i64::from(x) + i64::from(offset)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::{EnergyComputer, SequentialEnergy};
    use crate::pixelbuffer::PixelBuffer;

    #[rustfmt::skip]
    const ENERGY_DATA: [Energy; 20] = [
        9, 9, 0, 9, 9,
        9, 1, 9, 8, 9,
        9, 9, 9, 9, 0,
        9, 9, 9, 0, 9,
    ];
    #[rustfmt::skip]
    const CUMULATIVE: [Cost; 20] = [
         9,  9,  0,  9,  9,
        18,  1,  9,  8, 18,
        10, 10, 10, 17,  8,
        19, 19, 19,  8, 17,
    ];

    fn is_connected(seam: &[u32]) -> bool {
        seam.windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energies = TwoDimensionalMap::from_vec(5, 4, ENERGY_DATA.to_vec());
        let mut finder = SeamFinder::new(5, 4);
        let seam = finder.find_vertical_seam(&energies).unwrap();
        assert_eq!(seam, [2, 3, 4, 3]);
        assert_eq!(finder.cumulative().as_slice(), &CUMULATIVE);
    }

    #[test]
    fn ties_prefer_centre_then_left() {
        // (1, 1) sees 0 to its left and 0 to its right under a 5: left
        // wins.  Nothing else is as cheap as going through it.
        let energies = TwoDimensionalMap::from_vec(3, 2, vec![0, 5, 0, 9, 0, 9]);
        let mut finder = SeamFinder::new(3, 3);
        assert_eq!(finder.find_vertical_seam(&energies).unwrap(), [0, 1]);
        assert_eq!(finder.backtrace()[(1, 1)], -1);

        // A flat map: the leftmost bottom cell, straight up.
        let flat = TwoDimensionalMap::from_vec(3, 3, vec![0; 9]);
        assert_eq!(finder.find_vertical_seam(&flat).unwrap(), [0, 0, 0]);
        assert!(finder.backtrace().as_slice()[3..].iter().all(|o| *o == 0));
    }

    #[test]
    fn no_wraparound_at_the_edges() {
        // The cheap cell in the top-right corner is out of reach of
        // column 0, and vice versa.
        let energies = TwoDimensionalMap::from_vec(4, 2, vec![5, 5, 5, 0, 0, 9, 9, 9]);
        let mut finder = SeamFinder::new(4, 2);
        let seam = finder.find_vertical_seam(&energies).unwrap();
        assert_eq!(seam, [0, 0]);
        assert_eq!(finder.cumulative().row(1), &[5, 14, 9, 9]);
    }

    #[test]
    fn empty_maps_are_too_small() {
        let mut finder = SeamFinder::new(3, 3);
        let mut energies: TwoDimensionalMap<Energy> = TwoDimensionalMap::new(3, 3);
        energies.reshape(0, 3);
        assert!(matches!(
            finder.find_vertical_seam(&energies),
            Err(CarveError::ImageTooSmall { width: 0, height: 3 })
        ));
        let flat: TwoDimensionalMap<Energy> = TwoDimensionalMap::new(3, 0);
        assert!(matches!(
            finder.find_vertical_seam(&flat),
            Err(CarveError::ImageTooSmall { .. })
        ));
    }

    #[test]
    fn single_rows_and_columns() {
        let mut finder = SeamFinder::new(4, 4);
        let row = TwoDimensionalMap::from_vec(4, 1, vec![3, 1, 1, 2]);
        assert_eq!(finder.find_vertical_seam(&row).unwrap(), [1]);
        let column = TwoDimensionalMap::from_vec(1, 4, vec![3, 1, 1, 2]);
        assert_eq!(finder.find_vertical_seam(&column).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn seams_are_connected_and_repeatable() {
        let (width, height) = (31u32, 24u32);
        let raw = (0..width * height)
            .flat_map(|i| {
                let h = i.wrapping_mul(2_246_822_519).rotate_left(13);
                vec![h as u8, (h >> 8) as u8, (h >> 16) as u8, 255]
            })
            .collect();
        let image = PixelBuffer::new(raw, width as usize * 4, width, height).unwrap();

        let mut energy = TwoDimensionalMap::new(width, height);
        let mut finder = SeamFinder::new(width, height);
        SequentialEnergy.compute_energy(&image, &mut energy);
        let first = finder.find_vertical_seam(&energy).unwrap();
        let first_costs = finder.cumulative().as_slice().to_vec();

        SequentialEnergy.compute_energy(&image, &mut energy);
        let second = finder.find_vertical_seam(&energy).unwrap();

        assert_eq!(first.len(), height as usize);
        assert!(is_connected(&first));
        assert!(first.iter().all(|x| *x < width));
        assert_eq!(first, second);
        assert_eq!(first_costs, finder.cumulative().as_slice());
    }

    #[test]
    fn stripe_image_seam_runs_down_the_background() {
        // Uniform background, bright stripe in column 2 of a 4x3 image.
        // Energy is [0, 172800, 0, 172800] on every row, and the
        // flanking columns can always step sideways onto a free
        // column, so they never accumulate more than one row's worth.
        // Columns 0 and 2 tie at zero cost and the leftmost is taken.
        let raw = (0..12)
            .flat_map(|i| if i % 4 == 2 { vec![250, 250, 250, 255] } else { vec![10, 10, 10, 255] })
            .collect();
        let image = PixelBuffer::new(raw, 16, 4, 3).unwrap();
        let mut energy = TwoDimensionalMap::new(4, 3);
        let mut finder = SeamFinder::new(4, 3);
        SequentialEnergy.compute_energy(&image, &mut energy);
        assert_eq!(finder.find_vertical_seam(&energy).unwrap(), [0, 0, 0]);
        assert_eq!(finder.cumulative().row(2), &[0, 172_800, 0, 172_800]);
    }
}
