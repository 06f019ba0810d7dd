// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A reusable two-dimensional scratch grid
//!
//! Every intermediate product of carving (the energy map, the
//! cumulative cost map, the backtrace pointers, the deletion mask) is
//! one of these.  Each is allocated once at the size of the original
//! image and then *reshaped* to the shrinking width on every pass, so
//! a run never reallocates.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    cells: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Allocate a map of the given size, filled with `P::default()`.
    /// The allocation is the upper bound for any later `reshape`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            cells: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map from existing row-major values.
    ///
    /// # Panics
    ///
    /// If `cells` does not hold exactly `width * height` values.
    pub fn from_vec(width: u32, height: u32, cells: Vec<P>) -> Self {
        assert_eq!(cells.len(), width as usize * height as usize);
        TwoDimensionalMap {
            width,
            height,
            cells,
        }
    }

    /// Change the logical shape, keeping the allocation.  Contents
    /// are not preserved in any meaningful layout.
    ///
    /// # Panics
    ///
    /// If the new shape does not fit the original allocation.
    pub fn reshape(&mut self, width: u32, height: u32) {
        assert!(
            width as usize * height as usize <= self.cells.len(),
            "cannot reshape a map to {}x{} beyond its allocation",
            width,
            height
        );
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The live cells, row-major.
    pub fn as_slice(&self) -> &[P] {
        &self.cells[..self.len()]
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        let len = self.len();
        &mut self.cells[..len]
    }

    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    pub fn fill(&mut self, value: P) {
        for cell in self.as_mut_slice() {
            *cell = value;
        }
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        debug_assert!(x < self.width && y < self.height);
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        debug_assert!(x < self.width && y < self.height);
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshape_readdresses_without_reallocating() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(4, 2);
        let base = map.as_slice().as_ptr();
        map.reshape(3, 2);
        map[(2, 1)] = 7;
        assert_eq!(map.as_slice().len(), 6);
        assert_eq!(map.as_slice()[5], 7);
        assert_eq!(map.row(1), &[0, 0, 7]);
        assert_eq!(map.as_slice().as_ptr(), base);
    }

    #[test]
    #[should_panic]
    fn reshape_cannot_grow() {
        let mut map: TwoDimensionalMap<u8> = TwoDimensionalMap::new(2, 2);
        map.reshape(3, 2);
    }

    #[test]
    fn fill_touches_only_live_cells() {
        let mut map = TwoDimensionalMap::from_vec(3, 1, vec![false; 3]);
        map.reshape(2, 1);
        map.fill(true);
        map.reshape(3, 1);
        assert_eq!(map.as_slice(), &[true, true, false]);
    }
}
