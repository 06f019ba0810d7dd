// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remove several seams from one snapshot of the energy map
//!
//! Finding k seams one at a time costs k full energy and cost passes.
//! Here the cost map and backtrace pointers are built once, and up to
//! k seams are pulled out of that single table: each starts at the
//! cheapest bottom-row cell not already claimed by this batch, and is
//! traced up the unchanged pointers.  Every pixel a seam visits is
//! flagged in a deletion mask, and each row is then compacted once.
//!
//! This is an approximation, and deliberately so.  Because nothing is
//! recomputed between extractions, two seams starting in different
//! bottom columns can converge on the same pixel higher up.  The mask
//! records that pixel once, so such a row loses fewer pixels than the
//! batch removed seams.  The image still shrinks by the number of
//! seams extracted; in a row where seams merged, the surplus pixels
//! end up past the new logical width and go stale with the rest.

use crate::energy::Energy;
use crate::error::CarveError;
use crate::pixelbuffer::{PixelBuffer, CHANNELS};
use crate::seamfinder::{step, SeamFinder};
use crate::twodmap::TwoDimensionalMap;

/// Holds the deletion mask between batches, and how many seams the
/// last `select` flagged in it.
#[derive(Debug, Clone)]
pub struct BatchSeamFinder {
    mask: TwoDimensionalMap<bool>,
    selected: u32,
}

impl BatchSeamFinder {
    /// Scratch space for images up to `width` by `height`.
    pub fn new(width: u32, height: u32) -> Self {
        BatchSeamFinder {
            mask: TwoDimensionalMap::new(width, height),
            selected: 0,
        }
    }

    /// Pixels flagged for removal by the last `select`.
    pub fn mask(&self) -> &TwoDimensionalMap<bool> {
        &self.mask
    }

    /// Seams flagged by the last `select` and not yet removed.
    pub fn selected(&self) -> u32 {
        self.selected
    }

    /// Run the forward pass over `energy` once, then flag up to
    /// `seams` seams for removal.  Never claims every column: at
    /// least one is always left standing.  Returns how many seams
    /// were flagged, which is fewer than asked when the eligible
    /// bottom-row columns run out.
    pub fn select(
        &mut self,
        finder: &mut SeamFinder,
        energy: &TwoDimensionalMap<Energy>,
        seams: u32,
    ) -> Result<u32, CarveError> {
        finder.accumulate(energy)?;
        let (width, height) = (energy.width(), energy.height());
        self.mask.reshape(width, height);
        self.mask.fill(false);
        self.selected = 0;

        let bottom = height - 1;
        let limit = seams.min(width - 1);
        let mut selected = 0;
        while selected < limit {
            // The bottom cell of every extracted seam is its own, so
            // the mask's last row is exactly the set of claimed columns.
            let start = {
                let cumulative = finder.cumulative().row(bottom);
                let claimed = self.mask.row(bottom);
                cumulative
                    .iter()
                    .zip(claimed)
                    .enumerate()
                    .filter(|(_, (_, taken))| !**taken)
                    .min_by_key(|(_, (cost, _))| **cost)
                    .map(|(x, _)| x as u32)
            };
            let mut x = match start {
                Some(x) => x,
                None => break,
            };

            for y in (0..height).rev() {
                self.mask[(x, y)] = true;
                if y > 0 {
                    x = step(x, finder.backtrace()[(x, y)]);
                }
            }
            selected += 1;
        }
        self.selected = selected;
        Ok(selected)
    }

    /// Compact every row of `image` over the pixels flagged by the
    /// last `select`, then shrink the logical width by the number of
    /// seams that `select` flagged.  The selection is spent afterwards.
    pub fn remove_selected(&mut self, image: &mut PixelBuffer) -> Result<(), CarveError> {
        let (width, height) = image.dimensions();
        if (self.mask.width(), self.mask.height()) != (width, height) {
            return Err(CarveError::MaskMismatch {
                mask_width: self.mask.width(),
                mask_height: self.mask.height(),
                width,
                height,
            });
        }
        let selected = self.selected;
        if selected == 0 {
            return Ok(());
        }
        if selected >= width {
            return Err(CarveError::ImageTooSmall { width, height });
        }

        for y in 0..height {
            let marks = self.mask.row(y);
            let row = image.row_mut(y);
            let mut write = 0;
            for (x, _) in marks.iter().enumerate().filter(|(_, m)| !**m) {
                if write != x {
                    row.copy_within(x * CHANNELS..(x + 1) * CHANNELS, write * CHANNELS);
                }
                write += 1;
            }
        }
        image.shrink_width(selected)?;
        self.selected = 0;
        Ok(())
    }
}
