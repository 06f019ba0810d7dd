// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the pipeline
//!
//! `SeamCarver` owns the image and every scratch buffer the carve
//! needs, all allocated once at the original size and reshaped as the
//! image narrows.  Each step is energy, then seam(s), then removal;
//! nothing from one step leaks into the next except the image itself.

use crate::batch::BatchSeamFinder;
use crate::energy::{Energy, EnergyComputer, ParallelEnergy, SequentialEnergy};
use crate::error::CarveError;
use crate::parallel::available_workers;
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::SeamFinder;
use crate::seamremover::remove_vertical_seam;
use crate::twodmap::TwoDimensionalMap;
use log::{debug, info};

/// How seams are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveMode {
    /// One seam per pass, energy recomputed in between.  Exact, slow.
    Single,
    /// Up to this many seams per pass from one energy snapshot,
    /// energy computed in parallel.  See `batch` for the trade-off.
    Batch(u32),
}

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarveConfig {
    /// Seams (columns) to remove in total.
    pub seams: u32,
    pub mode: CarveMode,
    /// Threads for the parallel energy pass.
    pub workers: usize,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            seams: 0,
            mode: CarveMode::Single,
            workers: available_workers(),
        }
    }
}

/// A struct for holding the image to be carved, and the scratch space
/// to carve it with.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    image: PixelBuffer,
    energy: TwoDimensionalMap<Energy>,
    finder: SeamFinder,
    batch: BatchSeamFinder,
}

impl SeamCarver {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: PixelBuffer) -> Self {
        let (width, height) = image.dimensions();
        SeamCarver {
            image,
            energy: TwoDimensionalMap::new(width, height),
            finder: SeamFinder::new(width, height),
            batch: BatchSeamFinder::new(width, height),
        }
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    /// The energy map as of the last pass.
    pub fn energy(&self) -> &TwoDimensionalMap<Energy> {
        &self.energy
    }

    /// Fill the energy map from the image as it stands.
    pub fn compute_energy(&mut self, computer: &dyn EnergyComputer) -> &TwoDimensionalMap<Energy> {
        computer.compute_energy(&self.image, &mut self.energy);
        &self.energy
    }

    /// Remove the single cheapest seam.
    pub fn carve_once(&mut self, computer: &dyn EnergyComputer) -> Result<(), CarveError> {
        let (width, height) = self.image.dimensions();
        if width <= 1 {
            return Err(CarveError::ImageTooSmall { width, height });
        }
        computer.compute_energy(&self.image, &mut self.energy);
        let seam = self.finder.find_vertical_seam(&self.energy)?;
        remove_vertical_seam(&mut self.image, &seam)
    }

    /// Remove up to `seams` seams found in one energy snapshot.
    /// Returns how many were removed.
    pub fn carve_batch(&mut self, computer: &dyn EnergyComputer, seams: u32) -> Result<u32, CarveError> {
        computer.compute_energy(&self.image, &mut self.energy);
        let selected = self.batch.select(&mut self.finder, &self.energy, seams)?;
        self.batch.remove_selected(&mut self.image)?;
        Ok(selected)
    }

    /// Carve `config.seams` columns out of the image.  Asking for as
    /// many seams as the image is wide is refused before anything is
    /// touched.  Returns the number of seams actually removed.
    pub fn carve(&mut self, config: &CarveConfig) -> Result<u32, CarveError> {
        let (width, height) = self.image.dimensions();
        if config.seams >= width {
            return Err(CarveError::ImageTooSmall { width, height });
        }
        info!(
            "Resizing from {} to {} ({:?})",
            width,
            width - config.seams,
            config.mode
        );

        let removed = match config.mode {
            CarveMode::Single => {
                for i in 0..config.seams {
                    self.carve_once(&SequentialEnergy)?;
                    debug!("Removed seam {}/{}, width {}", i + 1, config.seams, self.image.width());
                }
                config.seams
            }
            CarveMode::Batch(0) => return Err(CarveError::InvalidBatchSize),
            CarveMode::Batch(size) => {
                let computer = ParallelEnergy::new(config.workers);
                let mut removed = 0;
                while removed < config.seams {
                    let taken = self.carve_batch(&computer, size.min(config.seams - removed))?;
                    if taken == 0 {
                        break;
                    }
                    removed += taken;
                    debug!("Removed {}/{} seams, width {}", removed, config.seams, self.image.width());
                }
                removed
            }
        };

        info!("Carved {} seams, now {}x{}", removed, self.image.width(), height);
        Ok(removed)
    }
}
