// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image narrowing
//!
//! Repeatedly finds the cheapest top-to-bottom path of pixels through
//! an image's gradient energy and takes it out, so that the image
//! loses width where it has the least to show.

mod ternary;

pub mod batch;
pub mod carver;
pub mod codec;
pub mod energy;
pub mod error;
pub mod parallel;
pub mod pixelbuffer;
pub mod seamfinder;
pub mod seamremover;
pub mod twodmap;

pub use batch::BatchSeamFinder;
pub use carver::{CarveConfig, CarveMode, SeamCarver};
pub use codec::{load_image, save_energy_image, save_image, DEFAULT_QUALITY};
pub use energy::{Energy, EnergyComputer, ParallelEnergy, SequentialEnergy};
pub use error::CarveError;
pub use pixelbuffer::PixelBuffer;
pub use seamfinder::{Cost, Seam, SeamFinder};
pub use seamremover::remove_vertical_seam;
pub use twodmap::TwoDimensionalMap;
