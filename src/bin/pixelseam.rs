// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use anyhow::{bail, Context};
use clap::{App, Arg, ArgMatches};
use pixelseam::parallel::available_workers;
use pixelseam::{
    load_image, save_energy_image, save_image, CarveConfig, CarveMode, SeamCarver, SequentialEnergy,
    DEFAULT_QUALITY,
};
use std::path::PathBuf;

/// Type holding command line arguments.
#[derive(Debug)]
struct Args {
    config: CarveConfig,
    input: PathBuf,
    output: PathBuf,
    energy: Option<PathBuf>,
    quality: u8,
}

fn main() -> anyhow::Result<()> {
    let workers = available_workers().to_string();
    let quality = DEFAULT_QUALITY.to_string();
    let matches = App::new("pixelseam")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Narrow an image by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image; the extension picks the format")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .short("s")
                .long("seams")
                .value_name("N")
                .required(true)
                .help("Number of columns to remove"),
        )
        .arg(
            Arg::with_name("batch")
                .short("b")
                .long("batch")
                .value_name("K")
                .help("Remove up to K seams per energy pass (faster, approximate)"),
        )
        .arg(
            Arg::with_name("workers")
                .short("j")
                .long("workers")
                .value_name("N")
                .default_value(&workers)
                .help("Threads for the energy pass in batch mode"),
        )
        .arg(
            Arg::with_name("quality")
                .short("q")
                .long("quality")
                .value_name("Q")
                .default_value(&quality)
                .help("JPEG quality, 1-100"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("PATH")
                .help("Also write the input's energy map as a graymap"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Multiple levels of verbosity (up to -vvvv)"),
        )
        .get_matches();

    stderrlog::new()
        .quiet(false)
        .verbosity(matches.occurrences_of("verbose") as usize)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .init()
        .context("Failed to initialize log verbosity")?;

    run(get_args(&matches)?)
}

/// Retrieve the program arguments from clap matches.
fn get_args(matches: &ArgMatches) -> anyhow::Result<Args> {
    let number = |name: &str| -> anyhow::Result<u32> {
        let value = matches.value_of(name).unwrap_or_default();
        value
            .parse()
            .with_context(|| format!("--{} expects a whole number, not {:?}", name, value))
    };

    let mode = match matches.value_of("batch") {
        None => CarveMode::Single,
        Some(_) => match number("batch")? {
            0 => bail!("--batch must be at least 1"),
            k => CarveMode::Batch(k),
        },
    };
    let quality = number("quality")?;
    if !(1..=100).contains(&quality) {
        bail!("--quality must be between 1 and 100, not {}", quality);
    }

    Ok(Args {
        config: CarveConfig {
            seams: number("seams")?,
            mode,
            workers: (number("workers")? as usize).max(1),
        },
        input: PathBuf::from(matches.value_of_os("input").unwrap_or_default()),
        output: PathBuf::from(matches.value_of_os("output").unwrap_or_default()),
        energy: matches.value_of_os("energy").map(PathBuf::from),
        quality: quality as u8,
    })
}

/// Load, carve, save.
fn run(args: Args) -> anyhow::Result<()> {
    let image = load_image(&args.input)?;
    let mut carver = SeamCarver::new(image);

    if let Some(path) = &args.energy {
        let energy = carver.compute_energy(&SequentialEnergy);
        save_energy_image(energy, path)?;
    }

    let now = std::time::Instant::now();
    carver
        .carve(&args.config)
        .with_context(|| format!("Cannot remove {} seams from {}", args.config.seams, args.input.display()))?;
    log::info!("Carving took {:.1} s", now.elapsed().as_secs_f32());

    save_image(carver.image(), &args.output, args.quality)?;
    Ok(())
}
