use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use pixelseam::{
    CarveConfig, CarveMode, EnergyComputer, ParallelEnergy, PixelBuffer, SeamCarver, SequentialEnergy,
    TwoDimensionalMap,
};

fn sample(width: u32, height: u32) -> PixelBuffer {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let h = (x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503)) >> 7;
        Rgba([h as u8, (h >> 8) as u8, (x + y) as u8, 255])
    });
    PixelBuffer::from_rgba_image(image).unwrap()
}

fn energy(c: &mut Criterion) {
    let image = sample(640, 480);
    let mut map = TwoDimensionalMap::new(640, 480);
    let mut group = c.benchmark_group("energy");
    group.bench_function("sequential", |b| {
        b.iter(|| SequentialEnergy.compute_energy(black_box(&image), &mut map))
    });
    for &workers in &[2, 4, 8] {
        let computer = ParallelEnergy::new(workers);
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, _| {
            b.iter(|| computer.compute_energy(black_box(&image), &mut map))
        });
    }
    group.finish();
}

fn carving(c: &mut Criterion) {
    let image = sample(320, 240);
    let mut group = c.benchmark_group("carve 40 seams");
    group.sample_size(10);
    for &(name, mode) in &[
        ("single", CarveMode::Single),
        ("batch 10", CarveMode::Batch(10)),
        ("batch 40", CarveMode::Batch(40)),
    ] {
        let config = CarveConfig {
            seams: 40,
            mode,
            ..CarveConfig::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut carver = SeamCarver::new(image.clone());
                carver.carve(&config).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, energy, carving);
criterion_main!(benches);
