//! FockCore Benchmark Suite

use fockcore::{
    displacement_tensor, hermite_tensor, interferometer_tensor, normalized_hermite_tensor,
    single_mode_squeezer_tensor, two_mode_squeezer_tensor, HermiteTensor, Result, Variant,
};

use ndarray::{Array1, Array2};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct BenchmarkRecord {
    variant: Variant,
    dim: usize,
    resolution: usize,
    entries: usize,
    mean_us: f64,
}

/// Random symmetric coupling matrix with N(0, 0.3) entries.
fn random_coupling(dim: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    let normal = Normal::new(0.0, 0.3).unwrap();

    let mut r = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in i..dim {
            let v = normal.sample(&mut rng);
            r[[i, j]] = v;
            r[[j, i]] = v;
        }
    }
    r
}

fn random_source(dim: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    let normal = Normal::new(0.0, 0.3).unwrap();
    Array1::from_shape_fn(dim, |_| normal.sample(&mut rng))
}

fn fill(variant: Variant, dim: usize, resolution: usize) -> Result<HermiteTensor<f64>> {
    let r = random_coupling(dim);
    let y = random_source(dim);
    match variant {
        Variant::Hermite => hermite_tensor(&r, &y, resolution),
        Variant::NormalizedHermite => normalized_hermite_tensor(&r, &y, resolution),
        Variant::Interferometer => interferometer_tensor(&r, resolution),
        Variant::SingleModeSqueezer => {
            let mut r = r;
            r[[0, 1]] = -r[[0, 1]].abs();
            r[[1, 0]] = r[[0, 1]];
            single_mode_squeezer_tensor(&r, resolution)
        }
        Variant::Displacement => displacement_tensor(&y, resolution),
        Variant::TwoModeSqueezer => two_mode_squeezer_tensor(&r, resolution),
    }
}

fn benchmark_variant(variant: Variant, dim: usize, resolutions: &[usize]) -> Vec<BenchmarkRecord> {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: {} (dim = {})", variant, dim);
    println!("{}", "=".repeat(60));

    let mut records = Vec::new();
    for &resolution in resolutions {
        let entries = resolution.pow(dim as u32);
        let n_iters = if entries <= 10_000 { 100 } else { 5 };

        // Warm up
        if let Err(err) = fill(variant, dim, resolution) {
            println!("  resolution {}: {}", resolution, err);
            continue;
        }

        let start = Instant::now();
        for _ in 0..n_iters {
            let _ = fill(variant, dim, resolution);
        }
        let elapsed = start.elapsed().as_secs_f64() / n_iters as f64;

        println!(
            "  resolution {:>3}: {:>10.1} μs ({} entries, {:.1} ns/entry)",
            resolution,
            elapsed * 1e6,
            entries,
            elapsed * 1e9 / entries as f64
        );

        records.push(BenchmarkRecord {
            variant,
            dim,
            resolution,
            entries,
            mean_us: elapsed * 1e6,
        });
    }
    records
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    println!("\n{}", "#".repeat(60));
    println!("#  FockCore Rust Benchmark Suite");
    println!("{}", "#".repeat(60));

    let mut records = Vec::new();
    records.extend(benchmark_variant(Variant::Hermite, 3, &[4, 8, 16, 32]));
    records.extend(benchmark_variant(Variant::NormalizedHermite, 3, &[4, 8, 16, 32]));
    records.extend(benchmark_variant(Variant::Interferometer, 4, &[4, 8, 12, 16]));
    records.extend(benchmark_variant(Variant::SingleModeSqueezer, 2, &[16, 64, 256]));
    records.extend(benchmark_variant(Variant::Displacement, 2, &[16, 64, 256]));
    records.extend(benchmark_variant(Variant::TwoModeSqueezer, 4, &[4, 8, 12, 16]));

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK COMPLETE");
    println!("{}", "=".repeat(60));

    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("failed to serialize results: {}", err),
    }
}
