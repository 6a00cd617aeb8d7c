#[macro_use]
extern crate log;

use sampler2d::app::*;
use sampler2d::density_sampler::*;
use sampler2d::fileutil::*;
use sampler2d::geometry::*;
use sampler2d::rng::*;
use sampler2d::sampling::*;
use sampler2d::stats::*;
use std::process::ExitCode;
use std::time::Instant;

#[cfg(all(feature = "dhat-rs", feature = "jemalloc"))]
compile_error!("feature 'dhat-rs' and feature 'jemalloc' cannot be enabled at the same time");

#[cfg(feature = "dhat-rs")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "dhat-rs")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

fn main() -> ExitCode {
    #[cfg(feature = "dhat-rs")]
    let _dhat = Dhat::start_heap_profiling();

    // Initialize `env_logger`.
    env_logger::init();

    match run(options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Options) -> Result<(), String> {
    // Load the density or use a uniform grid.
    let density = match opts.density.as_ref() {
        Some(path) => read_float_file(path)?,
        None => {
            let n = Point2u::new(opts.width, opts.height)
                .area()
                .ok_or_else(|| format!("Grid {}x{} is too large.", opts.width, opts.height))?;
            vec![1.0; n]
        }
    };

    // The sampler only supplies the tables; `draw_samples` seeds one stream
    // per chunk from `seed`.
    let seed = opts.seed.unwrap_or_else(time_seed);
    let rng = RNG::with_seed(seed, 0);
    let sampler = if opts.strict {
        DensitySampler::try_with_rng(opts.width, opts.height, &density, rng).map_err(|e| e.to_string())?
    } else {
        DensitySampler::with_rng(opts.width, opts.height, &density, rng)
    };
    let resolution = sampler.resolution();
    info!("Sampling {}x{} density with seed {seed}", resolution.x, resolution.y);

    // Draw the samples.
    let n_samples = opts.n_samples;
    let progress = create_progress_bar(n_samples as u64, opts.quiet);
    progress.set_message("Sampling");

    let start = Instant::now();
    let samples = draw_samples(sampler.distribution(), n_samples, opts.threads(), seed, &progress);
    let elapsed = start.elapsed().as_secs_f64();
    progress.finish_with_message("Sampling complete");

    info!(
        "Computed {n_samples} samples in {elapsed} seconds ({} samples/sec).",
        n_samples as f64 / elapsed.max(f64::EPSILON)
    );

    if opts.histogram {
        report_histogram(sampler.distribution(), &samples);
    }

    write_samples_file(opts.outfile.as_deref(), &samples)
}

/// Logs how well the samples follow the density.
///
/// * `distribution` - The sampled distribution.
/// * `samples`      - The samples.
fn report_histogram(distribution: &Distribution2D, samples: &[Point2f]) {
    let Point2 { x: nx, y: ny } = distribution.resolution();
    let hist = Histogram2D::from_samples(nx, ny, samples);

    let non_empty = (0..ny)
        .flat_map(|y| (0..nx).map(move |x| (x, y)))
        .filter(|&(x, y)| distribution.cell_probability(x, y) > 0.0)
        .count();
    let chi2 = hist.chi_squared(|x, y| distribution.cell_probability(x, y) as f64);

    info!(
        "Histogram {nx}x{ny}: chi-squared {chi2:.3} with {} degrees of freedom, {} samples outside.",
        non_empty.saturating_sub(1),
        hist.outside()
    );
}
