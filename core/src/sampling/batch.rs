//! Batch sampling across worker threads.

use crate::common::*;
use crate::geometry::*;
use crate::rng::*;
use crate::sampling::Distribution2D;
use indicatif::ProgressBar;
use std::thread;

/// Number of samples drawn from one random stream.
pub const CHUNK_SIZE: usize = 4096;

/// Draws `n_samples` points from a distribution using `n_threads` workers.
///
/// Chunk `i` of `CHUNK_SIZE` samples is drawn from `RNG::with_seed(seed, i)`,
/// so the result depends only on `seed` and not on the number of threads.
///
/// * `distribution` - The distribution to sample.
/// * `n_samples`    - Number of samples.
/// * `n_threads`    - Number of worker threads.
/// * `seed`         - Seed shared by all random streams.
/// * `progress`     - Progress bar advanced by the number of samples drawn.
pub fn draw_samples(
    distribution: &Distribution2D,
    n_samples: usize,
    n_threads: usize,
    seed: u64,
    progress: &ProgressBar,
) -> Vec<Point2f> {
    let mut samples = vec![Point2f::zero(); n_samples];
    if n_samples == 0 {
        return samples;
    }

    let n_chunks = (n_samples + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let n_threads = clamp(n_threads, 1, n_chunks);
    debug!("Drawing {n_samples} samples in {n_chunks} chunks on {n_threads} threads");

    thread::scope(|scope| {
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<(usize, &mut [Point2f])>(n_threads);

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            scope.spawn(move || {
                for (chunk_index, chunk) in rx_worker.iter() {
                    let mut rng = RNG::with_seed(seed, chunk_index as u64);
                    fill_chunk(distribution, &mut rng, chunk);
                    progress.inc(chunk.len() as u64);
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.

        // Send work.
        for work in samples.chunks_mut(CHUNK_SIZE).enumerate() {
            if tx_worker.send(work).is_err() {
                error!("Sample workers exited early");
                break;
            }
        }
    });

    samples
}

/// Fills a slice with samples drawn sequentially from one random source.
///
/// * `distribution` - The distribution to sample.
/// * `rng`          - The random source.
/// * `chunk`        - Output samples.
fn fill_chunk<R: UniformSource>(distribution: &Distribution2D, rng: &mut R, chunk: &mut [Point2f]) {
    for p in chunk.iter_mut() {
        let uy = rng.uniform_float();
        let ux = rng.uniform_float();
        *p = distribution.sample_continuous(&Point2f::new(ux, uy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution() -> Distribution2D {
        Distribution2D::from_rows(&[vec![1.0, 0.0, 2.0], vec![0.5, 4.0, 0.0]])
    }

    #[test]
    fn zero_samples() {
        let samples = draw_samples(&distribution(), 0, 4, 1, &ProgressBar::hidden());
        assert!(samples.is_empty());
    }

    #[test]
    fn draws_requested_count() {
        let n = 3 * CHUNK_SIZE + 17;
        let samples = draw_samples(&distribution(), n, 2, 9, &ProgressBar::hidden());
        assert_eq!(samples.len(), n);
        assert!(samples.iter().all(|p| p.in_unit_square()));
    }

    #[test]
    fn result_independent_of_thread_count() {
        let d = distribution();
        let n = 5 * CHUNK_SIZE + 3;
        let one = draw_samples(&d, n, 1, 1234, &ProgressBar::hidden());
        let many = draw_samples(&d, n, 8, 1234, &ProgressBar::hidden());
        assert_eq!(one, many);
    }

    #[test]
    fn seeds_differ() {
        let d = distribution();
        let a = draw_samples(&d, 100, 1, 1, &ProgressBar::hidden());
        let b = draw_samples(&d, 100, 1, 2, &ProgressBar::hidden());
        assert_ne!(a, b);
    }

    #[test]
    fn first_chunk_matches_sequential_stream() {
        let d = distribution();
        let samples = draw_samples(&d, 10, 3, 77, &ProgressBar::hidden());

        let mut expected = vec![Point2f::zero(); 10];
        fill_chunk(&d, &mut RNG::with_seed(77, 0), &mut expected);
        assert_eq!(samples, expected);
    }

    #[test]
    fn progress_counts_samples() {
        let progress = ProgressBar::hidden();
        let _ = draw_samples(&distribution(), CHUNK_SIZE + 1, 2, 5, &progress);
        assert_eq!(progress.position(), CHUNK_SIZE as u64 + 1);
    }
}
