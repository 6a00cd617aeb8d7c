//! Density Sampler

use crate::common::*;
use crate::error::DensityError;
use crate::geometry::*;
use crate::rng::*;
use crate::sampling::Distribution2D;
use std::iter;

/// Draws points in the unit square distributed according to a grid of
/// weights.
///
/// The row marginal and per-row conditional tables are built once in the
/// constructor and never change. Each call to `sample()` advances the owned
/// random source, so a sampler is used from one thread at a time; to sample in
/// parallel give each thread its own source (see `sampling::draw_samples`).
#[derive(Clone, Debug)]
pub struct DensitySampler<R = RNG> {
    /// Precomputed marginal and conditional tables.
    distribution: Distribution2D,

    /// Random source consumed by `sample()`.
    rng: R,
}

impl DensitySampler<RNG> {
    /// Returns a new sampler seeded from the system clock. Invalid input is
    /// logged and replaced with a uniform 1x1 grid.
    ///
    /// * `width`   - Number of columns.
    /// * `height`  - Number of rows.
    /// * `density` - Row-major weights. Doesn't have to be normalized;
    ///               negative values are set to 0.
    pub fn new(width: usize, height: usize, density: &[Float]) -> Self {
        Self::with_rng(width, height, density, RNG::from_time())
    }

    /// Returns a new sampler seeded from the system clock, or an error if the
    /// density doesn't match the grid size.
    ///
    /// * `width`   - Number of columns.
    /// * `height`  - Number of rows.
    /// * `density` - Row-major weights.
    pub fn try_new(width: usize, height: usize, density: &[Float]) -> Result<Self, DensityError> {
        Self::try_with_rng(width, height, density, RNG::from_time())
    }
}

impl<R: UniformSource> DensitySampler<R> {
    /// Returns a new sampler using the given random source. Invalid input is
    /// logged and replaced with a uniform 1x1 grid.
    ///
    /// * `width`   - Number of columns.
    /// * `height`  - Number of rows.
    /// * `density` - Row-major weights.
    /// * `rng`     - Random source.
    pub fn with_rng(width: usize, height: usize, density: &[Float], rng: R) -> Self {
        match validate(width, height, density) {
            Ok(()) => Self::build(width, height, density, rng),
            Err(err) => {
                error!("{err}; sampling the uniform distribution instead.");
                Self::build(1, 1, &[1.0], rng)
            }
        }
    }

    /// Returns a new sampler using the given random source, or an error if the
    /// density doesn't match the grid size.
    ///
    /// * `width`   - Number of columns.
    /// * `height`  - Number of rows.
    /// * `density` - Row-major weights.
    /// * `rng`     - Random source.
    pub fn try_with_rng(
        width: usize,
        height: usize,
        density: &[Float],
        rng: R,
    ) -> Result<Self, DensityError> {
        validate(width, height, density)?;
        Ok(Self::build(width, height, density, rng))
    }

    fn build(width: usize, height: usize, density: &[Float], rng: R) -> Self {
        let distribution = Distribution2D::new(width, height, density);
        debug!("Built {width}x{height} density sampler");
        Self { distribution, rng }
    }

    /// Returns the grid resolution (columns, rows). This is 1x1 if the input
    /// was replaced.
    pub fn resolution(&self) -> Point2u {
        self.distribution.resolution()
    }

    /// Returns the precomputed tables.
    pub fn distribution(&self) -> &Distribution2D {
        &self.distribution
    }

    /// Generates a sample in [0,1]x[0,1] using the inverse method, first on the
    /// row marginal and then on the selected row.
    pub fn sample(&mut self) -> Point2f {
        let uy = self.rng.uniform_float();
        let ux = self.rng.uniform_float();
        self.distribution.sample_continuous(&Point2f::new(ux, uy))
    }

    /// Returns an endless iterator of samples.
    pub fn samples(&mut self) -> impl Iterator<Item = Point2f> + '_ {
        iter::repeat_with(move || self.sample())
    }

    /// Generates `n` samples.
    ///
    /// * `n` - Number of samples.
    pub fn sample_n(&mut self, n: usize) -> Vec<Point2f> {
        self.samples().take(n).collect()
    }

    /// Return the PDF value for a point in the unit square.
    ///
    /// * `p` - Sample value.
    pub fn pdf(&self, p: &Point2f) -> Float {
        self.distribution.pdf(p)
    }
}

/// Checks that the density holds exactly `width * height` weights and is not
/// empty.
///
/// * `width`   - Number of columns.
/// * `height`  - Number of rows.
/// * `density` - Row-major weights.
fn validate(width: usize, height: usize, density: &[Float]) -> Result<(), DensityError> {
    if Point2u::new(width, height).area() != Some(density.len()) {
        Err(DensityError::SizeMismatch {
            len: density.len(),
            width,
            height,
        })
    } else if density.is_empty() {
        Err(DensityError::Empty)
    } else {
        Ok(())
    }
}
