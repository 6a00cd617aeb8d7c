//! 2D Histogram

use crate::common::*;
use crate::geometry::*;

/// Counts sample points falling in the cells of a regular grid over the unit
/// square.
#[derive(Clone, Debug)]
pub struct Histogram2D {
    /// Number of bins (columns, rows).
    resolution: Point2u,

    /// Row-major bin counts.
    counts: Vec<u64>,

    /// Number of points outside the unit square (or NaN).
    outside: u64,
}

impl Histogram2D {
    /// Returns an empty histogram.
    ///
    /// * `nx` - Number of columns.
    /// * `ny` - Number of rows.
    pub fn new(nx: usize, ny: usize) -> Self {
        assert!(nx > 0 && ny > 0, "empty histogram {nx}x{ny}");
        Self {
            resolution: Point2u::new(nx, ny),
            counts: vec![0; nx * ny],
            outside: 0,
        }
    }

    /// Returns a histogram of the given samples.
    ///
    /// * `nx`      - Number of columns.
    /// * `ny`      - Number of rows.
    /// * `samples` - The samples.
    pub fn from_samples(nx: usize, ny: usize, samples: &[Point2f]) -> Self {
        let mut hist = Self::new(nx, ny);
        samples.iter().for_each(|p| hist.add(p));
        hist
    }

    /// Returns the number of bins (columns, rows).
    pub fn resolution(&self) -> Point2u {
        self.resolution
    }

    /// Adds a point. Points on the upper edges go into the last bin.
    ///
    /// * `p` - The point.
    pub fn add(&mut self, p: &Point2f) {
        if !p.in_unit_square() {
            self.outside += 1;
            return;
        }

        let Point2 { x: nx, y: ny } = self.resolution;
        let ix = min((p.x * nx as Float) as usize, nx - 1);
        let iy = min((p.y * ny as Float) as usize, ny - 1);
        self.counts[iy * nx + ix] += 1;
    }

    /// Returns the count of a bin.
    ///
    /// * `x` - Column index.
    /// * `y` - Row index.
    pub fn count(&self, x: usize, y: usize) -> u64 {
        assert!(x < self.resolution.x && y < self.resolution.y);
        self.counts[y * self.resolution.x + x]
    }

    /// Returns the number of points counted in bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns the number of points that fell outside the unit square.
    pub fn outside(&self) -> u64 {
        self.outside
    }

    /// Returns Pearson's chi-squared statistic of the counts against expected
    /// bin probabilities. Bins with zero probability are skipped unless they
    /// hold points, which makes the statistic infinite.
    ///
    /// * `expected` - Probability of a point landing in bin (x, y).
    pub fn chi_squared<F>(&self, expected: F) -> f64
    where
        F: Fn(usize, usize) -> f64,
    {
        let n = self.total() as f64;
        let nx = self.resolution.x;

        self.counts
            .iter()
            .enumerate()
            .map(|(i, &observed)| {
                let e = n * expected(i % nx, i / nx);
                let o = observed as f64;
                if e > 0.0 {
                    (o - e) * (o - e) / e
                } else if observed > 0 {
                    f64::INFINITY
                } else {
                    0.0
                }
            })
            .sum()
    }
}
