//! 1D Distribution.

use crate::common::*;

/// Represents a piecewise-constant 1D distribution as a list of normalized
/// weights and samples it with the inverse method.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Normalized weights. All zero when `total` is zero.
    func: Vec<Float>,

    /// Sum of the weights before normalization.
    total: f64,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for the given weights. Weights don't have
    /// to be normalized; negative and non-finite weights are treated as 0.
    ///
    /// - `f` - Piecewise-constant 1D function. Must not be empty.
    pub fn new(f: &[Float]) -> Self {
        assert!(!f.is_empty(), "Distribution1D needs at least one bucket");
        Self::from_weights(f.iter().map(|&w| sanitize_weight(w) as f64).collect())
    }

    /// Returns a new `Distribution1D` for weights that are already finite and
    /// non-negative. The weights are summed and normalized in `f64` so that
    /// large `Float` weights can't overflow the total.
    ///
    /// - `weights` - Non-negative weights. Must not be empty.
    pub(crate) fn from_weights(weights: Vec<f64>) -> Self {
        assert!(!weights.is_empty(), "Distribution1D needs at least one bucket");

        let total: f64 = weights.iter().sum();
        let func = if total > 0.0 {
            weights.iter().map(|&w| (w / total) as Float).collect()
        } else {
            vec![0.0; weights.len()]
        };
        Self { func, total }
    }

    /// Returns the number of buckets.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Returns the sum of the weights before normalization.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the normalized weights.
    pub fn func(&self) -> &[Float] {
        &self.func
    }

    /// Returns true if all weights were zero. Such a distribution is sampled
    /// uniformly.
    pub fn is_degenerate(&self) -> bool {
        self.total <= 0.0
    }

    /// Returns a continuous sample in [0, count] and the bucket the walk
    /// stopped at, given a uniform random value.
    ///
    /// The walk accumulates weights from the first bucket and moves on while
    /// the running total is not above `u`. The position inside the selected
    /// bucket is interpolated from how far the running total overshot `u`.
    ///
    /// - `u` - Uniform random value in [0, 1).
    pub fn sample_continuous(&self, u: Float) -> (Float, usize) {
        let n = self.count();

        if self.is_degenerate() {
            let x = clamp(u, 0.0, 1.0) * n as Float;
            return (x, min(x as usize, n - 1));
        }

        let mut offset = 0_usize;
        let mut total = self.func[0];
        while total <= u && offset < n - 1 {
            offset += 1;
            total += self.func[offset];
        }

        // Rounding can leave the walk on a trailing empty bucket when `u` is
        // close to 1; it stays selected and sits at the start of its cell.
        let w = self.func[offset];
        let du = if w > 0.0 {
            clamp((total - u) / w, 0.0, 1.0)
        } else {
            0.0
        };
        debug_assert!(!du.is_nan());

        (offset as Float + du, offset)
    }

    /// Return the probability of selecting a bucket.
    ///
    /// * `index` - Bucket index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.is_degenerate() {
            1.0 / self.count() as Float
        } else {
            self.func[index]
        }
    }
}
