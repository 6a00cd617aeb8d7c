//! 2D Distribution.

use crate::common::*;
use crate::geometry::*;
use crate::sampling::Distribution1D;

/// Represents a piecewise-constant 2D distribution over a grid of weights as a
/// marginal distribution over rows and a conditional distribution over the
/// columns of each row.
#[derive(Clone, Debug)]
pub struct Distribution2D {
    /// 1D conditional sampling density over columns for each row.
    p_conditional_v: Vec<Distribution1D>,

    /// Marginal sampling density over rows.
    p_marginal: Distribution1D,
}

impl Distribution2D {
    /// Returns a new `Distribution2D` for a row-major grid of weights.
    ///
    /// - `width`   - Number of columns.
    /// - `height`  - Number of rows.
    /// - `density` - `width * height` weights, row index varying slowest.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty or `density` doesn't hold exactly
    /// `width * height` weights. `DensitySampler` validates its input first.
    pub fn new(width: usize, height: usize, density: &[Float]) -> Self {
        assert!(width > 0 && height > 0, "empty grid {width}x{height}");
        assert_eq!(Some(density.len()), width.checked_mul(height));

        let p_conditional_v: Vec<Distribution1D> =
            density.chunks_exact(width).map(Distribution1D::new).collect();
        let marginal_func: Vec<f64> = p_conditional_v.iter().map(|pcv| pcv.total()).collect();
        let p_marginal = Distribution1D::from_weights(marginal_func);

        Self {
            p_conditional_v,
            p_marginal,
        }
    }

    /// Returns a new `Distribution2D` from a list of rows of equal length.
    ///
    /// - `rows` - The rows, top to bottom.
    pub fn from_rows(rows: &[Vec<Float>]) -> Self {
        let width = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == width), "rows differ in length");

        let density: Vec<Float> = rows.iter().flatten().copied().collect();
        Self::new(width, rows.len(), &density)
    }

    /// Returns the grid resolution (columns, rows).
    pub fn resolution(&self) -> Point2u {
        Point2u::new(self.p_conditional_v[0].count(), self.p_marginal.count())
    }

    /// Returns the conditional distribution for a row.
    ///
    /// * `row` - Row index.
    pub fn conditional(&self, row: usize) -> &Distribution1D {
        &self.p_conditional_v[row]
    }

    /// Returns the marginal distribution over rows.
    pub fn marginal(&self) -> &Distribution1D {
        &self.p_marginal
    }

    /// Return a sample point in [0,1]x[0,1] given two uniform random values.
    ///
    /// - `u` - The random values; `u.y` selects the row and `u.x` the column.
    pub fn sample_continuous(&self, u: &Point2f) -> Point2f {
        let Point2 { x: nu, y: nv } = self.resolution();

        // Sample the marginal to find the row coordinate.
        let (d1, _) = self.p_marginal.sample_continuous(u.y);

        // The interpolated position can land exactly on `nv`.
        let row = min(d1 as usize, nv - 1);
        let (d0, _) = self.p_conditional_v[row].sample_continuous(u.x);

        Point2f::new(d0 / nu as Float, d1 / nv as Float)
    }

    /// Returns the probability of a sample landing in a cell.
    ///
    /// * `x` - Column index.
    /// * `y` - Row index.
    pub fn cell_probability(&self, x: usize, y: usize) -> Float {
        self.p_marginal.discrete_pdf(y) * self.p_conditional_v[y].discrete_pdf(x)
    }

    /// Return the PDF value for a point in the unit square; 0 outside of it.
    ///
    /// * `p` - Sample value.
    pub fn pdf(&self, p: &Point2f) -> Float {
        if !p.in_unit_square() {
            return 0.0;
        }

        let Point2 { x: nu, y: nv } = self.resolution();
        let iu = clamp((p.x * nu as Float) as usize, 0, nu - 1);
        let iv = clamp((p.y * nv as Float) as usize, 0, nv - 1);
        self.cell_probability(iu, iv) * (nu * nv) as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use float_cmp::*;

    #[test]
    fn marginal_is_row_sums() {
        let d = Distribution2D::from_rows(&[vec![1.0, 1.0], vec![2.0, 4.0]]);
        assert_eq!(d.resolution(), Point2u::new(2, 2));
        assert_eq!(d.conditional(0).total(), 2.0);
        assert_eq!(d.conditional(1).total(), 6.0);
        assert_eq!(d.marginal().func(), &[0.25, 0.75]);
        assert_eq!(d.marginal().total(), 8.0);
    }

    #[test]
    fn rows_are_normalized() {
        let d = Distribution2D::new(3, 2, &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
        let sum: Float = d.conditional(0).func().iter().sum();
        assert!(approx_eq!(f32, sum, 1.0, epsilon = 1e-5));
        assert_eq!(d.conditional(1).func(), &[0.0, 0.0, 0.0]);
        assert_eq!(d.marginal().func(), &[1.0, 0.0]);
    }

    #[test]
    fn heavy_row_keeps_its_mass() {
        let d = Distribution2D::new(2, 2, &[3.0e38, 3.0e38, 1.0, 1.0]);
        assert_eq!(d.conditional(0).func(), &[0.5, 0.5]);
        assert!(!d.conditional(0).is_degenerate());
        assert_eq!(d.marginal().func()[0], 1.0);
        assert!(d.marginal().func()[1] < 1e-30);
    }

    #[test]
    #[should_panic]
    fn size_mismatch_panics() {
        let _ = Distribution2D::new(2, 2, &[1.0, 1.0, 1.0]);
    }

    #[test]
    #[should_panic]
    fn ragged_rows_panic() {
        let _ = Distribution2D::from_rows(&[vec![1.0, 1.0], vec![1.0]]);
    }

    #[test]
    fn sample_continuous_picks_weighted_cell() {
        let d = Distribution2D::from_rows(&[vec![0.0, 0.0], vec![0.0, 1.0]]);
        let p = d.sample_continuous(&Point2f::new(0.5, 0.5));
        assert!(p.x > 0.5 && p.x <= 1.0);
        assert!(p.y > 0.5 && p.y <= 1.0);
    }

    #[test]
    fn cell_probabilities_sum_to_one() {
        let d = Distribution2D::from_rows(&[vec![1.0, 3.0, 0.0], vec![2.0, 2.0, 2.0]]);
        let mut sum = 0.0;
        for y in 0..2 {
            for x in 0..3 {
                sum += d.cell_probability(x, y);
            }
        }
        assert!(approx_eq!(f32, sum, 1.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, d.cell_probability(1, 0), 0.3, epsilon = 1e-6));
    }

    #[test]
    fn pdf_of_uniform_grid_is_one() {
        let d = Distribution2D::new(4, 4, &[2.0; 16]);
        assert!(approx_eq!(f32, d.pdf(&Point2f::new(0.1, 0.9)), 1.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, d.pdf(&Point2f::new(1.0, 1.0)), 1.0, epsilon = 1e-5));
        assert_eq!(d.pdf(&Point2f::new(1.5, 0.5)), 0.0);
    }

    #[test]
    fn pdf_of_all_zero_grid_is_uniform() {
        let d = Distribution2D::new(2, 3, &[0.0; 6]);
        assert!(approx_eq!(f32, d.pdf(&Point2f::new(0.3, 0.3)), 1.0, epsilon = 1e-5));
    }

    #[test]
    fn samples_stay_in_unit_square() {
        let d = Distribution2D::from_rows(&[vec![0.0, 5.0, 1.0], vec![0.0, 0.0, 0.0], vec![3.0, 0.0, 0.0]]);
        let mut rng = RNG::new(11);
        for _ in 0..10_000 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let p = d.sample_continuous(&u);
            assert!(p.in_unit_square(), "{p} out of range");
        }
    }
}
