use nalgebra::{DMatrix, DVector};

use crate::solvers::error::SolveError;

/// Least-squares solution of `a · x = b` through the SVD.
///
/// Singular values below `ε · max(rows, cols) · σ_max` are treated as zero,
/// so rank-deficient systems (zero rows for walls, for instance) still yield
/// the minimum-norm best fit instead of an error.
pub(crate) fn solve_least_squares(
    a: DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let scale = a.nrows().max(a.ncols()) as f64;
    let svd = a.svd(true, true);
    let sigma_max = svd.singular_values.max();
    let cutoff = f64::EPSILON * scale * sigma_max;

    svd.solve(b, cutoff)
        .map_err(|err| SolveError::LinearSystem(err.to_string()))
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use super::solve_least_squares;

    #[test]
    fn square_system_is_solved_exactly() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 5.0]);

        let x = solve_least_squares(a, &b).expect("solve should succeed");

        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn zero_rows_fall_back_to_minimum_norm() {
        let a = DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, 0.0]);
        let b = DVector::from_vec(vec![-4.0, 0.0]);

        let x = solve_least_squares(a, &b).expect("degenerate solve should succeed");

        assert!((x[0] - 4.0).abs() < 1e-12);
        assert!(x[1].abs() < 1e-12);
    }
}
