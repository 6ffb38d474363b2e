//! Least squares solver.
//!
//! We solve small linear regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD handles tall design matrices (many rows, two columns) directly.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The SVD is computed with an explicit iteration cap so a pathological input
//!   cannot stall a request.
//! - Rank deficiency is reported rather than papered over with a minimum-norm
//!   solution: a slope that is not identified by the data must not be returned.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Smallest accepted ratio between the smallest and largest singular value.
const RANK_RATIO_MIN: f64 = 1e-12;

/// Solution of a least squares problem.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// `σ_min / σ_max` of the design matrix.
    pub condition_ratio: f64,
}

/// Solve a least squares problem using SVD.
///
/// `max_iterations` bounds the SVD's internal iteration count (`0` is treated as `1`).
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    max_iterations: usize,
) -> Result<LeastSquares, FitError> {
    let max_iterations = max_iterations.max(1);
    let svd = x
        .clone()
        .try_svd(true, true, f64::EPSILON, max_iterations)
        .ok_or(FitError::NotConverged { max_iterations })?;

    let sv = &svd.singular_values;
    let sv_max = sv.max();
    let sv_min = sv.min();
    let condition_ratio = if sv_max > 0.0 { sv_min / sv_max } else { 0.0 };
    if condition_ratio.is_nan() || condition_ratio < RANK_RATIO_MIN {
        return Err(FitError::RankDeficient { ratio: condition_ratio });
    }

    // Only fails when U/V were not computed, which we always request.
    let beta = svd
        .solve(y, sv_max * RANK_RATIO_MIN)
        .map_err(|_| FitError::NotConverged { max_iterations })?;

    Ok(LeastSquares { beta, condition_ratio })
}
