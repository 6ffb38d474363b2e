//! Low-level fitting routine for the Bingham plastic.
//!
//! Given shear rates `γ̇_i` and stresses `τ_i` we minimise
//!
//! ```text
//! Σ (τ_i - τ₀ - μ γ̇_i)^2
//! ```
//!
//! The model is linear in `(τ₀, μ)`, so the unconstrained optimum is a single
//! least squares solve. Shear rates are centred on their mean before the solve
//! (`τ = b₀ + μ (γ̇ - γ̄)`, `τ₀ = b₀ - μ γ̄`) so a large offset with a small
//! spread stays well conditioned. Under [`BoundsPolicy::NonNegative`] an infeasible
//! optimum is replaced by the best point on the boundary of the feasible
//! quadrant; the objective is convex so that point is the constrained optimum.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::domain::{BoundsPolicy, FitConfig};
use crate::error::FitError;
use crate::math::{mean, solve_least_squares};
use crate::models::{BinghamModel, PARAM_COUNT, fill_design_row, min_max};

/// Best fit for a sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct BinghamFit {
    pub model: BinghamModel,
    /// Number of samples fitted.
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    /// `σ_min / σ_max` of the centred design matrix.
    pub condition_ratio: f64,
    /// True when a bound replaced the unconstrained optimum.
    pub bounded: bool,
}

/// Fit `τ = τ₀ + μ·γ̇` to the samples.
///
/// Callers are expected to pass validated, equal-length inputs with at least two
/// points (see [`crate::io::check_request`]).
pub fn fit_bingham(
    shear_rates: &[f64],
    shear_stresses: &[f64],
    config: &FitConfig,
) -> Result<BinghamFit, FitError> {
    let n = shear_rates.len();
    debug_assert_eq!(n, shear_stresses.len());

    let (rate_min, rate_max) = min_max(shear_rates);
    if rate_min == rate_max {
        return Err(FitError::DegenerateShearRates { rate: rate_min });
    }

    let guess = BinghamModel::initial_guess(shear_rates, shear_stresses);
    debug!(n, tau0 = guess.tau0, mu = guess.mu, "initial guess");

    let gamma_bar = mean(shear_rates);
    let mut x = DMatrix::<f64>::zeros(n, PARAM_COUNT);
    let mut row = [0.0; PARAM_COUNT];
    for (i, &g) in shear_rates.iter().enumerate() {
        fill_design_row(g - gamma_bar, &mut row);
        for (j, v) in row.iter().enumerate() {
            x[(i, j)] = *v;
        }
    }
    let y = DVector::from_column_slice(shear_stresses);

    let solved = solve_least_squares(&x, &y, config.max_iterations)?;
    let mu = solved.beta[1];
    let unconstrained = BinghamModel::new(solved.beta[0] - mu * gamma_bar, mu);
    if !(unconstrained.tau0.is_finite() && unconstrained.mu.is_finite()) {
        return Err(FitError::NonFiniteParameters {
            tau0: unconstrained.tau0,
            mu: unconstrained.mu,
        });
    }

    let (model, bounded) = match config.bounds {
        BoundsPolicy::Unconstrained => (unconstrained, false),
        BoundsPolicy::NonNegative => {
            if unconstrained.tau0 >= 0.0 && unconstrained.mu >= 0.0 {
                (unconstrained, false)
            } else {
                (non_negative_boundary(shear_rates, shear_stresses), true)
            }
        }
    };

    let sse = model.sse(shear_rates, shear_stresses);
    let rmse = (sse / n as f64).sqrt();
    debug!(
        tau0 = model.tau0,
        mu = model.mu,
        sse,
        condition_ratio = solved.condition_ratio,
        bounded,
        "bingham fit"
    );

    Ok(BinghamFit {
        model,
        n,
        sse,
        rmse,
        condition_ratio: solved.condition_ratio,
        bounded,
    })
}

/// Best model on the boundary of `{τ₀ >= 0, μ >= 0}`.
///
/// Candidates, in tie-break order:
/// - `τ₀ = 0`, `μ = max(0, Σγ̇τ / Σγ̇²)` (line through the origin)
/// - `μ = 0`, `τ₀ = max(0, mean(τ))` (constant stress)
fn non_negative_boundary(shear_rates: &[f64], shear_stresses: &[f64]) -> BinghamModel {
    let sxy: f64 = shear_rates.iter().zip(shear_stresses).map(|(g, t)| g * t).sum();
    let sxx: f64 = shear_rates.iter().map(|g| g * g).sum();
    let slope = if sxx > 0.0 { (sxy / sxx).max(0.0) } else { 0.0 };

    let candidates = [
        BinghamModel::new(0.0, slope),
        BinghamModel::new(mean(shear_stresses).max(0.0), 0.0),
    ];

    let mut best = candidates[0];
    let mut best_sse = best.sse(shear_rates, shear_stresses);
    for c in &candidates[1..] {
        let sse = c.sse(shear_rates, shear_stresses);
        if sse < best_sse {
            best = *c;
            best_sse = sse;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::Normal;

    use super::*;

    fn non_negative() -> FitConfig {
        FitConfig {
            bounds: BoundsPolicy::NonNegative,
            ..FitConfig::default()
        }
    }

    #[test]
    fn recovers_noiseless_parameters() {
        let rates = [0.0, 10.0, 20.0, 30.0];
        let stresses = [2.0, 7.0, 12.0, 17.0];

        let fit = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();
        assert_relative_eq!(fit.model.tau0, 2.0, epsilon = 1e-9);
        assert_relative_eq!(fit.model.mu, 0.5, epsilon = 1e-9);
        assert!(fit.sse < 1e-18);
        assert!(!fit.bounded);
    }

    #[test]
    fn two_points_define_the_line() {
        let fit = fit_bingham(&[1.0, 3.0], &[4.0, 10.0], &FitConfig::default()).unwrap();
        assert_relative_eq!(fit.model.tau0, 1.0, epsilon = 1e-9);
        assert_relative_eq!(fit.model.mu, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn recovers_parameters_from_noisy_rheometer_readings() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.05).unwrap();
        let (tau0, mu) = (4.2, 0.035);

        let rates: Vec<f64> = (0..60).map(|i| 5.0 + 10.0 * i as f64).collect();
        let stresses: Vec<f64> = rates
            .iter()
            .map(|g| tau0 + mu * g + noise.sample(&mut rng))
            .collect();

        let fit = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();
        assert_relative_eq!(fit.model.tau0, tau0, epsilon = 0.05);
        assert_relative_eq!(fit.model.mu, mu, epsilon = 1e-3);
        assert!(fit.rmse < 0.1);
    }

    #[test]
    fn equal_shear_rates_fail() {
        let err = fit_bingham(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0], &FitConfig::default()).unwrap_err();
        assert_eq!(err, FitError::DegenerateShearRates { rate: 5.0 });
    }

    #[test]
    fn unconstrained_reports_negative_yield_stress() {
        // Line through (10, 0) with slope 1: τ₀ = -10.
        let fit = fit_bingham(&[10.0, 20.0, 30.0], &[0.0, 10.0, 20.0], &FitConfig::default()).unwrap();
        assert_relative_eq!(fit.model.tau0, -10.0, epsilon = 1e-9);
        assert_relative_eq!(fit.model.mu, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn non_negative_clamps_yield_stress_to_zero() {
        let rates = [10.0, 20.0, 30.0];
        let stresses = [0.0, 10.0, 20.0];
        let fit = fit_bingham(&rates, &stresses, &non_negative()).unwrap();

        assert!(fit.bounded);
        assert_eq!(fit.model.tau0, 0.0);
        // Σγτ / Σγ² = (0 + 200 + 600) / (100 + 400 + 900)
        assert_relative_eq!(fit.model.mu, 800.0 / 1400.0, epsilon = 1e-12);
    }

    #[test]
    fn non_negative_clamps_slope_to_zero() {
        // Decreasing stresses with positive intercept.
        let rates = [0.0, 1.0, 2.0];
        let stresses = [5.0, 4.0, 3.0];
        let fit = fit_bingham(&rates, &stresses, &non_negative()).unwrap();

        assert!(fit.bounded);
        assert_eq!(fit.model.mu, 0.0);
        assert_relative_eq!(fit.model.tau0, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn non_negative_keeps_feasible_optimum() {
        let rates = [0.0, 10.0, 20.0, 30.0];
        let stresses = [2.0, 7.0, 12.0, 17.0];
        let a = fit_bingham(&rates, &stresses, &non_negative()).unwrap();
        let b = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn large_offset_small_spread_is_identified() {
        let rates = [1e12, 1e12 + 1.0, 1e12 + 2.0];
        let stresses = [1.0, 2.0, 3.0];
        let fit = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();

        assert_relative_eq!(fit.model.mu, 1.0, epsilon = 1e-9);
        assert_relative_eq!(fit.model.tau0, 1.0 - 1e12, max_relative = 1e-12);
        assert!(fit.condition_ratio > 0.1);
    }

    #[test]
    fn repeated_fits_are_identical() {
        let rates = [1.0, 4.0, 9.0, 16.0, 25.0];
        let stresses = [3.1, 4.9, 8.2, 11.7, 15.0];
        let a = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();
        let b = fit_bingham(&rates, &stresses, &FitConfig::default()).unwrap();
        assert_eq!(a.model.tau0.to_bits(), b.model.tau0.to_bits());
        assert_eq!(a.model.mu.to_bits(), b.model.mu.to_bits());
    }
}
