//! Model evaluation for the Bingham plastic `τ = τ₀ + μ·γ̇`.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given shear rate (for least squares)
//! - predict τ(γ̇) given fitted parameters (for residuals and metrics)

/// Guard for a zero shear-rate range in the initial slope guess.
const RANGE_EPS: f64 = 1e-6;

/// Number of free parameters (τ₀, μ).
pub const PARAM_COUNT: usize = 2;

/// Bingham plastic parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinghamModel {
    /// Yield stress τ₀ (Pa).
    pub tau0: f64,
    /// Plastic viscosity μ (Pa·s).
    pub mu: f64,
}

impl BinghamModel {
    pub fn new(tau0: f64, mu: f64) -> Self {
        Self { tau0, mu }
    }

    /// Predicted shear stress at shear rate `gamma_dot`.
    pub fn predict(&self, gamma_dot: f64) -> f64 {
        self.tau0 + self.mu * gamma_dot
    }

    /// Predictions at every shear rate.
    pub fn predict_all(&self, shear_rates: &[f64]) -> Vec<f64> {
        shear_rates.iter().map(|&g| self.predict(g)).collect()
    }

    /// Sum of squared residuals against observed stresses.
    pub fn sse(&self, shear_rates: &[f64], shear_stresses: &[f64]) -> f64 {
        shear_rates
            .iter()
            .zip(shear_stresses)
            .map(|(&g, &t)| (t - self.predict(g)).powi(2))
            .sum()
    }

    /// Starting point a general nonlinear solver would use.
    ///
    /// `τ₀₀ = min(τ)`, `μ₀ = (max(τ) - τ₀₀) / max(range(γ̇), 1e-6)`.
    pub fn initial_guess(shear_rates: &[f64], shear_stresses: &[f64]) -> Self {
        let (tau_min, tau_max) = min_max(shear_stresses);
        let (rate_min, rate_max) = min_max(shear_rates);
        let range = (rate_max - rate_min).max(RANGE_EPS);
        Self::new(tau_min, (tau_max - tau_min) / range)
    }
}

/// Fill a design row: intercept first, then the shear rate.
pub fn fill_design_row(gamma_dot: f64, out: &mut [f64; PARAM_COUNT]) {
    out[0] = 1.0;
    out[1] = gamma_dot;
}

/// `(min, max)` of a slice; `(0, 0)` when empty.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
