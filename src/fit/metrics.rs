//! Derived flow quantities for a fitted Bingham model.
//!
//! Pipe-flow relations (circular pipe, diameter `d`):
//!
//! - `v = Q / (π d² / 4)`
//! - `γ̇_w = 8 v / d`
//! - `Re = (ρ v d / μ) · (1 + τ₀ / (μ γ̇_w))⁻¹`
//!
//! Zero denominators never raise: `v` and `γ̇_w` fall back to `0.0` for a zero
//! diameter, and a zero `μ` or `γ̇_w` in the Reynolds expression is replaced by
//! `1.0`. Any remaining NaN/Inf is cleaned up by [`DerivedMetrics::sanitized`].

use std::f64::consts::PI;

use crate::domain::FitRequest;
use crate::math::{finite_or, mean, r_squared};
use crate::models::BinghamModel;

/// Fallback for velocity and wall shear rate when the pipe area is zero.
pub const ZERO_AREA_FALLBACK: f64 = 0.0;

/// Substitute for a zero denominator in the Reynolds number.
pub const SAFE_DENOMINATOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub r2: f64,
    pub mu_app: f64,
    /// Mean flow velocity (m/s).
    pub velocity: f64,
    /// Wall shear rate (1/s).
    pub gamma_w: f64,
    pub re: f64,
}

impl DerivedMetrics {
    /// Replace non-finite values: `0.0` for `r2`/`re`/flow terms, `1.0` for `mu_app`.
    pub fn sanitized(self) -> Self {
        Self {
            r2: finite_or(self.r2, 0.0),
            mu_app: finite_or(self.mu_app, 1.0),
            velocity: finite_or(self.velocity, ZERO_AREA_FALLBACK),
            gamma_w: finite_or(self.gamma_w, ZERO_AREA_FALLBACK),
            re: finite_or(self.re, 0.0),
        }
    }
}

/// Compute every derived quantity for a fitted model.
pub fn compute_metrics(model: &BinghamModel, request: &FitRequest) -> DerivedMetrics {
    let predicted = model.predict_all(&request.shear_rates);
    let r2 = r_squared(&request.shear_stresses, &predicted);
    let mu_app = apparent_viscosity(model, &request.shear_rates);
    let velocity = pipe_velocity(request.flow_rate, request.diameter);
    let gamma_w = wall_shear_rate(velocity, request.diameter);
    let re = bingham_reynolds(model, request.density, velocity, request.diameter, gamma_w);

    DerivedMetrics {
        r2,
        mu_app,
        velocity,
        gamma_w,
        re,
    }
    .sanitized()
}

/// `τ(γ̄) / γ̄` at the mean shear rate; `μ` when the mean is zero.
pub fn apparent_viscosity(model: &BinghamModel, shear_rates: &[f64]) -> f64 {
    let gamma_bar = mean(shear_rates);
    if gamma_bar == 0.0 {
        return model.mu;
    }
    model.predict(gamma_bar) / gamma_bar
}

/// Mean velocity `Q / A` in a circular pipe.
pub fn pipe_velocity(flow_rate: f64, diameter: f64) -> f64 {
    let area = PI * diameter * diameter / 4.0;
    if area == 0.0 {
        return ZERO_AREA_FALLBACK;
    }
    flow_rate / area
}

/// Newtonian wall shear rate `8 v / d`.
pub fn wall_shear_rate(velocity: f64, diameter: f64) -> f64 {
    if diameter == 0.0 {
        return ZERO_AREA_FALLBACK;
    }
    8.0 * velocity / diameter
}

/// Reynolds number for Bingham-plastic pipe flow.
pub fn bingham_reynolds(model: &BinghamModel, density: f64, velocity: f64, diameter: f64, gamma_w: f64) -> f64 {
    let mu = nonzero_or_safe(model.mu);
    let gamma_w = nonzero_or_safe(gamma_w);
    (density * velocity * diameter / mu) / (1.0 + model.tau0 / (mu * gamma_w))
}

fn nonzero_or_safe(value: f64) -> f64 {
    if value == 0.0 { SAFE_DENOMINATOR } else { value }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn request(rates: &[f64], stresses: &[f64], q: f64, d: f64, rho: f64) -> FitRequest {
        FitRequest {
            shear_rates: rates.to_vec(),
            shear_stresses: stresses.to_vec(),
            flow_rate: q,
            diameter: d,
            density: rho,
        }
    }

    #[test]
    fn apparent_viscosity_at_mean_shear_rate() {
        let m = BinghamModel::new(2.0, 0.5);
        // mean γ̇ = 15, τ = 9.5
        assert_relative_eq!(apparent_viscosity(&m, &[0.0, 10.0, 20.0, 30.0]), 9.5 / 15.0, max_relative = 1e-12);
    }

    #[test]
    fn apparent_viscosity_falls_back_to_mu_for_zero_mean() {
        let m = BinghamModel::new(2.0, 0.5);
        assert_eq!(apparent_viscosity(&m, &[-5.0, 0.0, 5.0]), 0.5);
    }

    #[test]
    fn unit_pipe_velocity_and_wall_shear() {
        let v = pipe_velocity(1.0, 1.0);
        assert_relative_eq!(v, 4.0 / PI, max_relative = 1e-12);
        assert_relative_eq!(wall_shear_rate(v, 1.0), 32.0 / PI, max_relative = 1e-12);
    }

    #[test]
    fn zero_diameter_uses_fallbacks() {
        assert_eq!(pipe_velocity(1.0, 0.0), ZERO_AREA_FALLBACK);
        assert_eq!(wall_shear_rate(5.0, 0.0), ZERO_AREA_FALLBACK);

        let m = BinghamModel::new(2.0, 0.5);
        let metrics = compute_metrics(&m, &request(&[0.0, 10.0], &[2.0, 7.0], 1.0, 0.0, 1000.0));
        assert!(metrics.re.is_finite());
        assert_eq!(metrics.re, 0.0);
    }

    #[test]
    fn reynolds_matches_hand_calculation() {
        // Drilling-mud-like numbers.
        let m = BinghamModel::new(5.0, 0.02);
        let (q, d, rho) = (0.01, 0.1, 1200.0);
        let v = q / (PI * d * d / 4.0);
        let gw = 8.0 * v / d;
        let expected = (rho * v * d / 0.02) / (1.0 + 5.0 / (0.02 * gw));

        let metrics = compute_metrics(&m, &request(&[100.0, 200.0], &[7.0, 9.0], q, d, rho));
        assert_relative_eq!(metrics.velocity, v, max_relative = 1e-12);
        assert_relative_eq!(metrics.gamma_w, gw, max_relative = 1e-12);
        assert_relative_eq!(metrics.re, expected, max_relative = 1e-12);
    }

    #[test]
    fn zero_mu_uses_safe_denominator() {
        let m = BinghamModel::new(0.0, 0.0);
        let re = bingham_reynolds(&m, 1.0, 2.0, 3.0, 4.0);
        assert_eq!(re, 6.0);
    }

    #[test]
    fn sanitized_replaces_non_finite_values() {
        let raw = DerivedMetrics {
            r2: f64::NAN,
            mu_app: f64::INFINITY,
            velocity: f64::NAN,
            gamma_w: f64::NEG_INFINITY,
            re: f64::INFINITY,
        };
        let clean = raw.sanitized();
        assert_eq!(clean.r2, 0.0);
        assert_eq!(clean.mu_app, 1.0);
        assert_eq!(clean.velocity, 0.0);
        assert_eq!(clean.gamma_w, 0.0);
        assert_eq!(clean.re, 0.0);
    }

    #[test]
    fn singular_reynolds_bracket_is_sanitized() {
        // 1 + τ₀/(μ γ̇_w) == 0 when τ₀ = -μ γ̇_w.
        let d = 1.0;
        let v = pipe_velocity(1.0, d);
        let gw = wall_shear_rate(v, d);
        let m = BinghamModel::new(-gw, 1.0);
        let metrics = compute_metrics(&m, &request(&[1.0, 2.0], &[1.0, 2.0], 1.0, d, 1.0));
        assert!(metrics.re.is_finite());
    }
}
