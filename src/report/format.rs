//! Formatting for results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - the output contract (equation text, rounding) changes in one place only

use crate::app::pipeline::FitOutput;
use crate::domain::{FitConfig, FitRequest};
use crate::models::{BinghamModel, min_max};

/// Significant figures used in the equation string.
pub const EQUATION_SIG_FIGS: usize = 3;

/// Decimal places for `tau0`, `mu`, `r2`, `mu_app` in the result body.
pub const PARAM_DECIMALS: i32 = 6;

/// Decimal places for `re` in the result body.
pub const REYNOLDS_DECIMALS: i32 = 2;

/// Render `τ = τ₀ + μ·γ̇` with [`EQUATION_SIG_FIGS`] significant figures.
///
/// A negative slope is written with a minus sign (`τ = 2 - 0.5·γ̇`).
pub fn format_equation(model: &BinghamModel) -> String {
    let tau0 = format_sig(model.tau0, EQUATION_SIG_FIGS);
    if model.mu < 0.0 {
        format!("τ = {tau0} - {}·γ̇", format_sig(-model.mu, EQUATION_SIG_FIGS))
    } else {
        format!("τ = {tau0} + {}·γ̇", format_sig(model.mu, EQUATION_SIG_FIGS))
    }
}

/// `%g`-style formatting with `sig` significant figures.
///
/// Fixed notation for decimal exponents in `[-4, sig)`, scientific otherwise;
/// trailing zeros are dropped (`2`, `0.5`, `1.23e+03`).
pub fn format_sig(value: f64, sig: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sig = sig.max(1);
    // `{:e}` rounds first, so the exponent already accounts for carries (99.96 -> 1.00e2).
    let sci = format!("{:.*e}", sig - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= sig as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Round to `places` decimal places; non-finite results return the input.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    // `+ 0.0` folds -0.0 into 0.0.
    if rounded.is_finite() { rounded + 0.0 } else { value }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Format a human-readable summary of one fit for the terminal.
pub fn format_fit_summary(request: &FitRequest, output: &FitOutput, config: &FitConfig) -> String {
    let mut out = String::new();
    let (rate_min, rate_max) = min_max(&request.shear_rates);
    let (tau_min, tau_max) = min_max(&request.shear_stresses);
    let result = &output.result;

    out.push_str("=== bingham - Bingham Plastic Fit ===\n");
    out.push_str(&format!(
        "Points: n={} | γ̇=[{:.3}, {:.3}] 1/s | τ=[{:.3}, {:.3}] Pa\n",
        request.len(),
        rate_min,
        rate_max,
        tau_min,
        tau_max
    ));
    out.push_str(&format!(
        "Bounds: {:?}{}\n",
        config.bounds,
        if output.fit.bounded { " (active)" } else { "" }
    ));

    out.push_str(&format!("\n{}\n", result.equation));
    out.push_str(&format!("  tau0   = {:>14.6} Pa\n", result.tau0));
    out.push_str(&format!("  mu     = {:>14.6} Pa·s\n", result.mu));
    out.push_str(&format!("  r2     = {:>14.6}\n", result.r2));
    out.push_str(&format!("  rmse   = {:>14.6} Pa\n", output.fit.rmse));

    out.push_str("\nPipe flow:\n");
    out.push_str(&format!(
        "  Q={} m³/s | d={} m | ρ={} kg/m³\n",
        request.flow_rate, request.diameter, request.density
    ));
    out.push_str(&format!("  velocity = {:>12.4} m/s\n", output.metrics.velocity));
    out.push_str(&format!("  gamma_w  = {:>12.4} 1/s\n", output.metrics.gamma_w));
    out.push_str(&format!("  mu_app   = {:>12.6} Pa·s\n", result.mu_app));
    out.push_str(&format!("  Re       = {:>12.2}\n", result.re));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sig_figs_match_g_format() {
        assert_eq!(format_sig(2.0, 3), "2");
        assert_eq!(format_sig(0.5, 3), "0.5");
        assert_eq!(format_sig(1.234, 3), "1.23");
        assert_eq!(format_sig(-0.18, 3), "-0.18");
        assert_eq!(format_sig(1234.5, 3), "1.23e+03");
        assert_eq!(format_sig(99.96, 3), "100");
        assert_eq!(format_sig(0.00012345, 3), "0.000123");
        assert_eq!(format_sig(0.000012345, 3), "1.23e-05");
        assert_eq!(format_sig(0.0, 3), "0");
        assert_eq!(format_sig(-0.0, 3), "0");
    }

    #[test]
    fn equation_renders_both_signs() {
        assert_eq!(format_equation(&BinghamModel::new(2.0, 0.5)), "τ = 2 + 0.5·γ̇");
        assert_eq!(format_equation(&BinghamModel::new(2.0, -0.5)), "τ = 2 - 0.5·γ̇");
        assert_eq!(format_equation(&BinghamModel::new(-1.5, 0.18)), "τ = -1.5 + 0.18·γ̇");
    }

    #[test]
    fn round_dp_behaves() {
        assert_eq!(round_dp(1.23456789, 6), 1.234568);
        assert_eq!(round_dp(1410.004, 2), 1410.0);
        assert_eq!(round_dp(-0.0000001, 6), 0.0);
        assert!(round_dp(-0.0000001, 6).is_sign_positive());
    }
}
