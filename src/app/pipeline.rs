//! Shared "fit pipeline" logic used by both the HTTP handler and the CLI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> regression -> derived metrics -> result record
//!
//! The front-ends can then focus on transport (HTTP vs stdout).

use crate::domain::{FitConfig, FitRequest, FitResult, MODEL_NAME};
use crate::error::ServiceError;
use crate::fit::{BinghamFit, DerivedMetrics, compute_metrics, fit_bingham};
use crate::io::parse_request_bytes;
use crate::math::finite_or;
use crate::models::BinghamModel;
use crate::report::{PARAM_DECIMALS, REYNOLDS_DECIMALS, format_equation, round_dp};

/// All computed outputs of a single fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutput {
    pub fit: BinghamFit,
    pub metrics: DerivedMetrics,
    pub result: FitResult,
}

/// Validate a raw JSON body and fit it.
pub fn fit_payload(body: &[u8], config: &FitConfig) -> Result<FitOutput, ServiceError> {
    let request = parse_request_bytes(body)?;
    run_fit(&request, config)
}

/// Fit a validated request and assemble the result record.
pub fn run_fit(request: &FitRequest, config: &FitConfig) -> Result<FitOutput, ServiceError> {
    let fit = fit_bingham(&request.shear_rates, &request.shear_stresses, config)?;
    let metrics = compute_metrics(&fit.model, request);
    let result = build_result(&fit.model, &metrics);
    Ok(FitOutput { fit, metrics, result })
}

/// Sanitize, round and label the fitted values.
fn build_result(model: &BinghamModel, metrics: &DerivedMetrics) -> FitResult {
    let model = BinghamModel::new(finite_or(model.tau0, 0.0), finite_or(model.mu, 1.0));
    FitResult {
        model: MODEL_NAME.to_string(),
        tau0: round_dp(model.tau0, PARAM_DECIMALS),
        mu: round_dp(model.mu, PARAM_DECIMALS),
        r2: round_dp(metrics.r2, PARAM_DECIMALS),
        mu_app: round_dp(metrics.mu_app, PARAM_DECIMALS),
        re: round_dp(metrics.re, REYNOLDS_DECIMALS),
        equation: format_equation(&model),
    }
}
