//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from an HTTP payload or a JSON file
//! - returned as the HTTP response body
//! - printed by the CLI

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Label reported in every result.
pub const MODEL_NAME: &str = "Bingham Plastic";

/// Default for `flow_rate`, `diameter` and `density` when absent.
pub const DEFAULT_SCALAR: f64 = 1.0;

/// Default cap on solver iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Parameter bounds applied to `(tau0, mu)`.
///
/// Chosen once per process (CLI flag / environment), never per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    /// Plain least squares; a negative yield stress or slope is reported as fitted.
    #[default]
    Unconstrained,
    /// Box-constrained least squares with `tau0 >= 0` and `mu >= 0`.
    NonNegative,
}

/// Fit configuration shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitConfig {
    pub max_iterations: usize,
    pub bounds: BoundsPolicy,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            bounds: BoundsPolicy::Unconstrained,
        }
    }
}

/// A validated fit request.
///
/// Construct via [`crate::io::parse_request`] (from JSON) or [`FitRequest::new`];
/// both guarantee equal-length arrays with at least 2 finite points.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    /// Shear rates γ̇ (1/s).
    pub shear_rates: Vec<f64>,
    /// Shear stresses τ (Pa).
    pub shear_stresses: Vec<f64>,
    /// Volumetric flow rate (m³/s).
    pub flow_rate: f64,
    /// Pipe diameter (m).
    pub diameter: f64,
    /// Fluid density (kg/m³).
    pub density: f64,
}

impl FitRequest {
    /// Build a request from already-numeric inputs, applying the same checks as JSON ingest.
    pub fn new(
        shear_rates: Vec<f64>,
        shear_stresses: Vec<f64>,
        flow_rate: f64,
        diameter: f64,
        density: f64,
    ) -> Result<Self, ServiceError> {
        let request = Self {
            shear_rates,
            shear_stresses,
            flow_rate,
            diameter,
            density,
        };
        crate::io::check_request(&request)?;
        Ok(request)
    }

    /// Number of (γ̇, τ) samples.
    pub fn len(&self) -> usize {
        self.shear_rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shear_rates.is_empty()
    }
}

/// Fitted Bingham parameters plus derived flow quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: String,
    /// Yield stress τ₀ (Pa).
    pub tau0: f64,
    /// Plastic viscosity μ (Pa·s).
    pub mu: f64,
    /// Coefficient of determination.
    pub r2: f64,
    /// Apparent viscosity at the mean shear rate (Pa·s).
    pub mu_app: f64,
    /// Bingham pipe-flow Reynolds number.
    pub re: f64,
    pub equation: String,
}

/// JSON body returned on every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// `validation` or `fit`.
    pub kind: String,
    /// Stable reason code (e.g. `length_mismatch`).
    pub reason: String,
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
            reason: err.reason().to_string(),
        }
    }
}
