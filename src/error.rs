//! Error types.
//!
//! - [`ValidationError`]: the request cannot be fitted as given.
//! - [`FitError`]: the request was valid but the regression failed.
//! - [`ServiceError`]: either of the above, as seen by the fitting pipeline.
//! - [`AppError`]: binary-level error carrying a process exit code.

use thiserror::Error;

/// Malformed or insufficient input. Always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Request body must be a JSON object, got {found}.")]
    NotAnObject { found: &'static str },

    #[error("Field '{field}' must be an array of numbers, got {found}.")]
    NotAnArray { field: &'static str, found: &'static str },

    #[error("Field '{field}' has a non-numeric value at index {index}: {value}")]
    NonNumeric {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("Field '{field}' must be a number, got {value}.")]
    NonNumericScalar { field: &'static str, value: String },

    #[error("Field '{field}' has a non-finite value at index {index}.")]
    NonFinite { field: &'static str, index: usize },

    #[error("Field '{field}' must be finite, got {value}.")]
    NonFiniteScalar { field: &'static str, value: f64 },

    #[error("Field '{field}' must not be negative, got {value}.")]
    NegativeScalar { field: &'static str, value: f64 },

    #[error("Mismatched data lengths: {rates} shear rates vs {stresses} shear stresses.")]
    LengthMismatch { rates: usize, stresses: usize },

    #[error("At least 2 data points are required to fit a Bingham model, got {n}.")]
    TooFewPoints { n: usize },
}

impl ValidationError {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MalformedPayload(_) => "malformed_payload",
            ValidationError::NotAnObject { .. } => "not_an_object",
            ValidationError::NotAnArray { .. } => "not_an_array",
            ValidationError::NonNumeric { .. } | ValidationError::NonNumericScalar { .. } => "non_numeric",
            ValidationError::NonFinite { .. } | ValidationError::NonFiniteScalar { .. } => "non_finite",
            ValidationError::NegativeScalar { .. } => "negative_value",
            ValidationError::LengthMismatch { .. } => "length_mismatch",
            ValidationError::TooFewPoints { .. } => "too_few_points",
        }
    }
}

/// The regression could not produce trustworthy parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Fitting failed: all shear rates are equal ({rate}), slope is unidentifiable.")]
    DegenerateShearRates { rate: f64 },

    #[error("Fitting failed: design matrix is rank deficient (condition ratio {ratio:.3e}).")]
    RankDeficient { ratio: f64 },

    #[error("Fitting failed: solver did not converge within {max_iterations} iterations.")]
    NotConverged { max_iterations: usize },

    #[error("Fitting failed: solver produced non-finite parameters (tau0={tau0}, mu={mu}).")]
    NonFiniteParameters { tau0: f64, mu: f64 },
}

impl FitError {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            FitError::DegenerateShearRates { .. } => "degenerate_shear_rates",
            FitError::RankDeficient { .. } => "rank_deficient",
            FitError::NotConverged { .. } => "not_converged",
            FitError::NonFiniteParameters { .. } => "non_finite_parameters",
        }
    }
}

/// Failure of one pass through the fitting pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fit(#[from] FitError),
}

impl ServiceError {
    /// Short label for the error family (`validation` or `fit`).
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::Fit(_) => "fit",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ServiceError::Validation(e) => e.reason(),
            ServiceError::Fit(e) => e.reason(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let exit_code = match err {
            ServiceError::Validation(_) => 3,
            ServiceError::Fit(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_keeps_kind_and_reason() {
        let err: ServiceError = ValidationError::TooFewPoints { n: 1 }.into();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.reason(), "too_few_points");

        let err: ServiceError = FitError::NotConverged { max_iterations: 10 }.into();
        assert_eq!(err.kind(), "fit");
        assert_eq!(err.reason(), "not_converged");
    }

    #[test]
    fn app_error_exit_codes_follow_error_family() {
        let app: AppError = ServiceError::from(ValidationError::LengthMismatch { rates: 3, stresses: 2 }).into();
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().contains("Mismatched data lengths"));

        let app: AppError = ServiceError::from(FitError::DegenerateShearRates { rate: 5.0 }).into();
        assert_eq!(app.exit_code(), 4);
    }
}
