//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - solve the Bingham regression under the configured bounds (`fitter`)
//! - derive flow quantities from the fitted parameters (`metrics`)

pub mod fitter;
pub mod metrics;

pub use fitter::*;
pub use metrics::*;
