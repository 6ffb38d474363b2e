//! Bingham-plastic model implementation.
//!
//! The model is kept as small, pure functions so that the fitter and the
//! derived-metric code can share one definition of `τ(γ̇)`.

pub mod model;

pub use model::*;
