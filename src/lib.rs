//! `bingham-fit` library crate.
//!
//! The binary (`bingham`) is a thin wrapper around this library so that:
//!
//! - the fitting pipeline is testable without spawning processes or sockets
//! - the HTTP service and the CLI share one implementation

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod server;
