//! Command-line parsing for the Bingham fitting service.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.
//!
//! Every option can also be set through the environment (a `.env` file is
//! loaded first), which is how the service is usually configured in deployment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BoundsPolicy, DEFAULT_MAX_ITERATIONS, FitConfig};

/// Port used by the service when nothing else is configured.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bingham", version, about = "Bingham plastic rheology fitting service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (`POST /fit`).
    Serve(ServeArgs),
    /// Fit one request document from a file or stdin and print the result.
    Fit(FitArgs),
}

/// Solver options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct SolverArgs {
    /// Iteration cap for the least squares solve.
    #[arg(long, env = "BINGHAM_MAX_ITERATIONS", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Parameter bounds applied to every fit.
    #[arg(long, env = "BINGHAM_BOUNDS", value_enum, default_value_t = BoundsPolicy::Unconstrained)]
    pub bounds: BoundsPolicy,
}

impl SolverArgs {
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            max_iterations: self.max_iterations,
            bounds: self.bounds,
        }
    }
}

/// Options for the HTTP service.
#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, env = "BINGHAM_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Options for a one-shot fit.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Request JSON (same schema as `POST /fit`). Reads stdin when omitted.
    #[arg(long, short = 'i', value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Also write the result JSON to this file.
    #[arg(long, short = 'o', value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Print a human-readable summary instead of JSON on stdout.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["bingham", "serve"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(args.solver.fit_config(), FitConfig::default());
    }

    #[test]
    fn fit_accepts_bounds_and_input() {
        let cli = Cli::parse_from([
            "bingham",
            "fit",
            "--input",
            "req.json",
            "--bounds",
            "non-negative",
            "--max-iterations",
            "50",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.input, Some(PathBuf::from("req.json")));
        assert_eq!(args.solver.bounds, BoundsPolicy::NonNegative);
        assert_eq!(args.solver.max_iterations, 50);
        assert!(!args.summary);
    }
}
