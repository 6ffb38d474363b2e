//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the HTTP service, or a one-shot fit from a JSON document

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FitArgs, ServeArgs};
use crate::error::AppError;
use crate::server::AppState;

pub mod pipeline;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "bingham_fit=info";

/// Entry point for the `bingham` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // We want `bingham` and `bingham --bind ...` to behave like `bingham serve ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Fit(args) => handle_fit(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let state = AppState {
        config: args.solver.fit_config(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(2, format!("Failed to start async runtime: {e}")))?;

    runtime.block_on(crate::server::serve(args.bind, state))
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = args.solver.fit_config();
    let request = crate::io::read_request_json(args.input.as_deref())?;
    let output = pipeline::run_fit(&request, &config)?;

    if args.summary {
        println!("{}", crate::report::format_fit_summary(&request, &output, &config));
    } else {
        crate::io::write_result_json(std::io::stdout().lock(), &output.result)?;
    }

    if let Some(path) = &args.output {
        crate::io::write_result_file(path, &output.result)?;
    }

    Ok(())
}

/// Rewrite argv so `bingham` defaults to `bingham serve`.
///
/// Rules:
/// - `bingham`                      -> `bingham serve`
/// - `bingham --bind ADDR ...`      -> `bingham serve --bind ADDR ...`
/// - `bingham --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "serve" | "fit");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "serve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
