//! # sdklic CLI entry point
//!
//! Parses `KEY=VALUE` run parameters, initialises logging, and runs the
//! license generation batch.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sdklic_cli::{parse_param, run_generate, RunParams};

/// Write combined third-party license files for SDK binaries.
///
/// Required parameters: os=<macos|windows|linux|darwin> files=<key;key;...>
/// arch=<x86|x86_64> dest=<dir>. Optional: regenerate_all, sdk=<path>,
/// version=<x.y.z>, registry=<url>, corrections=<file.yaml>.
#[derive(Parser, Debug)]
#[command(name = "sdklic", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run parameters.
    #[arg(value_name = "KEY=VALUE", value_parser = parse_param, required = true)]
    params: Vec<(String, String)>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let params = match RunParams::from_pairs(&cli.params) {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    match run_generate(&params).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
