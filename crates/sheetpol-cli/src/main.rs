//! sheetpol
//!
//! Converts an access-rule spreadsheet into CiliumNetworkPolicy YAML.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sheetpol_cli::{Cli, Error};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only status lines
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match Cli::try_parse_args(std::env::args_os()).and_then(Cli::run) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                // clap renders its own usage, help and version text
                Error::Usage(usage) => {
                    let _ = usage.print();
                }
                other => eprintln!("error: {}", other),
            }
            ExitCode::from(err.exit_status())
        }
    }
}
