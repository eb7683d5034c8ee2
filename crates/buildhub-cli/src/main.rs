//! BuildHub CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildhub_core::error::{AppError, ErrorKind};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.message);
            exit_code(&e)
        }
    }
}

/// Log level for the number of `-v` flags. `RUST_LOG` takes precedence.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `2` for mistakes in the command's input, `1` for everything else.
fn exit_code(err: &AppError) -> ExitCode {
    match err.kind {
        ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(9), "trace");
    }

    #[test]
    fn test_user_errors_exit_with_two() {
        assert_eq!(exit_code(&AppError::not_found("Folder not found")), ExitCode::from(2));
        assert_eq!(exit_code(&AppError::database("Database is not reachable")), ExitCode::FAILURE);
    }
}
