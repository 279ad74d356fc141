//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use rideshare_cli::CliError;

fn main() -> ExitCode {
    match rideshare_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            match err.kind() {
                Some(kind) => eprintln!("rideshare: [{kind}] {err}"),
                None => eprintln!("rideshare: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
