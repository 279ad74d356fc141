//! Command-line interface for the rideshare route planner.
//!
//! `rideshare plan <request.json>` prints the optimized route for a JSON
//! plan request. `rideshare resolve <link-or-code>` prints the address a
//! Google Maps share link points at. Options are layered with
//! `ortho_config`: defaults, then configuration files, then `RIDESHARE_`
//! environment variables, then flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use rideshare_data::{GOOGLE_MAPS_API_KEY_ENV, GoogleMapsCredentials};

mod error;
mod fs;
mod plan;
mod resolve;

pub use error::CliError;

use plan::PlanArgs;
use resolve::ResolveArgs;

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_MATRIX_BASE_URL: &str = "matrix-base-url";
pub(crate) const ARG_PLACES_BASE_URL: &str = "places-base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_MAX_PASSES: &str = "max-passes";
pub(crate) const ARG_LINK: &str = "link";
pub(crate) const ENV_PLAN_REQUEST: &str = "RIDESHARE_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_RESOLVE_LINK: &str = "RIDESHARE_CMDS_RESOLVE_LINK";

/// Run the rideshare CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Resolve(args) => resolve::run_resolve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rideshare",
    about = "Plan multi-passenger pickup and drop-off routes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize the stop order for a JSON plan request.
    Plan(PlanArgs),
    /// Resolve a Google Maps share link to a postal address.
    Resolve(ResolveArgs),
}

/// Environment lookup used when no API key was layered in.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Fill a missing API key from [`GOOGLE_MAPS_API_KEY_ENV`] through `lookup`.
pub(crate) fn fallback_api_key(
    api_key: Option<String>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Option<String> {
    api_key.or_else(|| lookup(GOOGLE_MAPS_API_KEY_ENV))
}

/// Turn the merged API key into credentials; blank counts as missing.
pub(crate) fn require_credentials(
    api_key: Option<String>,
) -> Result<GoogleMapsCredentials, CliError> {
    api_key
        .and_then(|key| GoogleMapsCredentials::new(key).ok())
        .ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: GOOGLE_MAPS_API_KEY_ENV,
        })
}

#[cfg(test)]
mod tests;
