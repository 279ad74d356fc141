//! Plan command implementation for the rideshare CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rideshare_core::{OptimizedRoute, PlanRequest, RoutePlanner};
use rideshare_data::routing::{HttpCostMatrixProvider, HttpCostMatrixProviderConfig};
use rideshare_data::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, GoogleMapsCredentials};
use rideshare_solver::{DEFAULT_MAX_PASSES, SwapPlanner, SwapPlannerConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_API_KEY, ARG_MATRIX_BASE_URL, ARG_MAX_PASSES, ARG_PLAN_REQUEST, ARG_TIMEOUT_SECS,
    CliError, ENV_PLAN_REQUEST, fallback_api_key, process_env, require_credentials,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Optimize the visiting order for a driver and their \
                 passengers. The request is a JSON file with \
                 `currentLocation` and `passengers` (`pickup`, `dropoff`, \
                 optional `priority` 1-6). Travel costs come from the Google \
                 Distance Matrix API.",
    about = "Plan an optimized pickup and drop-off route"
)]
#[ortho_config(prefix = "RIDESHARE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Google Maps API key (falls back to GOOGLE_MAPS_API_KEY).
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Base URL of the Distance Matrix service.
    #[arg(long = ARG_MATRIX_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) matrix_base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Upper bound on optimizer sweeps.
    #[arg(long = ARG_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_passes: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config_with(
        self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<PlanConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.api_key = fallback_api_key(merged.api_key.take(), lookup);
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Distance Matrix credentials.
    pub(crate) credentials: GoogleMapsCredentials,
    /// Base URL of the Distance Matrix service.
    pub(crate) matrix_base_url: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
    /// Optimizer sweep bound.
    pub(crate) max_passes: usize,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let field = ARG_PLAN_REQUEST;
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let credentials = require_credentials(args.api_key)?;
        Ok(Self {
            request_path,
            credentials,
            matrix_base_url: args
                .matrix_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            max_passes: args.max_passes.unwrap_or(DEFAULT_MAX_PASSES),
        })
    }
}

/// Builds a planner for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RoutePlanner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RoutePlanner>, CliError> {
        let provider_config = HttpCostMatrixProviderConfig::new(config.credentials.clone())
            .with_base_url(config.matrix_base_url.clone())
            .with_timeout(config.timeout);
        let provider = HttpCostMatrixProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildProvider {
                provider: "distance matrix provider",
                base_url: config.matrix_base_url.clone(),
                source,
            }
        })?;
        let planner_config = SwapPlannerConfig::default().with_max_passes(config.max_passes);
        Ok(Box::new(SwapPlanner::with_config(provider, planner_config)))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlannerBuilder;
    let config = args.into_config_with(process_env)?;
    run_plan_with(&config, &builder, &mut stdout)
}

pub(crate) fn run_plan_with(
    config: &PlanConfig,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_plan(config, builder)?;
    write_route(writer, &route)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlannerBuilder,
) -> Result<OptimizedRoute, CliError> {
    config.validate_sources()?;
    let request = load_plan_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;
    debug!(
        "planning route for {} passengers from {}",
        request.passengers.len(),
        config.request_path
    );
    let planner = builder.build(config)?;
    planner
        .optimize_route(&request)
        .map_err(|source| CliError::Plan { source })
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route(writer: &mut dyn Write, route: &OptimizedRoute) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
