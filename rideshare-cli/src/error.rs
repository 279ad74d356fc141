//! Error types emitted by the rideshare CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rideshare_core::{ErrorKind, InvalidInputError, PlanError, PlaceResolutionError};
use rideshare_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the rideshare CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: InvalidInputError,
    },
    /// The text passed to `resolve` is not a map share link.
    #[error("{link:?} is not a Google Maps share link")]
    NotAShareLink { link: String },
    /// Constructing an HTTP provider failed.
    #[error("failed to build {provider} for {base_url:?}: {source}")]
    BuildProvider {
        provider: &'static str,
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request or a provider failed.
    #[error("route planning failed: {source}")]
    Plan {
        #[source]
        source: PlanError,
    },
    /// The share link could not be resolved.
    #[error("failed to resolve {link:?}: {source}")]
    Resolve {
        link: String,
        #[source]
        source: PlaceResolutionError,
    },
    /// The share link resolved, but to no recognisable place.
    #[error("could not extract an address from {link:?}")]
    AddressNotFound { link: String },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Machine-readable category, or `None` for local output failures.
    ///
    /// Missing credentials are configuration errors and failures of the map
    /// services are upstream errors. Everything else is the caller's input.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::SerializeOutput(_) | Self::WriteOutput(_) => None,
            Self::Configuration(_) | Self::BuildProvider { .. } => Some(ErrorKind::Configuration),
            Self::MissingArgument { field, .. } if *field == crate::ARG_API_KEY => {
                Some(ErrorKind::Configuration)
            }
            Self::Plan { source } => Some(source.kind()),
            Self::Resolve { .. } => Some(ErrorKind::UpstreamProvider),
            _ => Some(ErrorKind::InvalidInput),
        }
    }
}
