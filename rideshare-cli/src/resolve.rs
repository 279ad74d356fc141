//! Resolve command implementation for the rideshare CLI.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rideshare_core::PlaceResolver;
use rideshare_data::places::{
    HttpPlaceResolver, HttpPlaceResolverConfig, expand_share_code, is_map_share_link,
};
use rideshare_data::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, GoogleMapsCredentials};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_LINK, ARG_PLACES_BASE_URL, ARG_TIMEOUT_SECS, CliError, ENV_RESOLVE_LINK,
    fallback_api_key, process_env, require_credentials,
};

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Follow a Google Maps share link and print the formatted \
                 address it points at. A bare share code such as `abc123` \
                 is expanded to https://maps.app.goo.gl/abc123 first.",
    about = "Resolve a map share link to an address"
)]
#[ortho_config(prefix = "RIDESHARE")]
pub(crate) struct ResolveArgs {
    /// Share link or bare share code.
    #[arg(value_name = ARG_LINK)]
    #[serde(default)]
    pub(crate) link: Option<String>,
    /// Google Maps API key (falls back to GOOGLE_MAPS_API_KEY).
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Base URL of the Places and Geocoding services.
    #[arg(long = ARG_PLACES_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) places_base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ResolveArgs {
    pub(crate) fn into_config_with(
        self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<ResolveConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.api_key = fallback_api_key(merged.api_key.take(), lookup);
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolveConfig {
    /// Full share URL.
    pub(crate) link: String,
    /// Places and Geocoding credentials.
    pub(crate) credentials: GoogleMapsCredentials,
    /// Base URL of the web services.
    pub(crate) places_base_url: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let raw = args
            .link
            .filter(|link| !link.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_LINK,
                env: ENV_RESOLVE_LINK,
            })?;
        let link = expand_share_code(&raw);
        if !(is_url(&raw) || is_share_code(&raw)) || !is_map_share_link(&link) {
            return Err(CliError::NotAShareLink { link: raw });
        }
        let credentials = require_credentials(args.api_key)?;
        Ok(Self {
            link,
            credentials,
            places_base_url: args
                .places_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn is_url(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with("http://") || trimmed.starts_with("https://")
}

/// Share codes are short runs of letters, digits, `-` and `_`.
fn is_share_code(text: &str) -> bool {
    text.trim()
        .trim_start_matches('/')
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ResolvedPlace {
    pub(crate) address: String,
}

/// Builds a resolver for the current resolve invocation.
pub(crate) trait ResolverBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<Box<dyn PlaceResolver>, CliError>;
}

pub(crate) struct DefaultResolverBuilder;

impl ResolverBuilder for DefaultResolverBuilder {
    fn build(&self, config: &ResolveConfig) -> Result<Box<dyn PlaceResolver>, CliError> {
        let resolver_config = HttpPlaceResolverConfig::new(config.credentials.clone())
            .with_base_url(config.places_base_url.clone())
            .with_timeout(config.timeout);
        let resolver = HttpPlaceResolver::with_config(resolver_config).map_err(|source| {
            CliError::BuildProvider {
                provider: "place resolver",
                base_url: config.places_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(resolver))
    }
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let config = args.into_config_with(process_env)?;
    run_resolve_with(&config, &DefaultResolverBuilder, &mut stdout)
}

pub(crate) fn run_resolve_with(
    config: &ResolveConfig,
    builder: &dyn ResolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let resolver = builder.build(config)?;
    let address = resolver
        .resolve_short_link(&config.link)
        .map_err(|source| CliError::Resolve {
            link: config.link.clone(),
            source,
        })?
        .ok_or_else(|| CliError::AddressNotFound {
            link: config.link.clone(),
        })?;
    let payload = serde_json::to_string_pretty(&ResolvedPlace { address })
        .map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
