//! Test helpers for writing request fixtures and stub builders.

use camino::{Utf8Path, Utf8PathBuf};
use rideshare_core::{PlaceResolver, RoutePlanner};
use rideshare_core::test_support::UniformCostMatrixProvider;
use rideshare_data::GoogleMapsCredentials;
use rideshare_data::places::test_support::StubPlaceResolver;
use rideshare_solver::SwapPlanner;
use std::time::Duration;
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{PlanConfig, PlannerBuilder};
use crate::resolve::{ResolveConfig, ResolverBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Temporary directory with a UTF-8 root.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn credentials() -> GoogleMapsCredentials {
    GoogleMapsCredentials::new("test-key").expect("valid key")
}

pub(super) fn plan_config(request_path: Utf8PathBuf) -> PlanConfig {
    PlanConfig {
        request_path,
        credentials: credentials(),
        matrix_base_url: "https://maps.googleapis.com".to_owned(),
        timeout: Duration::from_secs(30),
        max_passes: 1_000,
    }
}

pub(super) const ONE_PASSENGER: &str = r#"{
    "currentLocation": "1 Main St",
    "passengers": [{"pickup": "2 Oak Ave", "dropoff": "3 Elm Rd", "priority": 2}]
}"#;

/// Builds a swap planner over one-kilometre, one-minute legs.
pub(super) struct UniformPlannerBuilder;

impl PlannerBuilder for UniformPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn RoutePlanner>, CliError> {
        Ok(Box::new(SwapPlanner::new(UniformCostMatrixProvider::default())))
    }
}

pub(super) fn resolve_config(link: &str) -> ResolveConfig {
    ResolveConfig {
        link: link.to_owned(),
        credentials: credentials(),
        places_base_url: "https://maps.googleapis.com".to_owned(),
        timeout: Duration::from_secs(30),
    }
}

/// Hands out clones of a prepared stub resolver.
pub(super) struct StubResolverBuilder(pub(super) StubPlaceResolver);

impl ResolverBuilder for StubResolverBuilder {
    fn build(&self, _config: &ResolveConfig) -> Result<Box<dyn PlaceResolver>, CliError> {
        Ok(Box::new(self.0.clone()))
    }
}
