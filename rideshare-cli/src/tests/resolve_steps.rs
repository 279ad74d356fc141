//! Behaviour-driven step definitions driving the resolve CLI scenarios.

use super::helpers::StubResolverBuilder;
use super::*;
use crate::resolve::{ResolvedPlace, run_resolve_with};
use rideshare_core::{ErrorKind, PlaceResolutionError};
use rideshare_data::places::test_support::StubPlaceResolver;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct ResolveWorld {
    resolver: RefCell<StubPlaceResolver>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ResolveWorld {
    fn update(&self, change: impl FnOnce(StubPlaceResolver) -> StubPlaceResolver) {
        let current = self.resolver.take();
        self.resolver.replace(change(current));
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> ResolveWorld {
    ResolveWorld::default()
}

#[given("the share code {code} points at the place named {name}")]
fn share_code_points_at_place(#[from(world)] world: &ResolveWorld, code: String, name: String) {
    let code = code.trim_matches('"').to_owned();
    let target = format!(
        "https://www.google.com/maps/place/{}",
        name.trim_matches('"').replace(' ', "+")
    );
    world.update(|stub| stub.with_redirect(format!("https://maps.app.goo.gl/{code}"), target));
}

#[given("the place named {name} is at {address}")]
fn named_place_is_at(#[from(world)] world: &ResolveWorld, name: String, address: String) {
    let name = name.trim_matches('"').to_owned();
    let address = address.trim_matches('"').to_owned();
    world.update(|stub| stub.with_named_place(name, address));
}

#[given("the place service is failing")]
fn place_service_is_failing(#[from(world)] world: &ResolveWorld) {
    world.update(|_| {
        StubPlaceResolver::with_error(PlaceResolutionError::ServiceError {
            code: "REQUEST_DENIED".to_owned(),
            message: "The provided API key is invalid.".to_owned(),
        })
    });
}

#[when("I resolve {link}")]
fn resolve_link(#[from(world)] world: &ResolveWorld, link: String) {
    let argv = [
        "rideshare".to_owned(),
        "resolve".to_owned(),
        link.trim_matches('"').to_owned(),
        format!("--{ARG_API_KEY}"),
        "test-key".to_owned(),
    ];
    let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
    let builder = StubResolverBuilder(world.resolver.borrow().clone());
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Resolve(args) => {
            let config = args.into_config_with(|_| None)?;
            let mut buffer = world.stdout.borrow_mut();
            run_resolve_with(&config, &builder, &mut *buffer)
        }
        Command::Plan(_) => panic!("expected resolve command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the command prints the address {address}")]
fn command_prints_address(#[from(world)] world: &ResolveWorld, address: String) {
    {
        let borrowed = world.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
    }
    let printed: ResolvedPlace =
        serde_json::from_slice(&world.stdout.borrow()).expect("JSON output");
    assert_eq!(printed.address, address.trim_matches('"'));
}

#[then("the command fails because the text is not a share link")]
fn command_fails_not_share_link(#[from(world)] world: &ResolveWorld) {
    match &*world.error() {
        CliError::NotAShareLink { .. } => {}
        other => panic!("expected NotAShareLink, found {other:?}"),
    }
}

#[then("the command fails because no address was found")]
fn command_fails_no_address(#[from(world)] world: &ResolveWorld) {
    match &*world.error() {
        CliError::AddressNotFound { link } => assert_eq!(link, "https://maps.app.goo.gl/void"),
        other => panic!("expected AddressNotFound, found {other:?}"),
    }
}

#[then("the command fails with an upstream provider error")]
fn command_fails_upstream(#[from(world)] world: &ResolveWorld) {
    let err = world.error();
    assert!(matches!(&*err, CliError::Resolve { .. }));
    assert_eq!(err.kind(), Some(ErrorKind::UpstreamProvider));
}

macro_rules! register_resolve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/resolve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ResolveWorld) {
            let _ = world;
        }
    };
}

register_resolve_scenario!(resolve_bare_code, "resolving a bare share code");
register_resolve_scenario!(resolve_other_site, "rejecting links to other sites");
register_resolve_scenario!(resolve_no_address, "reporting links without an address");
register_resolve_scenario!(
    resolve_upstream_failure,
    "surfacing resolver failures as upstream errors"
);
