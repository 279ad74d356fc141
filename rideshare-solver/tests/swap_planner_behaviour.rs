//! Behavioural tests for `SwapPlanner` using rstest-bdd.

use std::cell::RefCell;

use rideshare_core::test_support::{LineCostMatrixProvider, UniformCostMatrixProvider};
use rideshare_core::{
    CostMatrix, CostMatrixError, CostMatrixProvider, OptimizedRoute, PassengerRequest, PlanError,
    PlanRequest, RoutePlanner, StopKind,
};
use rideshare_solver::SwapPlanner;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Clone, Copy, Default)]
enum ProviderChoice {
    #[default]
    Uniform,
    Line,
    Failing,
}

impl CostMatrixProvider for ProviderChoice {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        match self {
            Self::Uniform => UniformCostMatrixProvider::default().get_matrix(locations),
            Self::Line => LineCostMatrixProvider.get_matrix(locations),
            Self::Failing => Err(CostMatrixError::Timeout {
                url: "https://maps.example/distancematrix".to_owned(),
                timeout_secs: 30,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct PlannerWorld {
    provider: RefCell<ProviderChoice>,
    request: RefCell<PlanRequest>,
    outcome: RefCell<Option<Result<OptimizedRoute, PlanError>>>,
}

impl PlannerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_route(&self) -> OptimizedRoute {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected planning success")
    }

    fn locations(&self) -> Vec<String> {
        self.expect_route()
            .waypoints
            .into_iter()
            .map(|stop| stop.location)
            .collect()
    }
}

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

#[given("a uniform cost matrix provider")]
fn given_uniform(world: &PlannerWorld) {
    world.provider.replace(ProviderChoice::Uniform);
}

#[given("a straight road provider")]
fn given_line(world: &PlannerWorld) {
    world.provider.replace(ProviderChoice::Line);
}

#[given("a failing cost matrix provider")]
fn given_failing(world: &PlannerWorld) {
    world.provider.replace(ProviderChoice::Failing);
}

#[given("the driver is at {location}")]
fn given_start(world: &PlannerWorld, location: String) {
    world.request.borrow_mut().current_location = unquote(&location).to_owned();
}

#[given("a passenger from {pickup} to {dropoff} with priority {priority}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_passenger(world: &PlannerWorld, pickup: String, dropoff: String, priority: u8) {
    let passenger = PassengerRequest::new(unquote(&pickup), unquote(&dropoff), priority)
        .expect("scenario priorities are in range");
    world.request.borrow_mut().passengers.push(passenger);
}

#[when("the route is planned")]
fn when_planned(world: &PlannerWorld) {
    let planner = SwapPlanner::new(*world.provider.borrow());
    let outcome = planner.optimize_route(&world.request.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the visiting order is {stops}")]
fn then_stops(world: &PlannerWorld, stops: String) {
    let expected: Vec<&str> = unquote(&stops).split(", ").collect();
    assert_eq!(world.locations(), expected);
}

#[then("the stops are numbered from 1")]
fn then_numbered(world: &PlannerWorld) {
    let route = world.expect_route();
    let orders: Vec<usize> = route.waypoints.iter().map(|s| s.order).collect();
    let expected: Vec<usize> = (1..=route.waypoints.len()).collect();
    assert_eq!(orders, expected);
}

#[then("the pickup at {first} comes before the pickup at {second}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_pickup_order(world: &PlannerWorld, first: String, second: String) {
    let route = world.expect_route();
    let position = |location: &str| {
        route
            .waypoints
            .iter()
            .position(|s| s.kind == StopKind::Pickup && s.location == location)
            .expect("pickup should be in the route")
    };
    assert!(position(unquote(&first)) < position(unquote(&second)));
}

#[then("every pickup precedes its drop-off")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_precedence(world: &PlannerWorld) {
    let locations = world.locations();
    let index = |location: &str| {
        locations
            .iter()
            .position(|l| l == location)
            .expect("stop should be in the route")
    };
    for passenger in &world.request.borrow().passengers {
        assert!(index(&passenger.pickup) < index(&passenger.dropoff));
    }
}

#[then("the total distance is {distance}")]
fn then_distance(world: &PlannerWorld, distance: String) {
    assert_eq!(world.expect_route().total_distance, unquote(&distance));
}

#[then("the total time is {time}")]
fn then_time(world: &PlannerWorld, time: String) {
    assert_eq!(world.expect_route().total_time, unquote(&time));
}

#[then("planning fails with kind {kind}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_fails(world: &PlannerWorld, kind: String) {
    let err = world
        .outcome
        .borrow()
        .clone()
        .expect("outcome should be recorded before assertions")
        .expect_err("expected planning failure");
    assert_eq!(err.kind().as_str(), unquote(&kind));
}

#[scenario(path = "tests/features/swap_planner.feature", index = 0)]
fn single_passenger(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/swap_planner.feature", index = 1)]
fn nearby_pickup_collected_on_the_way(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/swap_planner.feature", index = 2)]
fn overlapping_rides(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/swap_planner.feature", index = 3)]
fn unreachable_leg(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/swap_planner.feature", index = 4)]
fn failing_provider(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/swap_planner.feature", index = 5)]
fn no_passengers(world: PlannerWorld) {
    let _ = world;
}
