//! Facade crate for the rideshare route planner.
//!
//! This crate re-exports the core domain types and exposes the swap
//! optimizer and the Google Maps backed providers behind feature flags.

#![forbid(unsafe_code)]

pub use rideshare_core::{
    CostMatrix, CostMatrixError, CostMatrixProvider, ErrorKind, InvalidInputError, MapLinks,
    OptimizedRoute, PassengerRequest, PlaceResolutionError, PlaceResolver, PlanError, PlanRequest,
    Priority, RoutePlanner, RouteStop, StopKind, TravelCost,
};

#[cfg(feature = "solver-swap")]
pub use rideshare_solver::{SwapPlanner, SwapPlannerConfig};

#[cfg(feature = "http-providers")]
pub use rideshare_data::{
    GoogleMapsCredentials,
    places::{HttpPlaceResolver, HttpPlaceResolverConfig},
    routing::{HttpCostMatrixProvider, HttpCostMatrixProviderConfig},
};
