//! Core domain types for the rideshare route planner.
//!
//! The crate defines the request and response model, the typed waypoint
//! sequence the optimizer works on, and the traits that abstract external
//! services: [`CostMatrixProvider`] for travel costs, [`PlaceResolver`] for
//! share links and [`RoutePlanner`] for the end-to-end planning step.
//! Constructors and [`PlanRequest::validate`] return `Result` so invalid
//! input surfaces before any provider is called.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost_matrix;
pub mod error;
pub mod passenger;
pub mod place;
mod planner;
pub mod route;
pub mod summary;
pub mod waypoint;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost_matrix::{CostMatrix, CostMatrixError, CostMatrixProvider, ElementStatus, TravelCost};
pub use error::{ErrorKind, InvalidInputError, PlanError};
pub use passenger::{PassengerRequest, PlanRequest, Priority};
pub use place::{PlaceResolutionError, PlaceResolver};
pub use planner::RoutePlanner;
pub use route::{MapLinks, MapProvider, OptimizedRoute, RouteStop};
pub use summary::{RouteTotals, summarise};
pub use waypoint::{StopKind, Waypoint, build_waypoints, is_well_ordered, locations};
