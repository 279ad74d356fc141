//! External-service adapters for the rideshare planner.
//!
//! Responsibilities:
//! - Implement the core provider traits over the Google Maps web services.
//! - Parse map-share links pasted by users.
//! - Read provider credentials from the environment.
//!
//! Boundaries:
//! - Do not encode routing rules (live in `rideshare-core` and
//!   `rideshare-solver`).
//! - Keep blocking I/O off async executors; the providers bridge to their own
//!   runtime when called from synchronous code.
//!
//! Invariants:
//! - API keys never appear in error messages or logs.
//! - No global mutable state.

pub mod credentials;
mod http;
pub mod places;
pub mod routing;

pub use credentials::{ConfigurationError, GOOGLE_MAPS_API_KEY_ENV, GoogleMapsCredentials};
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ProviderBuildError};
