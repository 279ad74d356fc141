//! Error taxonomy shared by every planning component.
//!
//! Caller-visible failures carry a machine-readable [`ErrorKind`] alongside
//! the human-readable `Display` message.

use std::fmt;

use thiserror::Error;

use crate::cost_matrix::CostMatrixError;
use crate::place::PlaceResolutionError;

/// Machine-readable category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied incomplete or out-of-range input.
    InvalidInput,
    /// An external provider failed or returned unusable data.
    UpstreamProvider,
    /// Required provider credentials or settings are missing.
    Configuration,
}

impl ErrorKind {
    /// Stable identifier suitable for API responses and exit diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::UpstreamProvider => "upstream_provider_error",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input validation failures. Passenger indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The driver's current location was blank.
    #[error("current location is required")]
    MissingCurrentLocation,
    /// No passengers were supplied.
    #[error("at least one passenger is required")]
    NoPassengers,
    /// A passenger had a blank pickup address.
    #[error("passenger {passenger}: pickup location is required")]
    MissingPickup {
        /// Index of the offending passenger.
        passenger: usize,
    },
    /// A passenger had a blank drop-off address.
    #[error("passenger {passenger}: drop-off location is required")]
    MissingDropoff {
        /// Index of the offending passenger.
        passenger: usize,
    },
    /// A priority fell outside the accepted range.
    #[error("passenger {passenger}: priority {priority} is outside 1..=6")]
    PriorityOutOfRange {
        /// Index of the offending passenger.
        passenger: usize,
        /// The rejected value.
        priority: u8,
    },
}

/// Errors returned by [`RoutePlanner::optimize_route`](crate::RoutePlanner::optimize_route).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The cost matrix could not be retrieved or did not cover the route.
    #[error("cost matrix provider failed: {0}")]
    CostMatrix(#[from] CostMatrixError),
    /// A share link could not be resolved.
    #[error("place resolver failed: {0}")]
    PlaceResolution(#[from] PlaceResolutionError),
}

impl PlanError {
    /// Machine-readable category of this error.
    ///
    /// # Examples
    /// ```
    /// use rideshare_core::{ErrorKind, InvalidInputError, PlanError};
    ///
    /// let err = PlanError::from(InvalidInputError::NoPassengers);
    /// assert_eq!(err.kind(), ErrorKind::InvalidInput);
    /// assert_eq!(err.kind().as_str(), "invalid_input");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_)
            | Self::CostMatrix(CostMatrixError::UnsupportedLocation { .. }) => {
                ErrorKind::InvalidInput
            }
            Self::CostMatrix(_) | Self::PlaceResolution(_) => ErrorKind::UpstreamProvider,
        }
    }
}
