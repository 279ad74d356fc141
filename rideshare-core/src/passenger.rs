//! Passenger requests and the validated planning request.
//!
//! A [`PlanRequest`] is the caller-facing payload: the driver's current
//! location followed by the passengers to collect, in the order they were
//! entered. [`PlanRequest::validate`] reports the first missing field so the
//! caller can point the user at it.

use std::fmt;

use crate::error::InvalidInputError;

/// Urgency of a passenger request; higher values are more urgent.
///
/// Priorities are bounded to [`Priority::MIN`]`..=`[`Priority::MAX`]. The
/// default is the lowest priority.
///
/// # Examples
/// ```
/// use rideshare_core::Priority;
///
/// let urgent = Priority::new(5).expect("in range");
/// assert!(urgent > Priority::default());
/// assert!(Priority::new(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Priority(u8);

impl Priority {
    /// Lowest accepted priority.
    pub const MIN: Self = Self(1);
    /// Highest accepted priority.
    pub const MAX: Self = Self(6);

    /// Validate and wrap a raw priority value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::PriorityOutOfRange`] when `value` lies
    /// outside `1..=6`. The passenger index on the error is zero; callers
    /// that know the passenger should use [`PassengerRequest::new`].
    pub const fn new(value: u8) -> Result<Self, InvalidInputError> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(InvalidInputError::PriorityOutOfRange {
                passenger: 0,
                priority: value,
            });
        }
        Ok(Self(value))
    }

    /// Raw priority value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidInputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single passenger to be picked up and dropped off.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerRequest {
    /// Address where the passenger is collected.
    pub pickup: String,
    /// Address where the passenger leaves the car.
    pub dropoff: String,
    /// Urgency of this passenger.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: Priority,
}

impl PassengerRequest {
    /// Construct a request from raw parts, validating the priority.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::PriorityOutOfRange`] when `priority` is
    /// outside the accepted range.
    pub fn new(
        pickup: impl Into<String>,
        dropoff: impl Into<String>,
        priority: u8,
    ) -> Result<Self, InvalidInputError> {
        Ok(Self {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
            priority: Priority::new(priority)?,
        })
    }

    /// Construct a request with the default priority.
    pub fn with_default_priority(pickup: impl Into<String>, dropoff: impl Into<String>) -> Self {
        Self {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
            priority: Priority::default(),
        }
    }
}

/// The full input of a single route planning call.
///
/// # Examples
/// ```
/// use rideshare_core::{PassengerRequest, PlanRequest};
///
/// let request = PlanRequest::new(
///     "1 Main St",
///     vec![PassengerRequest::with_default_priority("2 Oak Ave", "3 Pine Rd")],
/// );
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PlanRequest {
    /// Where the driver currently is; always the first stop.
    pub current_location: String,
    /// Passengers in entry order.
    pub passengers: Vec<PassengerRequest>,
}

impl PlanRequest {
    /// Construct a request without validating it.
    pub fn new(current_location: impl Into<String>, passengers: Vec<PassengerRequest>) -> Self {
        Self {
            current_location: current_location.into(),
            passengers,
        }
    }

    /// Check that every required field is present.
    ///
    /// Blank or whitespace-only addresses count as missing.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidInputError`] found, checking the current
    /// location, then the passenger list, then each passenger in order.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if is_blank(&self.current_location) {
            return Err(InvalidInputError::MissingCurrentLocation);
        }
        if self.passengers.is_empty() {
            return Err(InvalidInputError::NoPassengers);
        }
        for (passenger, request) in self.passengers.iter().enumerate() {
            if is_blank(&request.pickup) {
                return Err(InvalidInputError::MissingPickup { passenger });
            }
            if is_blank(&request.dropoff) {
                return Err(InvalidInputError::MissingDropoff { passenger });
            }
        }
        Ok(())
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
