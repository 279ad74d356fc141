//! Typed route stops and the builder that lays them out.

use std::fmt;

use crate::error::InvalidInputError;
use crate::passenger::{PassengerRequest, Priority, is_blank};

/// What happens at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StopKind {
    /// The driver's current location.
    Start,
    /// A passenger gets in.
    Pickup,
    /// A passenger gets out.
    Dropoff,
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        })
    }
}

/// A single stop in the route.
///
/// `node` is the stop's row and column in the cost matrix, which is fetched
/// in builder order. It travels with the stop when the optimizer reorders the
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    /// Address of the stop.
    pub location: String,
    /// Role of the stop.
    pub kind: StopKind,
    /// Zero-based passenger index; `None` for the start.
    pub passenger: Option<usize>,
    /// Passenger priority; `None` for the start.
    pub priority: Option<Priority>,
    /// Index into the cost matrix.
    pub node: usize,
}

impl Waypoint {
    /// Construct the start stop at matrix node zero.
    pub fn start(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind: StopKind::Start,
            passenger: None,
            priority: None,
            node: 0,
        }
    }

    /// Whether this is the start stop.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self.kind, StopKind::Start)
    }
}

/// Lay out the start followed by each passenger's pickup and drop-off.
///
/// The result is `start, pickup₀, dropoff₀, pickup₁, dropoff₁, …`, with
/// matrix nodes numbered in that order.
///
/// # Errors
///
/// Returns [`InvalidInputError::MissingCurrentLocation`] for a blank start
/// and [`InvalidInputError::NoPassengers`] for an empty passenger list.
///
/// # Examples
/// ```
/// use rideshare_core::{PassengerRequest, StopKind, build_waypoints};
///
/// let passengers = vec![PassengerRequest::with_default_priority("B", "C")];
/// let waypoints = build_waypoints("A", &passengers)?;
/// let kinds: Vec<_> = waypoints.iter().map(|w| w.kind).collect();
/// assert_eq!(kinds, [StopKind::Start, StopKind::Pickup, StopKind::Dropoff]);
/// # Ok::<(), rideshare_core::InvalidInputError>(())
/// ```
pub fn build_waypoints(
    start: &str,
    passengers: &[PassengerRequest],
) -> Result<Vec<Waypoint>, InvalidInputError> {
    if is_blank(start) {
        return Err(InvalidInputError::MissingCurrentLocation);
    }
    if passengers.is_empty() {
        return Err(InvalidInputError::NoPassengers);
    }

    let mut waypoints = Vec::with_capacity(passengers.len() * 2 + 1);
    waypoints.push(Waypoint::start(start));
    for (passenger, request) in passengers.iter().enumerate() {
        for (kind, location) in [
            (StopKind::Pickup, &request.pickup),
            (StopKind::Dropoff, &request.dropoff),
        ] {
            let node = waypoints.len();
            waypoints.push(Waypoint {
                location: location.clone(),
                kind,
                passenger: Some(passenger),
                priority: Some(request.priority),
                node,
            });
        }
    }
    log::debug!(
        "built {} waypoints for {} passengers",
        waypoints.len(),
        passengers.len()
    );
    Ok(waypoints)
}

/// Locations in sequence order, as sent to the cost-matrix provider.
#[must_use]
pub fn locations(waypoints: &[Waypoint]) -> Vec<String> {
    waypoints.iter().map(|w| w.location.clone()).collect()
}

/// Whether the sequence starts with the start stop and every passenger's
/// pickup precedes their drop-off.
#[must_use]
pub fn is_well_ordered(waypoints: &[Waypoint]) -> bool {
    let starts_first = waypoints.first().is_some_and(Waypoint::is_start)
        && waypoints.iter().skip(1).all(|w| !w.is_start());
    starts_first
        && waypoints.iter().enumerate().all(|(index, stop)| {
            stop.kind != StopKind::Dropoff
                || waypoints.iter().take(index).any(|earlier| {
                    earlier.kind == StopKind::Pickup && earlier.passenger == stop.passenger
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn passengers() -> Vec<PassengerRequest> {
        vec![
            PassengerRequest::new("B", "C", 2).expect("valid priority"),
            PassengerRequest::new("D", "E", 5).expect("valid priority"),
        ]
    }

    #[rstest]
    fn interleaves_pickups_and_dropoffs(passengers: Vec<PassengerRequest>) {
        let waypoints = build_waypoints("A", &passengers).expect("valid input");
        let layout: Vec<_> = waypoints
            .iter()
            .map(|w| (w.location.as_str(), w.kind, w.passenger, w.node))
            .collect();
        assert_eq!(
            layout,
            [
                ("A", StopKind::Start, None, 0),
                ("B", StopKind::Pickup, Some(0), 1),
                ("C", StopKind::Dropoff, Some(0), 2),
                ("D", StopKind::Pickup, Some(1), 3),
                ("E", StopKind::Dropoff, Some(1), 4),
            ]
        );
    }

    #[rstest]
    fn copies_priorities_onto_both_stops(passengers: Vec<PassengerRequest>) {
        let waypoints = build_waypoints("A", &passengers).expect("valid input");
        let priorities: Vec<_> = waypoints.iter().map(|w| w.priority.map(Priority::get)).collect();
        assert_eq!(priorities, [None, Some(2), Some(2), Some(5), Some(5)]);
    }

    #[rstest]
    fn rejects_empty_passenger_list() {
        let err = build_waypoints("A", &[]).expect_err("no passengers");
        assert_eq!(err, InvalidInputError::NoPassengers);
    }

    #[rstest]
    fn rejects_blank_start(passengers: Vec<PassengerRequest>) {
        let err = build_waypoints(" ", &passengers).expect_err("blank start");
        assert_eq!(err, InvalidInputError::MissingCurrentLocation);
    }

    #[rstest]
    fn builder_output_is_well_ordered(passengers: Vec<PassengerRequest>) {
        let waypoints = build_waypoints("A", &passengers).expect("valid input");
        assert!(is_well_ordered(&waypoints));
    }

    #[rstest]
    fn dropoff_before_pickup_is_not_well_ordered(passengers: Vec<PassengerRequest>) {
        let mut waypoints = build_waypoints("A", &passengers).expect("valid input");
        waypoints.swap(1, 2);
        assert!(!is_well_ordered(&waypoints));
    }
}
