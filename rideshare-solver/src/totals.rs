//! Distance and duration accumulated along a finished sequence.

use rideshare_core::{CostMatrix, RouteTotals, StopKind, Waypoint};

/// Time spent at a stop before driving on, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimes {
    /// Seconds spent collecting a passenger.
    pub pickup_secs: u64,
    /// Seconds spent letting a passenger out.
    pub dropoff_secs: u64,
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            pickup_secs: 3 * 60,
            dropoff_secs: 2 * 60,
        }
    }
}

impl ServiceTimes {
    /// Service time for leaving a stop of `kind`; the start has none.
    #[must_use]
    pub const fn for_stop(&self, kind: StopKind) -> u64 {
        match kind {
            StopKind::Start => 0,
            StopKind::Pickup => self.pickup_secs,
            StopKind::Dropoff => self.dropoff_secs,
        }
    }
}

/// Sum the legs between consecutive stops.
///
/// Each usable leg adds its distance, its duration and the service time of
/// the stop it departs from. Legs the matrix marks unavailable are skipped
/// entirely, service time included.
///
/// # Examples
/// ```
/// use rideshare_core::{CostMatrix, PassengerRequest, TravelCost, build_waypoints};
/// use rideshare_solver::{ServiceTimes, route_totals};
///
/// let passengers = vec![PassengerRequest::with_default_priority("B", "C")];
/// let waypoints = build_waypoints("A", &passengers)?;
/// let matrix = CostMatrix::from_fn(3, |_, _| TravelCost::ok(1_000, 60));
///
/// let totals = route_totals(&waypoints, &matrix, ServiceTimes::default());
/// assert_eq!(totals.distance_meters, 2_000);
/// assert_eq!(totals.duration_secs, 60 + 60 + 180);
/// # Ok::<(), rideshare_core::InvalidInputError>(())
/// ```
#[must_use]
pub fn route_totals(
    waypoints: &[Waypoint],
    matrix: &CostMatrix,
    service_times: ServiceTimes,
) -> RouteTotals {
    let mut totals = RouteTotals::default();
    let mut skipped = 0_usize;
    for (from, to) in waypoints.iter().zip(waypoints.iter().skip(1)) {
        if let Some(cost) = matrix.leg(from.node, to.node) {
            totals.distance_meters += cost.distance_meters;
            totals.duration_secs += cost.duration_secs + service_times.for_stop(from.kind);
        } else {
            skipped += 1;
            log::warn!(
                "no usable leg from {:?} to {:?}; excluded from totals",
                from.location,
                to.location
            );
        }
    }
    if skipped > 0 {
        log::debug!("route totals skipped {skipped} unavailable legs");
    }
    totals
}
