//! Deterministic in-memory providers used by unit and behaviour tests.

use std::collections::HashMap;

use crate::{
    CostMatrix, CostMatrixError, CostMatrixProvider, PassengerRequest, PlaceResolutionError,
    PlaceResolver, PlanRequest, Priority, TravelCost,
};

/// Metres per kilometre marker on the test road.
const METERS_PER_KM: u64 = 1_000;

/// Seconds to drive one kilometre on the test road.
const SECS_PER_KM: u64 = 60;

/// Build a plan request from `(pickup, dropoff, priority)` triples.
///
/// Priorities outside `1..=6` are clamped into range.
///
/// # Examples
/// ```rust
/// use rideshare_core::test_support::plan_request;
///
/// let request = plan_request("A", &[("B", "C", 9)]);
/// assert_eq!(request.passengers[0].priority.get(), 6);
/// ```
#[must_use]
pub fn plan_request(start: &str, passengers: &[(&str, &str, u8)]) -> PlanRequest {
    PlanRequest::new(
        start,
        passengers
            .iter()
            .map(|&(pickup, dropoff, priority)| PassengerRequest {
                pickup: pickup.to_owned(),
                dropoff: dropoff.to_owned(),
                priority: Priority::try_from(
                    priority.clamp(Priority::MIN.get(), Priority::MAX.get()),
                )
                .unwrap_or_default(),
            })
            .collect(),
    )
}

/// `CostMatrixProvider` returning the same leg between every pair of
/// distinct locations and a zero diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformCostMatrixProvider {
    leg: TravelCost,
}

impl UniformCostMatrixProvider {
    /// Use `distance_meters` and `duration_secs` for every off-diagonal leg.
    #[must_use]
    pub const fn new(distance_meters: u64, duration_secs: u64) -> Self {
        Self {
            leg: TravelCost::ok(distance_meters, duration_secs),
        }
    }
}

impl Default for UniformCostMatrixProvider {
    /// One kilometre, one minute.
    fn default() -> Self {
        Self::new(1_000, 60)
    }
}

impl CostMatrixProvider for UniformCostMatrixProvider {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        if locations.is_empty() {
            return Err(CostMatrixError::EmptyInput);
        }
        Ok(CostMatrix::from_fn(locations.len(), |from, to| {
            if from == to {
                TravelCost::ok(0, 0)
            } else {
                self.leg
            }
        }))
    }
}

/// `CostMatrixProvider` that returns a prepared matrix or error verbatim.
///
/// Useful for exercising dimension checks and upstream failures.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCostMatrixProvider {
    response: Result<CostMatrix, CostMatrixError>,
}

impl FixedCostMatrixProvider {
    /// Always return `matrix`.
    #[must_use]
    pub const fn new(matrix: CostMatrix) -> Self {
        Self {
            response: Ok(matrix),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: CostMatrixError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl CostMatrixProvider for FixedCostMatrixProvider {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        if locations.is_empty() {
            return Err(CostMatrixError::EmptyInput);
        }
        self.response.clone()
    }
}

/// `PlaceResolver` backed by a fixed link-to-address table.
#[derive(Debug, Clone, Default)]
pub struct MapPlaceResolver {
    addresses: HashMap<String, String>,
}

impl MapPlaceResolver {
    /// Register `address` as the resolution of `url`.
    #[must_use]
    pub fn with(mut self, url: impl Into<String>, address: impl Into<String>) -> Self {
        self.addresses.insert(url.into(), address.into());
        self
    }
}

impl PlaceResolver for MapPlaceResolver {
    fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError> {
        if url.trim().is_empty() {
            return Err(PlaceResolutionError::InvalidUrl {
                url: url.to_owned(),
            });
        }
        Ok(self.addresses.get(url).cloned())
    }
}

/// Parse a `"km N"` location into its marker.
fn marker(location: &str) -> Option<u64> {
    location.trim().strip_prefix("km")?.trim().parse().ok()
}

/// Matrix for stops at the given kilometre markers on a straight road.
///
/// A leg between markers `a` and `b` covers `|a - b|` kilometres at one
/// minute per kilometre.
#[must_use]
pub fn line_matrix(markers: &[u64]) -> CostMatrix {
    let known: Vec<Option<u64>> = markers.iter().copied().map(Some).collect();
    matrix_for_markers(&known)
}

fn matrix_for_markers(markers: &[Option<u64>]) -> CostMatrix {
    CostMatrix::from_fn(markers.len(), |from, to| {
        match (
            markers.get(from).copied().flatten(),
            markers.get(to).copied().flatten(),
        ) {
            (Some(a), Some(b)) => {
                let km = a.abs_diff(b);
                TravelCost::ok(km * METERS_PER_KM, km * SECS_PER_KM)
            }
            _ if from == to => TravelCost::ok(0, 0),
            _ => TravelCost::unavailable(),
        }
    })
}

/// A [`CostMatrixProvider`] for locations named `"km N"` along one road.
///
/// Any other location is unreachable: every leg to or from it is
/// [`ElementStatus::Unavailable`](crate::ElementStatus::Unavailable).
///
/// # Examples
/// ```rust
/// use rideshare_core::CostMatrixProvider;
/// use rideshare_core::test_support::LineCostMatrixProvider;
///
/// let locations = vec!["km 2".to_owned(), "km 5".to_owned(), "depot".to_owned()];
/// let matrix = LineCostMatrixProvider.get_matrix(&locations)?;
/// assert_eq!(matrix.leg(0, 1).map(|c| c.distance_meters), Some(3_000));
/// assert!(matrix.leg(0, 2).is_none());
/// # Ok::<(), rideshare_core::CostMatrixError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LineCostMatrixProvider;

impl CostMatrixProvider for LineCostMatrixProvider {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        if locations.is_empty() {
            return Err(CostMatrixError::EmptyInput);
        }
        let markers: Vec<Option<u64>> = locations.iter().map(|l| marker(l)).collect();
        Ok(matrix_for_markers(&markers))
    }
}
