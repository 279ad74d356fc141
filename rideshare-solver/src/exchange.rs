//! Greedy pairwise-exchange search over a waypoint sequence.
//!
//! The search sweeps every pair of non-start positions, tentatively swaps
//! them, and keeps the swap only when the local cost window around the pair
//! strictly decreases. Sweeps repeat until one completes without an accepted
//! swap.
//!
//! The window cost of a swap changes by exactly as much as the cost of the
//! whole sequence, so every accepted swap lowers a bounded non-negative total
//! and the search always terminates. [`PairwiseExchange::max_passes`] caps the
//! number of sweeps regardless.

use rideshare_core::{CostMatrix, Priority, StopKind, Waypoint};

/// Penalty per priority unit charged for every leg in a cost window.
pub const PRIORITY_WEIGHT: u64 = 1_000;

/// Default upper bound on full sweeps.
pub const DEFAULT_MAX_PASSES: usize = 1_000;

/// Statistics from one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExchangeOutcome {
    /// Full sweeps performed, including the final one without swaps.
    pub passes: usize,
    /// Swaps kept across all sweeps.
    pub swaps: usize,
    /// Whether the last sweep found no improving swap.
    pub converged: bool,
}

/// Local search reordering stops by pairwise exchange.
///
/// # Examples
/// ```
/// use rideshare_core::{CostMatrix, PassengerRequest, TravelCost, build_waypoints};
/// use rideshare_solver::PairwiseExchange;
///
/// let passengers = vec![PassengerRequest::with_default_priority("B", "C")];
/// let mut waypoints = build_waypoints("A", &passengers)?;
/// let matrix = CostMatrix::from_fn(3, |i, j| TravelCost::ok(i.abs_diff(j) as u64, 0));
///
/// let outcome = PairwiseExchange::default().optimize(&mut waypoints, &matrix);
/// assert!(outcome.converged);
/// assert_eq!(waypoints[0].location, "A");
/// # Ok::<(), rideshare_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseExchange {
    max_passes: usize,
}

impl Default for PairwiseExchange {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}

impl PairwiseExchange {
    /// Construct a search bounded to `max_passes` sweeps.
    #[must_use]
    pub const fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    /// Upper bound on full sweeps.
    #[must_use]
    pub const fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Reorder `waypoints` in place.
    ///
    /// The start stop must sit at index zero and every pickup must precede
    /// its drop-off; both properties hold on return. `matrix` is indexed by
    /// [`Waypoint::node`].
    pub fn optimize(&self, waypoints: &mut [Waypoint], matrix: &CostMatrix) -> ExchangeOutcome {
        let len = waypoints.len();
        let mut outcome = ExchangeOutcome::default();
        while outcome.passes < self.max_passes {
            outcome.passes += 1;
            let mut improved = false;
            for i in 1..len.saturating_sub(1) {
                for j in (i + 1)..len {
                    if !is_valid_swap(waypoints, i, j) {
                        continue;
                    }
                    let before = window_cost(waypoints, matrix, i, j);
                    waypoints.swap(i, j);
                    let after = window_cost(waypoints, matrix, i, j);
                    if after < before {
                        improved = true;
                        outcome.swaps += 1;
                    } else {
                        waypoints.swap(i, j);
                    }
                }
            }
            if !improved {
                outcome.converged = true;
                break;
            }
        }

        if outcome.converged {
            log::debug!(
                "pairwise exchange converged after {} passes with {} swaps",
                outcome.passes,
                outcome.swaps
            );
        } else {
            log::warn!(
                "pairwise exchange stopped at the {}-pass bound with {} swaps",
                self.max_passes,
                outcome.swaps
            );
        }
        outcome
    }
}

/// Whether swapping positions `i < j` is allowed.
///
/// The start never moves. A stop may only trade places with a later stop of
/// equal or lower priority. No swap may leave a drop-off ahead of its
/// passenger's pickup.
#[must_use]
pub fn is_valid_swap(waypoints: &[Waypoint], i: usize, j: usize) -> bool {
    let (Some(earlier), Some(later)) = (waypoints.get(i), waypoints.get(j)) else {
        return false;
    };
    if i >= j || earlier.is_start() || later.is_start() {
        return false;
    }
    earlier.priority >= later.priority && keeps_precedence(waypoints, i, j)
}

fn keeps_precedence(waypoints: &[Waypoint], i: usize, j: usize) -> bool {
    let (Some(earlier), Some(later)) = (waypoints.get(i), waypoints.get(j)) else {
        return false;
    };
    // A pickup moving to `j` must not pass its drop-off.
    let pickup_ok = earlier.kind != StopKind::Pickup
        || !waypoints
            .iter()
            .take(j + 1)
            .skip(i + 1)
            .any(|stop| stop.kind == StopKind::Dropoff && stop.passenger == earlier.passenger);
    // A drop-off moving to `i` must not pass its pickup.
    let dropoff_ok = later.kind != StopKind::Dropoff
        || !waypoints
            .iter()
            .take(j)
            .skip(i)
            .any(|stop| stop.kind == StopKind::Pickup && stop.passenger == later.passenger);
    pickup_ok && dropoff_ok
}

/// Cost of the legs around positions `i` and `j`.
///
/// Sums, for each position `k` in `[i - 1, min(len - 1, j + 1))`, the
/// distance of the leg from stop `k` to stop `k + 1` plus the priority of
/// stop `k` (one for the start) times [`PRIORITY_WEIGHT`]. Legs the matrix
/// marks unavailable contribute no distance.
///
/// With `i = 1` and `j = len - 1` the window spans the whole sequence.
#[must_use]
pub fn window_cost(waypoints: &[Waypoint], matrix: &CostMatrix, i: usize, j: usize) -> u64 {
    let start = i.saturating_sub(1);
    let end = waypoints.len().saturating_sub(1).min(j + 1);
    waypoints
        .iter()
        .zip(waypoints.iter().skip(1))
        .take(end)
        .skip(start)
        .map(|(from, to)| {
            let distance = matrix
                .leg(from.node, to.node)
                .map_or(0, |cost| cost.distance_meters);
            let priority = from.priority.map_or(Priority::MIN.get(), Priority::get);
            distance + u64::from(priority) * PRIORITY_WEIGHT
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideshare_core::{PassengerRequest, TravelCost, build_waypoints, is_well_ordered};
    use rstest::{fixture, rstest};

    use rideshare_core::test_support::line_matrix;

    #[fixture]
    fn two_passengers() -> Vec<Waypoint> {
        build_waypoints(
            "km 0",
            &[
                PassengerRequest::new("km 1", "km 9", 5).expect("valid priority"),
                PassengerRequest::new("km 2", "km 8", 1).expect("valid priority"),
            ],
        )
        .expect("valid input")
    }

    #[rstest]
    #[case::start_is_fixed(0, 1, false)]
    #[case::own_dropoff(1, 2, false)]
    #[case::pickup_past_own_dropoff(1, 3, false)]
    #[case::dropoff_to_other_pickup(2, 3, true)]
    #[case::dropoffs(2, 4, false)]
    #[case::reversed_indices(3, 2, false)]
    #[case::out_of_bounds(1, 9, false)]
    fn swap_legality(two_passengers: Vec<Waypoint>, #[case] i: usize, #[case] j: usize, #[case] legal: bool) {
        assert_eq!(is_valid_swap(&two_passengers, i, j), legal);
    }

    #[rstest]
    fn lower_priority_cannot_pass_higher(two_passengers: Vec<Waypoint>) {
        let mut reversed = two_passengers;
        reversed.swap(1, 3);
        reversed.swap(2, 4);
        // Priority one stops now sit ahead of priority five stops.
        assert!(!is_valid_swap(&reversed, 2, 3));
        assert!(!is_valid_swap(&reversed, 1, 4));
    }

    #[rstest]
    fn window_charges_distance_and_priority(two_passengers: Vec<Waypoint>) {
        let matrix = line_matrix(&[0, 1, 9, 2, 8]);
        // Legs 0->1, 1->2, 2->3: 1 km + 8 km + 7 km, priorities 1, 5, 5.
        assert_eq!(
            window_cost(&two_passengers, &matrix, 1, 2),
            16_000 + 11 * PRIORITY_WEIGHT
        );
    }

    #[rstest]
    fn window_skips_unavailable_legs(two_passengers: Vec<Waypoint>) {
        let matrix = CostMatrix::from_fn(5, |_, _| TravelCost::unavailable());
        assert_eq!(
            window_cost(&two_passengers, &matrix, 1, 4),
            (1 + 5 + 5 + 1) * PRIORITY_WEIGHT
        );
    }

    #[rstest]
    fn optimize_takes_the_shorter_detour(two_passengers: Vec<Waypoint>) {
        let matrix = line_matrix(&[0, 1, 9, 2, 8]);
        let mut waypoints = two_passengers;
        let outcome = PairwiseExchange::default().optimize(&mut waypoints, &matrix);
        let order: Vec<_> = waypoints.iter().map(|w| w.location.as_str()).collect();
        assert_eq!(order, ["km 0", "km 1", "km 2", "km 8", "km 9"]);
        assert!(outcome.converged);
        assert!(outcome.swaps > 0);
        assert!(is_well_ordered(&waypoints));
    }

    #[rstest]
    fn lower_priority_pickup_can_end_up_first() {
        let mut waypoints = build_waypoints(
            "km 0",
            &[
                PassengerRequest::new("km 10", "km 20", 5).expect("valid priority"),
                PassengerRequest::new("km 1", "km 30", 1).expect("valid priority"),
            ],
        )
        .expect("valid input");
        let matrix = line_matrix(&[0, 10, 20, 1, 30]);

        let outcome = PairwiseExchange::default().optimize(&mut waypoints, &matrix);

        // The drop-off at km 20 first trades with the pickup at km 1, which
        // then trades with the pickup at km 10. Both swaps have the
        // higher-priority stop in front and keep every pickup ahead of its
        // drop-off.
        let order: Vec<_> = waypoints.iter().map(|w| w.location.as_str()).collect();
        assert_eq!(order, ["km 0", "km 1", "km 10", "km 20", "km 30"]);
        assert_eq!(outcome.swaps, 2);
        assert!(is_well_ordered(&waypoints));
    }

    #[rstest]
    fn optimize_is_idempotent(two_passengers: Vec<Waypoint>) {
        let matrix = line_matrix(&[0, 1, 9, 2, 8]);
        let mut waypoints = two_passengers;
        let exchange = PairwiseExchange::default();
        exchange.optimize(&mut waypoints, &matrix);
        let settled = waypoints.clone();
        let outcome = exchange.optimize(&mut waypoints, &matrix);
        assert_eq!(waypoints, settled);
        assert_eq!(outcome.swaps, 0);
        assert_eq!(outcome.passes, 1);
    }

    #[rstest]
    fn zero_pass_bound_leaves_order_untouched(two_passengers: Vec<Waypoint>) {
        let matrix = line_matrix(&[0, 1, 9, 2, 8]);
        let mut waypoints = two_passengers.clone();
        let outcome = PairwiseExchange::new(0).optimize(&mut waypoints, &matrix);
        assert_eq!(waypoints, two_passengers);
        assert!(!outcome.converged);
    }
}
