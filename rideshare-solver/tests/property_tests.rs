//! Property-based tests for the pairwise-exchange optimizer.
//!
//! # Invariants tested
//!
//! - **Start fixed:** the start stop stays at index zero.
//! - **Precedence:** every pickup still precedes its drop-off.
//! - **Permutation:** each stop appears exactly once.
//! - **Idempotence:** optimizing a settled sequence changes nothing.
//! - **Monotonicity:** the whole-route cost never increases.


use proptest::prelude::*;
use rideshare_core::is_well_ordered;
use rideshare_solver::{PairwiseExchange, window_cost};

use proptest_support::{Instance, arbitrary_instance_strategy, line_instance_strategy, nodes};

fn whole_route_cost(instance: &Instance) -> u64 {
    let last = instance.waypoints.len().saturating_sub(1);
    window_cost(&instance.waypoints, &instance.matrix, 1, last)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the start never moves and no drop-off overtakes its pickup.
    #[test]
    fn output_is_well_ordered(mut instance in arbitrary_instance_strategy(6)) {
        PairwiseExchange::default().optimize(&mut instance.waypoints, &instance.matrix);
        prop_assert!(instance.waypoints.first().is_some_and(|w| w.is_start()));
        prop_assert!(is_well_ordered(&instance.waypoints));
    }

    /// Property: the optimizer only reorders, never drops or duplicates.
    #[test]
    fn output_is_a_permutation(mut instance in arbitrary_instance_strategy(6)) {
        PairwiseExchange::default().optimize(&mut instance.waypoints, &instance.matrix);
        let mut visited = nodes(&instance.waypoints);
        visited.sort_unstable();
        let expected: Vec<usize> = (0..instance.waypoints.len()).collect();
        prop_assert_eq!(visited, expected);
    }

    /// Property: a converged sequence admits no further improving swap.
    #[test]
    fn second_run_is_a_no_op(mut instance in line_instance_strategy(6)) {
        let exchange = PairwiseExchange::default();
        let first = exchange.optimize(&mut instance.waypoints, &instance.matrix);
        prop_assert!(first.converged);
        let settled = nodes(&instance.waypoints);
        let second = exchange.optimize(&mut instance.waypoints, &instance.matrix);
        prop_assert_eq!(second.swaps, 0);
        prop_assert_eq!(nodes(&instance.waypoints), settled);
    }

    /// Property: every kept swap lowers the cost of the whole sequence.
    #[test]
    fn route_cost_never_increases(instance in arbitrary_instance_strategy(6)) {
        let before = whole_route_cost(&instance);
        let mut optimized = instance.clone();
        let outcome = PairwiseExchange::default().optimize(&mut optimized.waypoints, &optimized.matrix);
        let after = whole_route_cost(&optimized);
        prop_assert!(after <= before, "cost rose from {before} to {after}");
        if outcome.swaps > 0 {
            prop_assert!(after < before);
        }
    }
}
