//! Pairwise-exchange route optimizer for the rideshare planner.
//!
//! This crate provides [`SwapPlanner`], the default implementation of the
//! [`RoutePlanner`](rideshare_core::RoutePlanner) trait. It lays out the
//! driver's start and every passenger's pickup and drop-off, fetches a cost
//! matrix from an injected [`CostMatrixProvider`](rideshare_core::CostMatrixProvider),
//! then improves the visiting order with [`PairwiseExchange`], a greedy local
//! search that swaps stops while a priority-weighted local cost window keeps
//! falling.
//!
//! The search is deterministic: the same request and matrix always produce
//! the same order. It converges to a local optimum, not a global one.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod exchange;
mod planner;
mod totals;

pub use exchange::{
    DEFAULT_MAX_PASSES, ExchangeOutcome, PRIORITY_WEIGHT, PairwiseExchange, is_valid_swap,
    window_cost,
};
pub use planner::{SwapPlanner, SwapPlannerConfig};
pub use totals::{ServiceTimes, route_totals};
