//! `SwapPlanner` implementation backed by [`PairwiseExchange`].

use rideshare_core::{
    CostMatrixProvider, OptimizedRoute, PlanError, PlanRequest, RoutePlanner, build_waypoints,
    is_well_ordered, locations, summarise,
};

use crate::exchange::{DEFAULT_MAX_PASSES, PairwiseExchange};
use crate::totals::{ServiceTimes, route_totals};

/// Configuration for [`SwapPlanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlannerConfig {
    /// Upper bound on optimizer sweeps.
    pub max_passes: usize,
    /// Per-stop service time added to the route duration.
    pub service_times: ServiceTimes,
}

impl Default for SwapPlannerConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            service_times: ServiceTimes::default(),
        }
    }
}

impl SwapPlannerConfig {
    /// Override the sweep bound.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Override the per-stop service times.
    #[must_use]
    pub const fn with_service_times(mut self, service_times: ServiceTimes) -> Self {
        self.service_times = service_times;
        self
    }
}

/// Route planner using pairwise exchange over a provider-supplied matrix.
///
/// The provider is injected at construction so tests can substitute a
/// deterministic one.
///
/// # Examples
/// ```
/// use rideshare_core::{PassengerRequest, PlanRequest, RoutePlanner};
/// use rideshare_core::test_support::UniformCostMatrixProvider;
/// use rideshare_solver::SwapPlanner;
///
/// let planner = SwapPlanner::new(UniformCostMatrixProvider::default());
/// let request = PlanRequest::new(
///     "1 Main St",
///     vec![PassengerRequest::with_default_priority("2 Oak Ave", "3 Elm Rd")],
/// );
/// let route = planner.optimize_route(&request)?;
/// assert_eq!(route.stops().len(), 3);
/// # Ok::<(), rideshare_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SwapPlanner<P>
where
    P: CostMatrixProvider,
{
    provider: P,
    config: SwapPlannerConfig,
}

impl<P> SwapPlanner<P>
where
    P: CostMatrixProvider,
{
    /// Construct a planner using default configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, SwapPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(provider: P, config: SwapPlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &SwapPlannerConfig {
        &self.config
    }
}

impl<P> RoutePlanner for SwapPlanner<P>
where
    P: CostMatrixProvider + Send + Sync,
{
    fn optimize_route(&self, request: &PlanRequest) -> Result<OptimizedRoute, PlanError> {
        request.validate()?;
        let mut waypoints = build_waypoints(&request.current_location, &request.passengers)?;

        let matrix = self.provider.get_matrix(&locations(&waypoints))?;
        matrix.ensure_covers(waypoints.len())?;
        log::debug!(
            "received {size}x{size} cost matrix",
            size = waypoints.len()
        );

        PairwiseExchange::new(self.config.max_passes).optimize(&mut waypoints, &matrix);
        debug_assert!(
            is_well_ordered(&waypoints),
            "optimizer must preserve start and pickup-before-dropoff"
        );

        let totals = route_totals(&waypoints, &matrix, self.config.service_times);
        Ok(summarise(&waypoints, totals))
    }
}
