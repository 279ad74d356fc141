use crate::{OptimizedRoute, PlanError, PlanRequest};

/// Turn a validated passenger list into an optimized route.
///
/// Implementations validate the request, fetch travel costs, reorder stops
/// and summarise the result. Invalid input must surface as
/// [`PlanError::InvalidInput`] rather than a panic. Planners must be
/// `Send + Sync` so a single instance can serve concurrent requests.
pub trait RoutePlanner: Send + Sync {
    /// Plan a route for `request`.
    fn optimize_route(&self, request: &PlanRequest) -> Result<OptimizedRoute, PlanError>;
}
