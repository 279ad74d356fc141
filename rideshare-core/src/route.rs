//! The optimized route returned to callers.

use crate::waypoint::StopKind;

/// One stop of an optimized route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RouteStop {
    /// One-based position in the route.
    pub order: usize,
    /// Address of the stop.
    pub location: String,
    /// Role of the stop.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: StopKind,
}

/// External map applications a route can be opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapProvider {
    /// Google Maps directions.
    GoogleMaps,
    /// Apple Maps directions.
    AppleMaps,
}

/// Deep links opening the route in external map applications.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MapLinks {
    /// Google Maps directions link with explicit waypoints.
    pub google_maps_url: String,
    /// Apple Maps directions link with chained destinations.
    pub apple_maps_url: String,
}

impl MapLinks {
    /// Link for a single provider.
    #[must_use]
    pub fn get(&self, provider: MapProvider) -> &str {
        match provider {
            MapProvider::GoogleMaps => &self.google_maps_url,
            MapProvider::AppleMaps => &self.apple_maps_url,
        }
    }

    /// Iterate provider and link pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MapProvider, &str)> {
        [MapProvider::GoogleMaps, MapProvider::AppleMaps]
            .into_iter()
            .map(|provider| (provider, self.get(provider)))
    }
}

/// A planned route with human-readable totals.
///
/// Produced once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OptimizedRoute {
    /// Stops in visiting order.
    pub waypoints: Vec<RouteStop>,
    /// Total driving distance, e.g. `"12.4 miles"`.
    pub total_distance: String,
    /// Total time including stop service time, e.g. `"1 hr 5 min"`.
    pub total_time: String,
    /// Links for external map applications.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub map_links: MapLinks,
}

impl OptimizedRoute {
    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[RouteStop] {
        &self.waypoints
    }
}
