//! Human-readable totals and map-application deep links.
//!
//! Everything here is pure formatting over an already optimized sequence.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::route::{MapLinks, OptimizedRoute, RouteStop};
use crate::waypoint::Waypoint;

/// Metres to statute miles.
const MILES_PER_METER: f64 = 0.000_621_371;

/// Characters left untouched by browser `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const GOOGLE_DIRECTIONS: &str = "https://www.google.com/maps/dir/?api=1";
const APPLE_DIRECTIONS: &str = "http://maps.apple.com/";

/// Accumulated distance and duration along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteTotals {
    /// Total distance in metres.
    pub distance_meters: u64,
    /// Total duration in seconds, service time included.
    pub duration_secs: u64,
}

/// Format metres as miles with one decimal place.
///
/// # Examples
/// ```
/// use rideshare_core::summary::format_distance;
///
/// assert_eq!(format_distance(0), "0.0 miles");
/// assert_eq!(format_distance(1_609), "1.0 miles");
/// ```
#[must_use]
pub fn format_distance(meters: u64) -> String {
    let miles = meters as f64 * MILES_PER_METER;
    format!("{miles:.1} miles")
}

/// Format seconds as `"H hr M min"`, or `"M min"` below an hour.
///
/// Partial minutes are dropped.
///
/// # Examples
/// ```
/// use rideshare_core::summary::format_duration;
///
/// assert_eq!(format_duration(90), "1 min");
/// assert_eq!(format_duration(3_660), "1 hr 1 min");
/// ```
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}

fn encode(location: &str) -> String {
    utf8_percent_encode(location, COMPONENT).to_string()
}

/// Google Maps directions link: explicit origin, destination and `|`-joined
/// interior waypoints, driving mode.
#[must_use]
pub fn google_maps_url(waypoints: &[Waypoint]) -> String {
    let origin = waypoints.first().map(|w| encode(&w.location)).unwrap_or_default();
    let destination = waypoints.last().map(|w| encode(&w.location)).unwrap_or_default();
    let interior = waypoints
        .get(1..waypoints.len().saturating_sub(1))
        .unwrap_or_default()
        .iter()
        .map(|w| encode(&w.location))
        .collect::<Vec<_>>()
        .join("|");
    format!(
        "{GOOGLE_DIRECTIONS}&origin={origin}&destination={destination}&waypoints={interior}&travelmode=driving"
    )
}

/// Apple Maps directions link: source address then every later stop joined
/// with `+`.
#[must_use]
pub fn apple_maps_url(waypoints: &[Waypoint]) -> String {
    let source = waypoints.first().map(|w| encode(&w.location)).unwrap_or_default();
    let destinations = waypoints
        .iter()
        .skip(1)
        .map(|w| encode(&w.location))
        .collect::<Vec<_>>()
        .join("+");
    format!("{APPLE_DIRECTIONS}?saddr={source}&daddr={destinations}")
}

/// Convert an ordered sequence and its totals into the caller-facing route.
#[must_use]
pub fn summarise(waypoints: &[Waypoint], totals: RouteTotals) -> OptimizedRoute {
    OptimizedRoute {
        waypoints: waypoints
            .iter()
            .enumerate()
            .map(|(index, stop)| RouteStop {
                order: index + 1,
                location: stop.location.clone(),
                kind: stop.kind,
            })
            .collect(),
        total_distance: format_distance(totals.distance_meters),
        total_time: format_duration(totals.duration_secs),
        map_links: MapLinks {
            google_maps_url: google_maps_url(waypoints),
            apple_maps_url: apple_maps_url(waypoints),
        },
    }
}
