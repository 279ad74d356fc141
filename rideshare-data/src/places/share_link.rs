//! Pure parsing of Google Maps share links.
//!
//! None of these helpers touch the network; [`super::HttpPlaceResolver`]
//! combines them with the web services.

use geo::Coord;
use percent_encoding::percent_decode_str;
use url::Url;

/// Host serving short share codes.
pub const SHARE_HOST: &str = "https://maps.app.goo.gl";

const SHARE_MARKERS: [&str; 3] = ["maps.app.goo.gl", "goo.gl", "google.com/maps"];

/// What a resolved map URL says about the place it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceHint {
    /// A Google place identifier.
    PlaceId(String),
    /// A decoded place name suitable for a text search.
    Name(String),
}

/// Whether pasted text looks like a map share link.
///
/// # Examples
/// ```
/// use rideshare_data::places::is_map_share_link;
///
/// assert!(is_map_share_link("https://maps.app.goo.gl/abc123"));
/// assert!(is_map_share_link("see https://www.google.com/maps/place/Foo"));
/// assert!(!is_map_share_link("10 Downing Street"));
/// ```
#[must_use]
pub fn is_map_share_link(text: &str) -> bool {
    SHARE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Read a place id or name from a resolved map URL.
///
/// A `place/<segment>` path component wins: a `:<id>` suffix yields
/// [`PlaceHint::PlaceId`], otherwise the decoded segment is a
/// [`PlaceHint::Name`]. Without one, a `place_id` query parameter is used.
///
/// # Examples
/// ```
/// use rideshare_data::places::{PlaceHint, extract_place_hint};
///
/// assert_eq!(
///     extract_place_hint("https://www.google.com/maps/place/Caf%C3%A9+Nero/@51.5,-0.1,17z"),
///     Some(PlaceHint::Name("Café Nero".to_owned())),
/// );
/// assert_eq!(
///     extract_place_hint("https://maps.google.com/?place_id=ChIJ123"),
///     Some(PlaceHint::PlaceId("ChIJ123".to_owned())),
/// );
/// ```
#[must_use]
pub fn extract_place_hint(url: &str) -> Option<PlaceHint> {
    place_segment(url)
        .map(hint_from_segment)
        .or_else(|| place_id_parameter(url).map(PlaceHint::PlaceId))
}

fn place_segment(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("place/")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    rest.get(..end).filter(|segment| !segment.is_empty())
}

fn hint_from_segment(segment: &str) -> PlaceHint {
    match segment.rsplit_once(':') {
        Some((_, id)) if !id.is_empty() => PlaceHint::PlaceId(id.to_owned()),
        _ => PlaceHint::Name(decode_name(segment)),
    }
}

/// Undo form and percent encoding in a path segment.
fn decode_name(segment: &str) -> String {
    let spaced = segment.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn place_id_parameter(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .query_pairs()
        .find(|(name, value)| name == "place_id" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Read `@lat,lng` from a map URL as a coordinate (`x` longitude,
/// `y` latitude).
///
/// Both numbers need a fractional part, as Google writes them.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use rideshare_data::places::extract_coordinates;
///
/// let coord = extract_coordinates("https://www.google.com/maps/@51.5007,-0.1246,15z");
/// assert_eq!(coord, Some(Coord { x: -0.1246, y: 51.5007 }));
/// assert_eq!(extract_coordinates("https://www.google.com/maps/@51,0"), None);
/// ```
#[must_use]
pub fn extract_coordinates(url: &str) -> Option<Coord<f64>> {
    url.match_indices('@').find_map(|(at, _)| {
        let rest = url.get(at + 1..)?;
        let (lat, after_lat) = decimal_prefix(rest)?;
        let (lng, _) = decimal_prefix(after_lat.strip_prefix(',')?)?;
        Some(Coord { x: lng, y: lat })
    })
}

/// Split a leading `-?digits.digits` number off `text`.
fn decimal_prefix(text: &str) -> Option<(f64, &str)> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let sign_len = text.len() - unsigned.len();
    let whole = leading_digits(unsigned);
    let fraction = leading_digits(unsigned.get(whole..)?.strip_prefix('.')?);
    if whole == 0 || fraction == 0 {
        return None;
    }
    let end = sign_len + whole + 1 + fraction;
    let value = text.get(..end)?.parse().ok()?;
    Some((value, text.get(end..)?))
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// Turn a bare share code into a full share URL.
///
/// Input that already carries a scheme is returned unchanged.
///
/// # Examples
/// ```
/// use rideshare_data::places::expand_share_code;
///
/// assert_eq!(expand_share_code("abc123"), "https://maps.app.goo.gl/abc123");
/// assert_eq!(
///     expand_share_code("https://maps.app.goo.gl/abc123"),
///     "https://maps.app.goo.gl/abc123",
/// );
/// ```
#[must_use]
pub fn expand_share_code(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("{SHARE_HOST}/{}", trimmed.trim_start_matches('/'))
    }
}
