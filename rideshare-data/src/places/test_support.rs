//! Test utilities for place resolvers.

use std::collections::HashMap;

use rideshare_core::{PlaceResolutionError, PlaceResolver};

use super::share_link::{PlaceHint, extract_coordinates, extract_place_hint};

/// Stub `PlaceResolver` applying the HTTP resolver's strategy order to a
/// fixed table instead of the web services.
///
/// Links are not followed: the hint and coordinates are read from the link
/// itself. Links listed with [`StubPlaceResolver::with_redirect`] are
/// rewritten first.
///
/// # Example
///
/// ```
/// use rideshare_core::PlaceResolver;
/// use rideshare_data::places::test_support::StubPlaceResolver;
///
/// let resolver = StubPlaceResolver::default()
///     .with_redirect(
///         "https://maps.app.goo.gl/abc",
///         "https://www.google.com/maps/place/Kew+Gardens",
///     )
///     .with_named_place("Kew Gardens", "Richmond TW9 3AE, UK");
///
/// let address = resolver.resolve_short_link("https://maps.app.goo.gl/abc")?;
/// assert_eq!(address.as_deref(), Some("Richmond TW9 3AE, UK"));
/// # Ok::<(), rideshare_core::PlaceResolutionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubPlaceResolver {
    redirects: HashMap<String, String>,
    by_id: HashMap<String, String>,
    by_name: HashMap<String, String>,
    by_coordinates: HashMap<String, String>,
    error: Option<PlaceResolutionError>,
}

impl StubPlaceResolver {
    /// Treat `link` as redirecting to `target`.
    #[must_use]
    pub fn with_redirect(mut self, link: impl Into<String>, target: impl Into<String>) -> Self {
        self.redirects.insert(link.into(), target.into());
        self
    }

    /// Answer Place Details for `place_id`.
    #[must_use]
    pub fn with_place_id(mut self, place_id: impl Into<String>, address: impl Into<String>) -> Self {
        self.by_id.insert(place_id.into(), address.into());
        self
    }

    /// Answer a text search for `name`.
    #[must_use]
    pub fn with_named_place(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.by_name.insert(name.into(), address.into());
        self
    }

    /// Answer reverse geocoding of `"lat,lng"`.
    #[must_use]
    pub fn with_coordinates(mut self, latlng: impl Into<String>, address: impl Into<String>) -> Self {
        self.by_coordinates.insert(latlng.into(), address.into());
        self
    }

    /// Fail every valid link with `error`.
    #[must_use]
    pub fn with_error(error: PlaceResolutionError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

impl PlaceResolver for StubPlaceResolver {
    fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError> {
        let link = url.trim();
        if !link.starts_with("http://") && !link.starts_with("https://") {
            return Err(PlaceResolutionError::InvalidUrl {
                url: url.to_owned(),
            });
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let resolved = self.redirects.get(link).map_or(link, String::as_str);
        let from_hint = match extract_place_hint(resolved) {
            Some(PlaceHint::PlaceId(id)) => self.by_id.get(&id),
            Some(PlaceHint::Name(name)) => self.by_name.get(&name),
            None => None,
        };
        let address = from_hint.or_else(|| {
            extract_coordinates(resolved)
                .and_then(|coord| self.by_coordinates.get(&format!("{},{}", coord.y, coord.x)))
        });
        Ok(address.cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_name_falls_back_to_coordinates() {
        let resolver = StubPlaceResolver::default()
            .with_coordinates("51.5055,-0.0754", "Tower Bridge Rd, London");
        let address = resolver
            .resolve_short_link("https://www.google.com/maps/place/Unknown/@51.5055,-0.0754,17z")
            .expect("valid link");
        assert_eq!(address.as_deref(), Some("Tower Bridge Rd, London"));
    }

    #[rstest]
    fn place_id_wins_over_coordinates() {
        let resolver = StubPlaceResolver::default()
            .with_place_id("ChIJ1", "By id")
            .with_coordinates("1.5,2.5", "By coordinates");
        let address = resolver
            .resolve_short_link("https://www.google.com/maps/place/X:ChIJ1/@1.5,2.5")
            .expect("valid link");
        assert_eq!(address.as_deref(), Some("By id"));
    }

    #[rstest]
    fn nothing_matched_is_none() {
        let address = StubPlaceResolver::default()
            .resolve_short_link("https://maps.app.goo.gl/zzz")
            .expect("valid link");
        assert_eq!(address, None);
    }

    #[rstest]
    fn non_url_is_invalid() {
        let err = StubPlaceResolver::default()
            .resolve_short_link("abc")
            .expect_err("should fail");
        assert!(matches!(err, PlaceResolutionError::InvalidUrl { .. }));
    }
}
