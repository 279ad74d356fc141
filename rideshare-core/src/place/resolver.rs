//! Share-link resolver trait.

use super::error::PlaceResolutionError;

/// Expand a map-share link into a postal address.
///
/// Implementations follow the link's redirects, then try, in order, a place
/// identifier, a textual place name and finally `@lat,lng` coordinates found
/// in the resolved URL. `Ok(None)` means none of these produced an address.
///
/// # Examples
///
/// ```rust
/// use rideshare_core::{PlaceResolutionError, PlaceResolver};
///
/// struct EchoResolver;
///
/// impl PlaceResolver for EchoResolver {
///     fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError> {
///         Ok(url.strip_prefix("https://example.com/").map(str::to_owned))
///     }
/// }
///
/// let address = EchoResolver.resolve_short_link("https://example.com/1 Main St")?;
/// assert_eq!(address.as_deref(), Some("1 Main St"));
/// # Ok::<(), PlaceResolutionError>(())
/// ```
pub trait PlaceResolver {
    /// Resolve `url` to a formatted address, or `None` when nothing matched.
    fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError>;
}

impl<R: PlaceResolver + ?Sized> PlaceResolver for &R {
    fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError> {
        (**self).resolve_short_link(url)
    }
}
