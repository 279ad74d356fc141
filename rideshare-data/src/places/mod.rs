//! Resolve pasted Google Maps share links into postal addresses.
//!
//! [`HttpPlaceResolver`] implements [`rideshare_core::PlaceResolver`]. The
//! URL helpers in this module are pure and usable on their own, for example
//! to decide whether pasted text should be resolved at all.
//!
//! # Example
//!
//! ```no_run
//! use rideshare_core::PlaceResolver;
//! use rideshare_data::GoogleMapsCredentials;
//! use rideshare_data::places::{HttpPlaceResolver, expand_share_code, is_map_share_link};
//!
//! let resolver = HttpPlaceResolver::new(GoogleMapsCredentials::from_env()?)?;
//! let link = expand_share_code("abc123");
//! if is_map_share_link(&link) {
//!     println!("{:?}", resolver.resolve_short_link(&link)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod google;
mod resolver;
mod share_link;

#[doc(hidden)]
pub mod test_support;

pub use resolver::{BROWSER_USER_AGENT, HttpPlaceResolver, HttpPlaceResolverConfig};
pub use share_link::{
    PlaceHint, SHARE_HOST, expand_share_code, extract_coordinates, extract_place_hint,
    is_map_share_link,
};
