//! Resolve pasted map-share links into postal addresses.
//!
//! Share links are short redirecting URLs. A [`PlaceResolver`] expands them
//! and asks a geocoding service for the address they point at.

mod error;
mod resolver;

pub use error::PlaceResolutionError;
pub use resolver::PlaceResolver;
