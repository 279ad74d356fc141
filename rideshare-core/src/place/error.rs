use thiserror::Error;

/// Errors from [`crate::place::PlaceResolver::resolve_short_link`].
///
/// A link that resolves but points at nothing recognisable is not an error;
/// resolvers report that as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceResolutionError {
    /// The input could not be parsed as a URL.
    #[error("{url:?} is not a valid URL")]
    InvalidUrl {
        /// The rejected input.
        url: String,
    },
    /// A request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials removed.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The connection failed before a response was received.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Request URL with credentials removed.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// A service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The geocoding service reported a failure status.
    #[error("place service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Optional detail reported by the service.
        message: String,
    },
    /// A response body could not be decoded.
    #[error("failed to parse place response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}
