use thiserror::Error;

/// Errors from [`crate::cost_matrix::CostMatrixProvider::get_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// No locations were provided.
    ///
    /// A matrix needs at least one location. Callers should validate their
    /// request before asking for costs.
    #[error("at least one location is required")]
    EmptyInput,
    /// A location cannot be encoded in a matrix request.
    ///
    /// The HTTP provider joins locations with `|`, so a location containing
    /// one would split into several.
    #[error("location {index} ({location:?}) contains the reserved separator '|'")]
    UnsupportedLocation {
        /// Zero-based position in the requested location list.
        index: usize,
        /// The offending location.
        location: String,
    },
    /// The request did not complete within the configured timeout.
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
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service answered but reported a failure status.
    #[error("matrix service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Optional detail reported by the service.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse matrix response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The matrix does not cover every requested location.
    #[error("expected a {expected}x{expected} matrix, found a dimension of {found}")]
    DimensionMismatch {
        /// Number of requested locations.
        expected: usize,
        /// Offending row count or row length.
        found: usize,
    },
}
