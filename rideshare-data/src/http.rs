//! Shared plumbing for the blocking HTTP providers.
//!
//! The provider traits are synchronous so the core stays embeddable in
//! synchronous callers. Each provider owns a `current_thread` runtime and
//! blocks on it, or borrows the caller's multi-thread runtime through
//! [`tokio::task::block_in_place`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Google Maps web-service host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failures while constructing an HTTP provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Client and runtime shared by one provider instance.
pub(crate) struct Transport {
    pub(crate) client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl Transport {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a `current_thread` runtime this falls back to the owned
    /// runtime, which can deadlock if the caller's runtime drives I/O the
    /// request depends on.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Parse a configured base URL.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ProviderBuildError> {
    Url::parse(base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    })
}

/// Join `path` onto `base`, keeping any path prefix the base carries.
pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_query(None);
    url
}

/// Render `url` for errors and logs with the query, and so the key, removed.
pub(crate) fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.set_fragment(None);
    shown.to_string()
}

/// Classification of a transport failure, shared by both error enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportFailure {
    Timeout,
    Status(u16),
    Network,
}

fn classify(error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout
    } else if let Some(status) = error.status() {
        TransportFailure::Status(status.as_u16())
    } else {
        TransportFailure::Network
    }
}

/// Classify `error` and render its text with the request URL stripped.
pub(crate) fn split(error: reqwest::Error) -> (TransportFailure, String) {
    let failure = classify(&error);
    (failure, error.without_url().to_string())
}
