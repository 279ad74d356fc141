//! HTTP-based `CostMatrixProvider` over the Google Distance Matrix API.

use std::time::Duration;

use log::debug;
use rideshare_core::{CostMatrix, CostMatrixError, CostMatrixProvider, TravelCost};
use url::Url;

use super::distance_matrix::{DistanceMatrixResponse, Element};
use crate::credentials::GoogleMapsCredentials;
use crate::http::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ProviderBuildError, Transport, TransportFailure,
    endpoint, parse_base_url, redacted, split,
};

/// Default user agent for Distance Matrix requests.
pub const DEFAULT_USER_AGENT: &str = "rideshare-routing/0.1";

/// Path of the Distance Matrix JSON endpoint below the base URL.
pub const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// Separator between locations in the `origins` and `destinations` parameters.
const LOCATION_SEPARATOR: &str = "|";

/// Configuration for [`HttpCostMatrixProvider`].
#[derive(Debug, Clone)]
pub struct HttpCostMatrixProviderConfig {
    /// API key sent with every request.
    pub credentials: GoogleMapsCredentials,
    /// Scheme and host of the service, e.g. `"https://maps.googleapis.com"`.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpCostMatrixProviderConfig {
    /// Create a configuration for the public Google endpoint.
    #[must_use]
    pub fn new(credentials: GoogleMapsCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Point the provider at another host, such as a recording proxy.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Cost-matrix provider backed by the Google Distance Matrix API.
///
/// Every location is sent as both an origin and a destination, so one
/// request yields the full `n x n` matrix. Elements Google could not route
/// become [`rideshare_core::ElementStatus::Unavailable`].
///
/// # Runtime behaviour
///
/// The provider owns a `current_thread` Tokio runtime reused across calls.
/// Inside a multi-thread runtime it borrows the caller's handle through
/// [`tokio::task::block_in_place`]; inside a `current_thread` runtime it
/// falls back to its own runtime, which may deadlock if the caller's runtime
/// drives I/O this request needs.
#[derive(Debug)]
pub struct HttpCostMatrixProvider {
    transport: Transport,
    config: HttpCostMatrixProviderConfig,
    base_url: Url,
}

impl HttpCostMatrixProvider {
    /// Create a provider for the public Google endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(credentials: GoogleMapsCredentials) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpCostMatrixProviderConfig::new(credentials))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpCostMatrixProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let transport = Transport::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            transport,
            config,
            base_url,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpCostMatrixProviderConfig {
        &self.config
    }

    /// Build the request URL: every location as origin and destination,
    /// joined with `|`.
    fn build_matrix_url(&self, locations: &[String]) -> Url {
        let joined = locations.join(LOCATION_SEPARATOR);
        let mut url = endpoint(&self.base_url, DISTANCE_MATRIX_PATH);
        url.query_pairs_mut()
            .append_pair("origins", &joined)
            .append_pair("destinations", &joined)
            .append_pair("key", self.config.credentials.api_key());
        url
    }

    async fn fetch_matrix_async(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        let url = self.build_matrix_url(locations);

        let response = self
            .transport
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &url))?;

        let body: DistanceMatrixResponse =
            response
                .json()
                .await
                .map_err(|err| CostMatrixError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        self.convert_response(body, locations.len())
    }

    fn convert_reqwest_error(&self, error: reqwest::Error, url: &Url) -> CostMatrixError {
        let url = redacted(url);
        match split(error) {
            (TransportFailure::Timeout, _) => CostMatrixError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            (TransportFailure::Status(status), message) => CostMatrixError::HttpError {
                url,
                status,
                message,
            },
            (TransportFailure::Network, message) => CostMatrixError::NetworkError { url, message },
        }
    }

    /// Map a decoded response onto a `size x size` matrix.
    fn convert_response(
        &self,
        response: DistanceMatrixResponse,
        size: usize,
    ) -> Result<CostMatrix, CostMatrixError> {
        if !response.is_ok() {
            return Err(CostMatrixError::ServiceError {
                code: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }

        let matrix = CostMatrix::new(
            response
                .rows
                .into_iter()
                .map(|row| row.elements.iter().map(element_cost).collect())
                .collect(),
        );
        matrix.ensure_covers(size)?;
        debug!("received {size}x{size} cost matrix");
        Ok(matrix)
    }
}

fn element_cost(element: &Element) -> TravelCost {
    match (&element.distance, &element.duration) {
        (Some(distance), Some(duration)) if element.status == "OK" => {
            TravelCost::ok(distance.value, duration.value)
        }
        _ => TravelCost::unavailable(),
    }
}

impl CostMatrixProvider for HttpCostMatrixProvider {
    /// Fetch the cost matrix for `locations` in one request.
    ///
    /// When called from within an existing Tokio runtime, that runtime must
    /// be multi-threaded; see the type-level documentation.
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        if locations.is_empty() {
            return Err(CostMatrixError::EmptyInput);
        }
        if let Some((index, location)) = locations
            .iter()
            .enumerate()
            .find(|(_, location)| location.contains(LOCATION_SEPARATOR))
        {
            return Err(CostMatrixError::UnsupportedLocation {
                index,
                location: location.clone(),
            });
        }
        self.transport.block_on(self.fetch_matrix_async(locations))
    }
}
