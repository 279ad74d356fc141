//! HTTP-based `PlaceResolver` over Google share links and web services.

use std::time::Duration;

use geo::Coord;
use log::{debug, warn};
use rideshare_core::{PlaceResolutionError, PlaceResolver};
use serde::de::DeserializeOwned;
use url::Url;

use super::google::{DetailsResponse, Envelope, FindPlaceResponse, GeocodeResponse};
use super::share_link::{PlaceHint, extract_coordinates, extract_place_hint};
use crate::credentials::GoogleMapsCredentials;
use crate::http::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ProviderBuildError, Transport, TransportFailure,
    endpoint, parse_base_url, redacted, split,
};

/// Browser user agent; share links answer scripted clients differently.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const DETAILS_PATH: &str = "/maps/api/place/details/json";
const FIND_PLACE_PATH: &str = "/maps/api/place/findplacefromtext/json";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Configuration for [`HttpPlaceResolver`].
#[derive(Debug, Clone)]
pub struct HttpPlaceResolverConfig {
    /// API key sent to the Places and Geocoding services.
    pub credentials: GoogleMapsCredentials,
    /// Scheme and host of the web services. Share links are fetched as given.
    pub base_url: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpPlaceResolverConfig {
    /// Create a configuration for the public Google endpoints.
    #[must_use]
    pub fn new(credentials: GoogleMapsCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: BROWSER_USER_AGENT.to_owned(),
        }
    }

    /// Send web-service requests to another host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
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

/// Place resolver that follows a share link and geocodes where it lands.
///
/// After redirects, the resolved URL is tried in order:
/// 1. a place id, looked up with Place Details;
/// 2. a place name, looked up with Find Place From Text;
/// 3. `@lat,lng` coordinates, looked up with reverse geocoding.
///
/// A lookup that finds nothing falls through to the next strategy. Runtime
/// bridging matches [`crate::routing::HttpCostMatrixProvider`].
#[derive(Debug)]
pub struct HttpPlaceResolver {
    transport: Transport,
    config: HttpPlaceResolverConfig,
    base_url: Url,
}

impl HttpPlaceResolver {
    /// Create a resolver for the public Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(credentials: GoogleMapsCredentials) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpPlaceResolverConfig::new(credentials))
    }

    /// Create a resolver with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpPlaceResolverConfig) -> Result<Self, ProviderBuildError> {
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
    pub const fn config(&self) -> &HttpPlaceResolverConfig {
        &self.config
    }

    fn service_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint(&self.base_url, path);
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", self.config.credentials.api_key());
        url
    }

    async fn resolve_async(&self, link: Url) -> Result<Option<String>, PlaceResolutionError> {
        let resolved = self.follow_redirects(link).await?;
        debug!("share link resolved to {}", redacted(&resolved));

        let from_hint = match extract_place_hint(resolved.as_str()) {
            Some(PlaceHint::PlaceId(id)) => self.place_details(&id).await?,
            Some(PlaceHint::Name(name)) => self.find_place(&name).await?,
            None => None,
        };
        if from_hint.is_some() {
            return Ok(from_hint);
        }

        let from_coordinates = match extract_coordinates(resolved.as_str()) {
            Some(coord) => self.reverse_geocode(coord).await?,
            None => None,
        };
        if from_coordinates.is_none() {
            warn!("no address found for {}", redacted(&resolved));
        }
        Ok(from_coordinates)
    }

    /// Fetch the link and return the URL the redirects end at.
    async fn follow_redirects(&self, link: Url) -> Result<Url, PlaceResolutionError> {
        let response = self
            .transport
            .client
            .get(link.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &link))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &link))?;
        Ok(response.url().clone())
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<String>, PlaceResolutionError> {
        let url = self.service_url(
            DETAILS_PATH,
            &[("place_id", place_id), ("fields", "formatted_address")],
        );
        let body: Option<DetailsResponse> = self.fetch(url).await?;
        Ok(body.and_then(DetailsResponse::into_address))
    }

    async fn find_place(&self, name: &str) -> Result<Option<String>, PlaceResolutionError> {
        let url = self.service_url(
            FIND_PLACE_PATH,
            &[
                ("input", name),
                ("inputtype", "textquery"),
                ("fields", "formatted_address"),
            ],
        );
        let body: Option<FindPlaceResponse> = self.fetch(url).await?;
        Ok(body.and_then(FindPlaceResponse::into_address))
    }

    async fn reverse_geocode(
        &self,
        coord: Coord<f64>,
    ) -> Result<Option<String>, PlaceResolutionError> {
        let latlng = format!("{},{}", coord.y, coord.x);
        let url = self.service_url(GEOCODE_PATH, &[("latlng", latlng.as_str())]);
        let body: Option<GeocodeResponse> = self.fetch(url).await?;
        Ok(body.and_then(GeocodeResponse::into_address))
    }

    /// GET a web-service URL; `None` when the service found nothing.
    async fn fetch<T>(&self, url: Url) -> Result<Option<T>, PlaceResolutionError>
    where
        T: DeserializeOwned + Envelope,
    {
        let response = self
            .transport
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &url))?;

        let body: T = response
            .json()
            .await
            .map_err(|err| PlaceResolutionError::ParseError {
                message: err.without_url().to_string(),
            })?;
        check_status(body)
    }

    fn convert_reqwest_error(&self, error: reqwest::Error, url: &Url) -> PlaceResolutionError {
        let url = redacted(url);
        match split(error) {
            (TransportFailure::Timeout, _) => PlaceResolutionError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            (TransportFailure::Status(status), message) => PlaceResolutionError::HttpError {
                url,
                status,
                message,
            },
            (TransportFailure::Network, message) => {
                PlaceResolutionError::NetworkError { url, message }
            }
        }
    }
}

fn check_status<T: Envelope>(body: T) -> Result<Option<T>, PlaceResolutionError> {
    if body.is_ok() {
        Ok(Some(body))
    } else if body.is_empty_result() {
        Ok(None)
    } else {
        Err(PlaceResolutionError::ServiceError {
            code: body.status().to_owned(),
            message: body.error_message().unwrap_or_default().to_owned(),
        })
    }
}

impl PlaceResolver for HttpPlaceResolver {
    fn resolve_short_link(&self, url: &str) -> Result<Option<String>, PlaceResolutionError> {
        let link = Url::parse(url.trim()).map_err(|_| PlaceResolutionError::InvalidUrl {
            url: url.to_owned(),
        })?;
        self.transport.block_on(self.resolve_async(link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn resolver() -> HttpPlaceResolver {
        let credentials = GoogleMapsCredentials::new("test-key").expect("valid key");
        HttpPlaceResolver::new(credentials).expect("resolver should build")
    }

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect()
    }

    #[rstest]
    fn details_url_requests_only_the_address(resolver: HttpPlaceResolver) {
        let url = resolver.service_url(
            DETAILS_PATH,
            &[("place_id", "ChIJ1"), ("fields", "formatted_address")],
        );
        assert_eq!(url.host_str(), Some("maps.googleapis.com"));
        assert_eq!(url.path(), DETAILS_PATH);
        assert_eq!(
            query(&url),
            pairs(&[
                ("place_id", "ChIJ1"),
                ("fields", "formatted_address"),
                ("key", "test-key"),
            ])
        );
    }

    #[rstest]
    fn default_user_agent_is_a_browser(resolver: HttpPlaceResolver) {
        assert_eq!(resolver.config().user_agent, BROWSER_USER_AGENT);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("maps.app.goo.gl/abc")]
    fn rejects_unparsable_links(resolver: HttpPlaceResolver, #[case] link: &str) {
        let err = resolver
            .resolve_short_link(link)
            .expect_err("should be rejected before any request");
        assert_eq!(
            err,
            PlaceResolutionError::InvalidUrl {
                url: link.to_owned()
            }
        );
    }

    #[rstest]
    fn ok_status_passes_body_through() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{"status": "OK", "results": [{"formatted_address": "1 Main St"}]}"#,
        )
        .expect("should deserialise");
        let checked = check_status(body).expect("ok status");
        assert_eq!(
            checked.and_then(GeocodeResponse::into_address).as_deref(),
            Some("1 Main St")
        );
    }

    #[rstest]
    #[case("ZERO_RESULTS")]
    #[case("NOT_FOUND")]
    fn empty_statuses_fall_through(#[case] status: &str) {
        let body: FindPlaceResponse =
            serde_json::from_str(&format!(r#"{{"status": "{status}"}}"#))
                .expect("should deserialise");
        assert!(check_status(body).expect("not an error").is_none());
    }

    #[rstest]
    fn failing_status_is_a_service_error() {
        let body: DetailsResponse = serde_json::from_str(
            r#"{"status": "OVER_QUERY_LIMIT", "error_message": "quota exceeded"}"#,
        )
        .expect("should deserialise");
        let err = check_status(body).expect_err("should fail");
        assert_eq!(
            err,
            PlaceResolutionError::ServiceError {
                code: "OVER_QUERY_LIMIT".to_owned(),
                message: "quota exceeded".to_owned(),
            }
        );
    }

    #[rstest]
    fn unreachable_link_is_a_transport_failure(resolver: HttpPlaceResolver) {
        let err = resolver
            .resolve_short_link("http://127.0.0.1:9/abc")
            .expect_err("nothing listens on the discard port");
        assert!(
            matches!(
                err,
                PlaceResolutionError::NetworkError { .. } | PlaceResolutionError::Timeout { .. }
            ),
            "expected a transport failure, got {err:?}"
        );
    }
}
