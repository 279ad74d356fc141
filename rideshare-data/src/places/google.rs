//! Places and Geocoding API response types.
//!
//! Only the fields the resolver reads are modelled.

use serde::Deserialize;

/// Statuses meaning "nothing here", which let the resolver try its next
/// strategy instead of failing.
const EMPTY_STATUSES: [&str; 2] = ["ZERO_RESULTS", "NOT_FOUND"];

/// Fields shared by every response envelope.
pub trait Envelope {
    fn status(&self) -> &str;
    fn error_message(&self) -> Option<&str>;

    fn is_ok(&self) -> bool {
        self.status() == "OK"
    }

    fn is_empty_result(&self) -> bool {
        EMPTY_STATUSES.contains(&self.status())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddressOnly {
    pub formatted_address: Option<String>,
}

/// Place Details (`/maps/api/place/details/json`).
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub error_message: Option<String>,
    pub result: Option<AddressOnly>,
}

/// Find Place From Text (`/maps/api/place/findplacefromtext/json`).
#[derive(Debug, Deserialize)]
pub struct FindPlaceResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub candidates: Vec<AddressOnly>,
}

/// Reverse geocoding (`/maps/api/geocode/json?latlng=`).
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<AddressOnly>,
}

macro_rules! impl_envelope {
    ($($ty:ty),+) => {
        $(impl Envelope for $ty {
            fn status(&self) -> &str {
                &self.status
            }

            fn error_message(&self) -> Option<&str> {
                self.error_message.as_deref()
            }
        })+
    };
}

impl_envelope!(DetailsResponse, FindPlaceResponse, GeocodeResponse);

impl DetailsResponse {
    pub fn into_address(self) -> Option<String> {
        self.result.and_then(|place| place.formatted_address)
    }
}

impl FindPlaceResponse {
    pub fn into_address(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|place| place.formatted_address)
    }
}

impl GeocodeResponse {
    pub fn into_address(self) -> Option<String> {
        self.results
            .into_iter()
            .next()
            .and_then(|place| place.formatted_address)
    }
}
