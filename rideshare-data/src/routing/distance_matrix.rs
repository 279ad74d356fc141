//! Distance Matrix API response types.
//!
//! See: <https://developers.google.com/maps/documentation/distance-matrix/distance-matrix>

use serde::Deserialize;

/// Top-level Distance Matrix response.
///
/// `status` is `"OK"` on success; anything else (`"INVALID_REQUEST"`,
/// `"REQUEST_DENIED"`, `"OVER_QUERY_LIMIT"`, ...) means `rows` is empty.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl DistanceMatrixResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// One origin's legs to every destination.
#[derive(Debug, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single origin-destination pair.
///
/// `distance` and `duration` are absent unless `status` is `"OK"`.
#[derive(Debug, Deserialize)]
pub struct Element {
    pub status: String,
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
}

/// A value in metres or seconds with its display text.
#[derive(Debug, Deserialize)]
pub struct Measure {
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "status": "OK",
            "origin_addresses": ["A", "B"],
            "destination_addresses": ["A", "B"],
            "rows": [
                {"elements": [
                    {"status": "OK", "distance": {"text": "1 m", "value": 0}, "duration": {"text": "1 min", "value": 0}},
                    {"status": "OK", "distance": {"text": "1.6 km", "value": 1609}, "duration": {"text": "3 mins", "value": 180}}
                ]},
                {"elements": [
                    {"status": "ZERO_RESULTS"},
                    {"status": "OK", "distance": {"text": "1 m", "value": 0}, "duration": {"text": "1 min", "value": 0}}
                ]}
            ]
        }"#;

        let response: DistanceMatrixResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.rows.len(), 2);
        let leg = &response.rows[0].elements[1];
        assert_eq!(leg.distance.as_ref().map(|m| m.value), Some(1609));
        assert_eq!(leg.duration.as_ref().map(|m| m.value), Some(180));
        assert_eq!(response.rows[1].elements[0].status, "ZERO_RESULTS");
        assert!(response.rows[1].elements[0].distance.is_none());
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "rows": []
        }"#;

        let response: DistanceMatrixResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
    }

    #[test]
    fn rows_default_to_empty() {
        let response: DistanceMatrixResponse =
            serde_json::from_str(r#"{"status": "INVALID_REQUEST"}"#).expect("should deserialise");
        assert!(response.rows.is_empty());
    }
}
