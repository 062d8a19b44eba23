//! Wire types for the search and history services

use serde::{Deserialize, Serialize};

/// Body of a search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub user_id: String,
}

/// Successful search body. `result` is absent, null or falsy when nothing
/// matched; it is parsed into a `PlaceResult` only after that check.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub result: Option<serde_json::Value>,
}

impl SearchResponse {
    /// The result payload, if it counts as a match.
    pub fn found(self) -> Option<serde_json::Value> {
        self.result.filter(is_truthy)
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<String> {
        match &self.error {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Rating as shown to the user; "-" when the service sent none.
pub fn display_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |r| r.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub rating: f64,
    pub text: String,
}

/// A previously searched place, as stored by the history service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    pub place_id: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// One group per stored search of this place.
    #[serde(default)]
    pub reviews: Vec<Vec<HistoryReview>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReview {
    pub author_name: String,
    pub rating: f64,
    pub text: String,
    #[serde(default)]
    pub profile_photo_url: String,
    #[serde(default)]
    pub relative_time_description: String,
}
