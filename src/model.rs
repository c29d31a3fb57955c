// Core structs: search criteria, raw offers, dictionaries, display records
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Request body sent to the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub passengers: u32,
}

/// Envelope returned by the search service. Offers stay as raw JSON so that
/// one badly shaped offer cannot sink the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dictionaries: Option<Dictionaries>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    pub price: Price,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    #[serde(default)]
    pub aircraft: Option<Aircraft>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub iata_code: String,
    pub at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aircraft {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub total: String,
    pub currency: String,
}

/// Reference tables shipped next to the offers. Any table may be missing;
/// entries of the wrong shape are dropped and resolve like missing keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dictionaries {
    #[serde(default, deserialize_with = "lenient_table")]
    pub carriers: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub aircraft: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub locations: Option<HashMap<String, Location>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_table<'de, D, V>(deserializer: D) -> Result<Option<HashMap<String, V>>, D::Error>
where
    D: Deserializer<'de>,
    V: DeserializeOwned,
{
    let Some(serde_json::Value::Object(entries)) =
        Option::<serde_json::Value>::deserialize(deserializer)?
    else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|(code, value)| serde_json::from_value(value).ok().map(|v| (code, v)))
            .collect(),
    ))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city_code: Option<String>,
}

/// Flat, display-ready view of one offer. Every field is always filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub airline_name: String,
    pub price: Price,
    pub departure_code: String,
    pub departure_time: String,
    pub arrival_code: String,
    pub arrival_time: String,
    pub stop_count: usize,
    /// Empty when the offer carries no aircraft code.
    pub aircraft_name: String,
    pub origin_city: String,
    pub destination_city: String,
}

impl DisplayRecord {
    pub fn stop_label(&self) -> String {
        match self.stop_count {
            0 => "Direct".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("malformed offer: {0}")]
    MalformedOffer(String),
}

/// Every variant means the search request failed; users only ever see
/// [`SearchError::USER_MESSAGE`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("search service answered with status {0}")]
    InvalidStatus(u16),
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    pub const USER_MESSAGE: &'static str = "Error fetching flights";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("field `{0}` is required")]
    MissingField(&'static str),
    #[error("field `{field}` has invalid value `{value}`")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
