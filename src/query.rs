use crate::model::{QueryError, SearchCriteria};
use chrono::NaiveDate;
use tracing::debug;

/// Canonical value for a raw form field. Airport codes are uppercased,
/// everything else passes through untouched.
pub fn normalize_field(field: &str, raw: &str) -> String {
    match field {
        "origin" | "destination" => raw.to_uppercase(),
        _ => raw.to_string(),
    }
}

/// Raw search form state, one string per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub passengers: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            date: String::new(),
            passengers: "1".to_string(),
        }
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: &str, raw: &str) {
        let value = normalize_field(field, raw);
        match field {
            "origin" => self.origin = value,
            "destination" => self.destination = value,
            "date" => self.date = value,
            "passengers" => self.passengers = value,
            other => debug!("Ignoring unknown form field: {}", other),
        }
    }

    /// Applies the input constraints of the form and builds the request.
    pub fn to_criteria(&self) -> Result<SearchCriteria, QueryError> {
        let origin = airport_code("origin", &self.origin)?;
        let destination = airport_code("destination", &self.destination)?;

        let date = required("date", &self.date)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            QueryError::InvalidValue { field: "date", value: date.to_string() }
        })?;

        let passengers = required("passengers", &self.passengers)?;
        let passengers = match passengers.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(QueryError::InvalidValue {
                    field: "passengers",
                    value: passengers.to_string(),
                });
            }
        };

        Ok(SearchCriteria { origin, destination, date, passengers })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, QueryError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QueryError::MissingField(field));
    }
    Ok(value)
}

fn airport_code(field: &'static str, value: &str) -> Result<String, QueryError> {
    let value = required(field, value)?;
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(value.to_string())
    } else {
        Err(QueryError::InvalidValue { field, value: value.to_string() })
    }
}
