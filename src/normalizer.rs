use crate::model::{
    Dictionaries, DisplayRecord, NormalizeError, RawOffer, SearchResponse,
};
use crate::utils::{ClockStyle, format_clock};
use std::collections::HashMap;
use tracing::{info, warn};

/// Display records of one search, in upstream order, plus the offers that
/// were skipped as malformed (by their position in the response).
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub records: Vec<DisplayRecord>,
    pub rejected: Vec<(usize, NormalizeError)>,
}

pub struct OfferNormalizer {
    clock: ClockStyle,
}

impl OfferNormalizer {
    pub fn new(clock: ClockStyle) -> Self {
        Self { clock }
    }

    /// Flattens one offer. Dictionary misses fall back to the raw codes;
    /// only a structurally broken offer is an error.
    pub fn normalize(
        &self,
        offer: &RawOffer,
        dicts: &Dictionaries,
    ) -> Result<DisplayRecord, NormalizeError> {
        let itinerary = offer
            .itineraries
            .first()
            .ok_or_else(|| malformed("offer has no itineraries"))?;
        let (first, last) = match (itinerary.segments.first(), itinerary.segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(malformed("itinerary has no segments")),
        };
        let airline_code = offer
            .validating_airline_codes
            .first()
            .ok_or_else(|| malformed("offer has no validating airline"))?;

        let aircraft_code = first
            .aircraft
            .as_ref()
            .and_then(|a| a.code.as_deref())
            .unwrap_or("");
        let aircraft_name = if aircraft_code.is_empty() {
            ""
        } else {
            resolve(dicts.aircraft.as_ref(), aircraft_code, |name| Some(name.as_str()))
        };

        let departure_code = &first.departure.iata_code;
        let arrival_code = &last.arrival.iata_code;

        Ok(DisplayRecord {
            airline_name: resolve(dicts.carriers.as_ref(), airline_code, |name| Some(name.as_str()))
                .to_string(),
            price: offer.price.clone(),
            departure_code: departure_code.clone(),
            departure_time: self.display_time(&first.departure.at)?,
            arrival_code: arrival_code.clone(),
            arrival_time: self.display_time(&last.arrival.at)?,
            stop_count: itinerary.segments.len() - 1,
            aircraft_name: aircraft_name.to_string(),
            origin_city: resolve(dicts.locations.as_ref(), departure_code, |loc| {
                loc.city_code.as_deref()
            })
            .to_string(),
            destination_city: resolve(dicts.locations.as_ref(), arrival_code, |loc| {
                loc.city_code.as_deref()
            })
            .to_string(),
        })
    }

    /// Turns a whole search response into display records. Missing `data`
    /// means no offers, missing `dictionaries` means empty tables, and an
    /// element that is not an offer at all is skipped like a malformed one.
    pub fn assemble(&self, response: SearchResponse) -> NormalizedBatch {
        let dicts = response.dictionaries.unwrap_or_default();
        let data = response.data.unwrap_or_default();

        let mut batch = NormalizedBatch::default();
        for (index, value) in data.into_iter().enumerate() {
            let result = serde_json::from_value::<RawOffer>(value)
                .map_err(|e| malformed(&e.to_string()))
                .and_then(|offer| self.normalize(&offer, &dicts));
            self.push(&mut batch, index, result);
        }

        info!(
            "Normalized {} offers ({} skipped)",
            batch.records.len(),
            batch.rejected.len()
        );
        batch
    }

    fn push(
        &self,
        batch: &mut NormalizedBatch,
        index: usize,
        result: Result<DisplayRecord, NormalizeError>,
    ) {
        match result {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!("Skipping offer #{}: {}", index, e);
                batch.rejected.push((index, e));
            }
        }
    }

    fn display_time(&self, at: &str) -> Result<String, NormalizeError> {
        format_clock(at, self.clock)
            .ok_or_else(|| malformed(&format!("unparseable timestamp `{}`", at)))
    }
}

impl Default for OfferNormalizer {
    fn default() -> Self {
        Self::new(ClockStyle::default())
    }
}

/// Looks `code` up in an optional table. A missing table, a missing key and
/// an empty value all resolve to `code` itself.
fn resolve<'a, V>(
    table: Option<&'a HashMap<String, V>>,
    code: &'a str,
    pick: impl FnOnce(&'a V) -> Option<&'a str>,
) -> &'a str {
    table
        .and_then(|t| t.get(code))
        .and_then(pick)
        .filter(|name| !name.is_empty())
        .unwrap_or(code)
}

fn malformed(reason: &str) -> NormalizeError {
    NormalizeError::MalformedOffer(reason.to_string())
}
