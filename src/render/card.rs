use crate::model::DisplayRecord;

/// Renders one offer as a text card.
pub fn format_card(record: &DisplayRecord) -> String {
    let mut card = format!(
        "✈️ {}\n🛫 {} ({}) {} → 🛬 {} ({}) {}\n🔁 {}",
        record.airline_name,
        record.departure_code,
        record.origin_city,
        record.departure_time,
        record.arrival_code,
        record.destination_city,
        record.arrival_time,
        record.stop_label(),
    );
    if !record.aircraft_name.is_empty() {
        card.push_str(&format!("\n🛩 {}", record.aircraft_name));
    }
    card.push_str(&format!(
        "\n💰 {} {}",
        record.price.total, record.price.currency
    ));
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;

    #[test]
    fn card_lists_route_stops_and_price() {
        let mut record = DisplayRecord {
            airline_name: "AMERICAN AIRLINES".into(),
            price: Price { total: "245.60".into(), currency: "EUR".into() },
            departure_code: "JFK".into(),
            departure_time: "08:05".into(),
            arrival_code: "LAX".into(),
            arrival_time: "13:35".into(),
            stop_count: 1,
            aircraft_name: "BOEING 737-800".into(),
            origin_city: "NYC".into(),
            destination_city: "LAX".into(),
        };

        let card = format_card(&record);
        assert_eq!(
            card,
            "✈️ AMERICAN AIRLINES\n🛫 JFK (NYC) 08:05 → 🛬 LAX (LAX) 13:35\n🔁 1 stop\n🛩 BOEING 737-800\n💰 245.60 EUR"
        );

        record.aircraft_name.clear();
        assert!(!format_card(&record).contains("🛩"));
    }
}
