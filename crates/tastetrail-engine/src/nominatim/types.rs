//! Nominatim `/search` response types (`format=jsonv2`).
//!
//! ### Coordinates
//! `lat` and `lon` are decimal **strings**, not numbers.
//!
//! ### Name
//! `name` is often `""` for unnamed POIs; the first segment of
//! `display_name` is the better label in that case.
//!
//! ### Category
//! `jsonv2` calls the OSM key `category`, plain `json` calls it `class`.
//! The OSM value (`restaurant`, `fast_food`, `cafe`, ...) is in `type`.
//!
//! ### `extratags`
//! Only present with `extratags=1`, and `null` when the object has none.

use std::collections::HashMap;

use serde::Deserialize;
use tastetrail_core::{Coordinate, PlaceCandidate};

#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, alias = "class")]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub address: HashMap<String, String>,
    #[serde(default)]
    pub extratags: Option<HashMap<String, String>>,
}

const LOCALITY_KEYS: &[&str] = &["city", "town", "village", "suburb", "hamlet"];

impl NominatimPlace {
    /// Converts to a candidate. `None` when the coordinates do not parse or
    /// no usable name exists.
    pub fn into_candidate(self) -> Option<PlaceCandidate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        let coordinate = Coordinate::new(latitude, longitude);
        if !coordinate.is_finite() {
            return None;
        }

        let name = non_blank(self.name.as_deref())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .and_then(|first| non_blank(Some(first)))
            })?
            .to_owned();

        let locality = LOCALITY_KEYS
            .iter()
            .find_map(|key| non_blank(self.address.get(*key).map(String::as_str)))
            .map(str::to_owned);
        let street = non_blank(self.address.get("road").map(String::as_str)).map(|road| {
            match non_blank(self.address.get("house_number").map(String::as_str)) {
                Some(number) => format!("{road} {number}"),
                None => road.to_owned(),
            }
        });
        let address_parts: Vec<&str> = [street.as_deref(), locality.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let address = (!address_parts.is_empty()).then(|| address_parts.join(", "));

        let extratags = self.extratags.unwrap_or_default();
        let tag = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| non_blank(extratags.get(*key).map(String::as_str)))
                .map(str::to_owned)
        };

        Some(PlaceCandidate {
            name,
            coordinate,
            address,
            phone_number: tag(&["phone", "contact:phone"]),
            category: non_blank(self.kind.as_deref())
                .or_else(|| non_blank(self.category.as_deref()))
                .map(str::to_owned),
            website_url: tag(&["website", "contact:website", "url"]),
            postal_code: non_blank(self.address.get("postcode").map(String::as_str))
                .map(str::to_owned),
            locality,
            country: non_blank(self.address.get("country").map(String::as_str)).map(str::to_owned),
            time_zone: None,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> NominatimPlace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_a_full_jsonv2_item() {
        let place = parse(json!({
            "lat": "52.4934",
            "lon": "13.3880",
            "name": "Curry 36",
            "display_name": "Curry 36, 36, Mehringdamm, Kreuzberg, Berlin, 10961, Deutschland",
            "category": "amenity",
            "type": "fast_food",
            "address": {
                "house_number": "36",
                "road": "Mehringdamm",
                "suburb": "Kreuzberg",
                "city": "Berlin",
                "postcode": "10961",
                "country": "Deutschland"
            },
            "extratags": {
                "website": "https://curry36.de",
                "contact:phone": "+49 30 2517368"
            }
        }));

        let candidate = place.into_candidate().unwrap();
        assert_eq!(candidate.name, "Curry 36");
        assert_eq!(candidate.coordinate, Coordinate::new(52.4934, 13.3880));
        assert_eq!(candidate.category.as_deref(), Some("fast_food"));
        assert_eq!(candidate.address.as_deref(), Some("Mehringdamm 36, Berlin"));
        assert_eq!(candidate.locality.as_deref(), Some("Berlin"));
        assert_eq!(candidate.postal_code.as_deref(), Some("10961"));
        assert_eq!(candidate.country.as_deref(), Some("Deutschland"));
        assert_eq!(candidate.website_url.as_deref(), Some("https://curry36.de"));
        assert_eq!(candidate.phone_number.as_deref(), Some("+49 30 2517368"));
    }

    #[test]
    fn falls_back_to_display_name_when_name_is_blank() {
        let place = parse(json!({
            "lat": "48.1372",
            "lon": "11.5756",
            "name": "",
            "display_name": "Schneider Bräuhaus, Tal, Altstadt, München",
            "class": "amenity",
            "type": "restaurant",
            "extratags": null
        }));
        let candidate = place.into_candidate().unwrap();
        assert_eq!(candidate.name, "Schneider Bräuhaus");
        assert!(candidate.address.is_none());
        assert!(candidate.website_url.is_none());
    }

    #[test]
    fn skips_items_with_unparseable_coordinates() {
        let place = parse(json!({"lat": "north", "lon": "13.4", "name": "X"}));
        assert!(place.into_candidate().is_none());
    }

    #[test]
    fn skips_items_without_any_name() {
        let place = parse(json!({"lat": "52.5", "lon": "13.4", "display_name": " , Berlin"}));
        assert!(place.into_candidate().is_none());
    }
}
