//! Yelp Fusion `/businesses/search` response types.
//!
//! Only the fields the engine uses are modelled. `rating` is a float in
//! half-star steps, `review_count` an integer, and `image_url` may be `""`
//! when the business has no photo.
//!
//! Business fields are read leniently: a field with an unexpected shape
//! becomes `None` and a malformed category entry is skipped, so one bad value
//! never costs the rest of the match.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tastetrail_core::EnrichmentResult;

/// `None` for null or mistyped values instead of a deserialization error.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Elements that parse as `T`; anything other than an array yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[derive(Debug, Deserialize)]
pub struct BusinessSearchResponse {
    #[serde(default)]
    pub businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
pub struct Business {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub review_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Vec<BusinessCategory>,
}

#[derive(Debug, Deserialize)]
pub struct BusinessCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// Typical dishes per category family. The first family whose keyword occurs
/// in any category title wins.
const DISH_HINTS: &[(&[&str], [&str; 3])] = &[
    (&["pizza"], ["Margherita", "Pepperoni", "Hawaii"]),
    (&["burger"], ["Cheeseburger", "Chicken Burger", "Pommes"]),
    (&["sushi", "japanese"], ["Maki", "Nigiri", "Sashimi"]),
    (&["chinese"], ["Gong Bao", "Frühlingsrollen", "Reisgericht"]),
    (&["italian"], ["Pasta", "Pizza", "Risotto"]),
];

/// Category titles in provider order, followed by the dishes of the first
/// matching family.
#[must_use]
pub fn menu_hints(categories: &[BusinessCategory]) -> Vec<String> {
    let mut items: Vec<String> = categories
        .iter()
        .filter_map(|c| c.title.as_deref())
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect();
    let lowered: Vec<String> = items.iter().map(|t| t.to_lowercase()).collect();

    let dishes = DISH_HINTS.iter().find_map(|(keywords, dishes)| {
        lowered
            .iter()
            .any(|title| keywords.iter().any(|k| title.contains(k)))
            .then_some(dishes)
    });
    if let Some(dishes) = dishes {
        items.extend(dishes.iter().map(|d| (*d).to_owned()));
    }
    items
}

impl Business {
    pub fn into_enrichment(self) -> EnrichmentResult {
        EnrichmentResult {
            rating: self.rating,
            review_count: self.review_count.and_then(|n| u32::try_from(n).ok()),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            menu_items: menu_hints(&self.categories),
            review_site_url: self.url.filter(|u| !u.trim().is_empty()),
        }
        .sanitized()
    }
}
