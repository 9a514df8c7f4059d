//! Rule-based cuisine tagging from provider category and place name.
//!
//! Two fixed tables are scanned in order: category substrings first, then name
//! keywords. Tags keep first-match order and are never repeated. A place that
//! matches nothing gets the single [`FALLBACK_TAG`].

/// Tag assigned when no rule matches.
pub const FALLBACK_TAG: &str = "Unclassified";

/// Substrings of the lower-cased provider category, each mapped to a tag.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["restaurant", "dining"], "Restaurant"),
    (&["cafe", "coffee"], "Café"),
    (&["bakery"], "Bäckerei"),
    (&["fastfood", "fast_food", "fast food"], "Fast Food"),
    (&["bar", "pub"], "Bar"),
    (&["pizza"], "Pizza"),
    (&["icecream", "ice_cream", "gelato"], "Eis"),
    (&["bistro"], "Bistro"),
    (&["pub", "biergarten"], "Pub"),
    (&["brasserie"], "Brasserie"),
    (&["winery", "weinstube", "weingut"], "Weinstube"),
    (
        &["foodcourt", "food_court", "food court", "food_hall", "food hall"],
        "Food Court",
    ),
];

/// Keywords in the lower-cased place name, each mapped to a tag.
const NAME_RULES: &[(&str, &str)] = &[
    ("pizza", "Pizza"),
    ("italian", "Italienisch"),
    ("chinese", "Chinesisch"),
    ("japanese", "Japanisch"),
    ("sushi", "Sushi"),
    ("mexican", "Mexikanisch"),
    ("indian", "Indisch"),
    ("thai", "Thailändisch"),
    ("burger", "Burger"),
    ("steak", "Steak"),
    ("seafood", "Meeresfrüchte"),
    ("vegetarian", "Vegetarisch"),
    ("vegan", "Vegan"),
    ("bakery", "Bäckerei"),
    ("cafe", "Café"),
    ("café", "Café"),
    ("coffee", "Kaffee"),
    ("bar", "Bar"),
    ("bistro", "Bistro"),
    ("brasserie", "Brasserie"),
    ("pub", "Pub"),
    ("winery", "Weinstube"),
    ("weinstube", "Weinstube"),
    ("fine dining", "Fine Dining"),
    ("gourmet", "Fine Dining"),
    ("upscale", "Fine Dining"),
];

/// Classify a place into one or more cuisine tags.
///
/// The result is never empty.
#[must_use]
pub fn classify(category: Option<&str>, name: &str) -> Vec<String> {
    let category = category.unwrap_or_default().to_lowercase();
    let name = name.to_lowercase();

    let category_tags = CATEGORY_RULES
        .iter()
        .filter(|(needles, _)| needles.iter().any(|n| category.contains(n)))
        .map(|&(_, tag)| tag);
    let name_tags = NAME_RULES
        .iter()
        .filter(|(keyword, _)| name.contains(keyword))
        .map(|&(_, tag)| tag);

    let mut tags: Vec<String> = Vec::new();
    for tag in category_tags.chain(name_tags) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }
    tags
}

#[cfg(test)]
#[path = "cuisine_test.rs"]
mod tests;
