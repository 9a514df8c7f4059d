use tastetrail_core::EnrichedPlace;
use tastetrail_engine::FALLBACK_TAG;

const NAME_WIDTH: usize = 32;

pub(crate) fn print_places(places: &[EnrichedPlace]) {
    println!(
        "{:<34}{:>9}  {:<8}{:<9}CUISINE",
        "NAME", "DIST", "RATING", "REVIEWS"
    );
    for place in places {
        println!(
            "{:<34}{:>9}  {:<8}{:<9}{}",
            truncate(place.name(), NAME_WIDTH),
            place
                .distance_from_center
                .map_or_else(|| "\u{2014}".to_owned(), |d| format!("{d:.0} m")),
            place
                .rating()
                .map_or_else(|| "\u{2014}".to_owned(), |r| format!("{r:.1}")),
            place
                .review_count()
                .map_or_else(|| "\u{2014}".to_owned(), |n| n.to_string()),
            cuisine_label(&place.cuisine_types),
        );
    }
    println!("{} place(s)", places.len());
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}

fn cuisine_label(tags: &[String]) -> String {
    if tags.is_empty() {
        FALLBACK_TAG.to_owned()
    } else {
        tags.join(", ")
    }
}
