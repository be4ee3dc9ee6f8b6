use crate::feed::Category;

/// Keyword rules, first match wins. Order matters: `"ai"` must be tried before
/// `"market"`, and `"sport"` also covers `"sports"`.
const RULES: &[(&str, Category)] = &[
    ("tech", Category::Technology),
    ("ai", Category::Technology),
    ("business", Category::Business),
    ("market", Category::Business),
    ("sport", Category::Sports),
    ("health", Category::Health),
    ("medical", Category::Health),
    ("science", Category::Science),
    ("space", Category::Science),
    ("entertainment", Category::Entertainment),
    ("movie", Category::Entertainment),
    ("climate", Category::General),
    ("environment", Category::General),
];

const DEFAULT_ICON: &str = "fa-newspaper";

const WORDS_PER_MINUTE: usize = 200;

/// Guesses a display category from a headline by substring match on the lowercased title.
pub fn classify(title: &str) -> Category {
    let lower = title.to_lowercase();
    RULES
        .iter()
        .find(|(keyword, _)| lower.contains(*keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

pub fn icon_for(category: Category) -> &'static str {
    match category {
        Category::Technology => "fa-microchip",
        Category::Business => "fa-chart-line",
        Category::Sports => "fa-futbol",
        Category::Health => "fa-heartbeat",
        Category::Science => "fa-flask",
        Category::Entertainment => "fa-film",
        Category::General => DEFAULT_ICON,
    }
}

/// Icon for a free-form label; unknown labels get the newspaper icon.
pub fn icon_for_label(label: &str) -> &'static str {
    label.parse::<Category>().map(icon_for).unwrap_or(DEFAULT_ICON)
}

/// Minutes at 200 words per minute, rounded up, never below 1.
pub fn reading_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
