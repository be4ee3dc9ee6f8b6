//! Built-in headlines shown when the provider is down or out of quota.

use chrono::{DateTime, Utc};

use crate::article::Article;

fn sample(title: &str, description: &str, image: &str, source: &str, published: &str) -> Article {
    Article {
        title: title.to_owned(),
        description: Some(description.to_owned()),
        url: None,
        image_url: Some(format!("https://images.unsplash.com/{image}?w=400&h=200&fit=crop")),
        source_name: Some(source.to_owned()),
        published_at: DateTime::parse_from_rfc3339(published)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// First-page fallback: eight articles, one or two per category.
pub fn fallback_articles() -> Vec<Article> {
    vec![
        sample(
            "Breaking: Major Tech Innovation Announced",
            "A revolutionary new technology has been unveiled that promises to transform the industry landscape and improve efficiency across multiple sectors.",
            "photo-1518709268805-4e9042af2176",
            "Tech Daily",
            "2024-01-15T10:30:00Z",
        ),
        sample(
            "Global Markets Show Strong Recovery",
            "Financial markets worldwide are experiencing a significant upturn, with major indices reaching new highs and investor confidence on the rise.",
            "photo-1611974789855-9c2a0a7236a3",
            "Business Times",
            "2024-01-15T09:15:00Z",
        ),
        sample(
            "Championship Finals Set for Record Attendance",
            "The upcoming championship game is expected to draw the largest crowd in history, with fans from around the world securing their tickets.",
            "photo-1571019613454-1cb2f99b2d8b",
            "Sports Central",
            "2024-01-15T08:45:00Z",
        ),
        sample(
            "New Health Guidelines Released",
            "Health authorities have issued updated guidelines that could significantly impact public health policies and individual wellness practices.",
            "photo-1576091160399-112ba8d25d1f",
            "Health News",
            "2024-01-15T07:30:00Z",
        ),
        sample(
            "Entertainment Industry Celebrates Record Year",
            "The entertainment sector has reported unprecedented growth, with streaming services and live events driving the industry to new heights.",
            "photo-1514525253161-7a46d19cd819",
            "Entertainment Weekly",
            "2024-01-15T06:20:00Z",
        ),
        sample(
            "Scientific Breakthrough in Renewable Energy",
            "Researchers have made a groundbreaking discovery in renewable energy technology that could accelerate the transition to clean energy sources.",
            "photo-1509391366360-2e959784f276",
            "Science Daily",
            "2024-01-15T05:10:00Z",
        ),
        sample(
            "Climate Change Summit Yields Historic Agreement",
            "World leaders have reached a landmark agreement on climate action, setting ambitious targets for carbon reduction and renewable energy adoption.",
            "photo-1569163131107-9eb3a97c4a8c",
            "Global News",
            "2024-01-15T04:30:00Z",
        ),
        sample(
            "Space Exploration: New Mars Mission Announced",
            "NASA has announced plans for a groundbreaking Mars mission that will search for signs of ancient life on the red planet.",
            "photo-1446776811953-b23d57bd21aa",
            "Space Today",
            "2024-01-15T03:45:00Z",
        ),
    ]
}

/// Appended by "load more" when the provider fails.
pub fn fallback_more_articles() -> Vec<Article> {
    vec![
        sample(
            "Additional Tech News: AI Breakthrough",
            "Artificial intelligence researchers have achieved a major milestone that could revolutionize how we interact with technology.",
            "photo-1485827404703-89b55fcc595e",
            "AI Weekly",
            "2024-01-15T04:00:00Z",
        ),
        sample(
            "Market Analysis: Investment Trends",
            "Financial analysts are reporting new investment patterns that could reshape the global economy in the coming years.",
            "photo-1551288049-bebda4e38f71",
            "Finance Today",
            "2024-01-15T03:30:00Z",
        ),
    ]
}
