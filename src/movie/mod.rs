use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything stored for a movie besides its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub year: i32,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl MovieInfo {
    pub fn new(year: i32, rating: f64) -> Self {
        MovieInfo {
            year,
            rating,
            poster_url: None,
        }
    }

    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }
}

/// A full snapshot of the catalog, keyed by the exact stored title.
pub type MovieCollection = BTreeMap<String, MovieInfo>;

/// Formats a movie the way every listing in the menu shows it.
pub fn format_movie_line(title: &str, info: &MovieInfo) -> String {
    format!("{} ({}): {}", title, info.year, info.rating)
}
