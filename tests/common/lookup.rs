use movie_catalog::omdb::{LookupError, LookupOutcome, MovieDetails, MovieLookup};
use std::collections::HashMap;

/// Answers lookups from a fixed table keyed by lowercase title.
#[derive(Default)]
pub struct ScriptedLookup {
    answers: HashMap<String, LookupOutcome>,
    unavailable: bool,
}

impl ScriptedLookup {
    pub fn with_movie(
        mut self,
        query: &str,
        title: &str,
        year: i32,
        rating: f64,
        poster_url: Option<&str>,
    ) -> Self {
        self.answers.insert(
            query.to_lowercase(),
            LookupOutcome::Found(MovieDetails {
                title: title.to_string(),
                year,
                rating,
                poster_url: poster_url.map(str::to_string),
            }),
        );
        self
    }

    pub fn with_malformed(mut self, query: &str) -> Self {
        self.answers.insert(
            query.to_lowercase(),
            LookupOutcome::Malformed("missing Title".to_string()),
        );
        self
    }

    /// Every lookup fails as if the service answered 503.
    pub fn unavailable() -> Self {
        ScriptedLookup {
            unavailable: true,
            ..Default::default()
        }
    }
}

impl MovieLookup for ScriptedLookup {
    fn lookup(&self, title: &str) -> Result<LookupOutcome, LookupError> {
        if self.unavailable {
            return Err(LookupError::Http(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self
            .answers
            .get(&title.to_lowercase())
            .cloned()
            .unwrap_or_else(|| LookupOutcome::NotFound("Movie not found!".to_string())))
    }
}
