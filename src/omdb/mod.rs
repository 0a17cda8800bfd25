//! OMDb API client used to fill in movie details from a free-text title.
//!
//! Lookups are a single blocking request with a fixed timeout, no retries.
//! Parsing is kept separate from the transport so it can be tested offline.

use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT_SEC: u64 = 5;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster_url: Option<String>,
}

/// Every answer OMDb can give once a response body was received.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(MovieDetails),
    NotFound(String),
    Malformed(String),
}

/// The request itself did not complete.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unable to connect to the OMDb API: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("OMDb API answered with HTTP status {0}")]
    Http(reqwest::StatusCode),

    #[error("OMDb request failed: {0}")]
    Request(#[source] reqwest::Error),
}

#[derive(Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// Year of release, or of the first season for ranges such as "2008–2013".
fn parse_year(raw: &str) -> Option<i32> {
    raw.split(['–', '-'])
        .next()
        .and_then(|first| first.trim().parse().ok())
}

/// Turns an OMDb response body into a lookup outcome.
pub fn parse_lookup_response(body: &str) -> LookupOutcome {
    let response: OmdbResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(err) => return LookupOutcome::Malformed(format!("invalid JSON: {}", err)),
    };

    if response.response.as_deref() != Some("True") {
        return LookupOutcome::NotFound(
            response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        );
    }

    let Some(title) = response.title else {
        return LookupOutcome::Malformed("missing Title".to_string());
    };
    let Some(year) = response.year.as_deref().and_then(parse_year) else {
        return LookupOutcome::Malformed(format!("unparseable Year {:?}", response.year));
    };
    let rating = match response.imdb_rating.as_deref() {
        None | Some(NOT_AVAILABLE) => 0.0,
        Some(raw) => match raw.parse::<f64>() {
            Ok(rating) => rating,
            Err(_) => {
                return LookupOutcome::Malformed(format!("unparseable imdbRating {:?}", raw))
            }
        },
    };
    let poster_url = response
        .poster
        .filter(|poster| poster != NOT_AVAILABLE && !poster.is_empty());

    LookupOutcome::Found(MovieDetails {
        title,
        year,
        rating,
        poster_url,
    })
}

/// Anything that can resolve a free-text title to movie details.
pub trait MovieLookup {
    fn lookup(&self, title: &str) -> Result<LookupOutcome, LookupError>;
}

pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl MovieLookup for OmdbClient {
    fn lookup(&self, title: &str) -> Result<LookupOutcome, LookupError> {
        debug!("Looking up {:?} on OMDb", title);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .map_err(|err| {
                if err.is_connect() || err.is_timeout() {
                    LookupError::Connection(err)
                } else {
                    LookupError::Request(err)
                }
            })?;

        if !response.status().is_success() {
            return Err(LookupError::Http(response.status()));
        }

        let body = response.text().map_err(LookupError::Request)?;
        Ok(parse_lookup_response(&body))
    }
}
