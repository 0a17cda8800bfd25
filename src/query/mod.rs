//! Read-only operations over a collection snapshot: statistics, filtering,
//! sorting, search and random selection.
//!
//! None of these touch a store. Callers fetch the collection with
//! [`crate::MovieStore::list`] and pass it in.

use crate::movie::{MovieCollection, MovieInfo};
use rand::Rng;

/// A movie borrowed from a collection, title first.
pub type MovieRef<'a> = (&'a str, &'a MovieInfo);

fn refs(movies: &MovieCollection) -> impl Iterator<Item = MovieRef<'_>> {
    movies.iter().map(|(title, info)| (title.as_str(), info))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub average: f64,
    pub median: f64,
    pub best_rating: f64,
    pub best: Vec<String>,
    pub worst_rating: f64,
    pub worst: Vec<String>,
}

impl CollectionStats {
    pub fn best_titles(&self) -> String {
        self.best.join(", ")
    }

    pub fn worst_titles(&self) -> String {
        self.worst.join(", ")
    }
}

/// Computes rating statistics, or `None` for an empty collection.
pub fn stats(movies: &MovieCollection) -> Option<CollectionStats> {
    if movies.is_empty() {
        return None;
    }

    let mut ratings: Vec<f64> = movies.values().map(|info| info.rating).collect();
    ratings.sort_by(f64::total_cmp);

    let count = ratings.len();
    let average = ratings.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        ratings[count / 2]
    } else {
        (ratings[count / 2 - 1] + ratings[count / 2]) / 2.0
    };
    let worst_rating = ratings[0];
    let best_rating = ratings[count - 1];

    let titles_rated = |rating: f64| -> Vec<String> {
        movies
            .iter()
            .filter(|(_, info)| info.rating == rating)
            .map(|(title, _)| title.clone())
            .collect()
    };

    Some(CollectionStats {
        average,
        median,
        best_rating,
        best: titles_rated(best_rating),
        worst_rating,
        worst: titles_rated(worst_rating),
    })
}

/// Independently optional bounds. Year bounds are inclusive, the rating
/// bound is a minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovieFilter {
    pub min_rating: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl MovieFilter {
    pub fn matches(&self, info: &MovieInfo) -> bool {
        if self.min_rating.is_some_and(|min| info.rating < min) {
            return false;
        }
        if self.start_year.is_some_and(|start| info.year < start) {
            return false;
        }
        if self.end_year.is_some_and(|end| info.year > end) {
            return false;
        }
        true
    }
}

pub fn filter<'a>(movies: &'a MovieCollection, movie_filter: &MovieFilter) -> Vec<MovieRef<'a>> {
    refs(movies)
        .filter(|(_, info)| movie_filter.matches(info))
        .collect()
}

/// Highest rating first.
pub fn sort_by_rating(movies: &MovieCollection) -> Vec<MovieRef<'_>> {
    let mut sorted: Vec<MovieRef> = refs(movies).collect();
    sorted.sort_by(|(_, a), (_, b)| b.rating.total_cmp(&a.rating));
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOrder {
    NewestFirst,
    OldestFirst,
}

pub fn sort_by_year(movies: &MovieCollection, order: YearOrder) -> Vec<MovieRef<'_>> {
    let mut sorted: Vec<MovieRef> = refs(movies).collect();
    match order {
        YearOrder::NewestFirst => sorted.sort_by(|(_, a), (_, b)| b.year.cmp(&a.year)),
        YearOrder::OldestFirst => sorted.sort_by(|(_, a), (_, b)| a.year.cmp(&b.year)),
    }
    sorted
}

#[derive(Debug, PartialEq)]
pub enum SearchResult<'a> {
    EmptyCollection,
    NoMatch,
    Matches(Vec<MovieRef<'a>>),
}

/// Case-insensitive substring match on titles.
pub fn search<'a>(movies: &'a MovieCollection, query: &str) -> SearchResult<'a> {
    if movies.is_empty() {
        return SearchResult::EmptyCollection;
    }
    let query = query.to_lowercase();
    let matches: Vec<MovieRef> = refs(movies)
        .filter(|(title, _)| title.to_lowercase().contains(&query))
        .collect();
    if matches.is_empty() {
        SearchResult::NoMatch
    } else {
        SearchResult::Matches(matches)
    }
}

/// Picks one movie uniformly at random, `None` if there is nothing to pick.
pub fn random_movie<'a, R: Rng + ?Sized>(
    movies: &'a MovieCollection,
    rng: &mut R,
) -> Option<MovieRef<'a>> {
    if movies.is_empty() {
        return None;
    }
    let index = rng.random_range(0..movies.len());
    refs(movies).nth(index)
}

/// Resolves user input to the stored title, ignoring case.
pub fn find_title<'a>(movies: &'a MovieCollection, name: &str) -> Option<&'a str> {
    let name = name.to_lowercase();
    movies
        .keys()
        .find(|title| title.to_lowercase() == name)
        .map(String::as_str)
}
