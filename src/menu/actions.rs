use super::prompt::{
    read_non_empty, read_optional_rating, read_optional_year, read_rating, read_year, read_yes,
};
use super::{MenuContext, Terminal};
use crate::movie::MovieCollection;
use crate::omdb::LookupOutcome;
use crate::query::{self, MovieFilter, MovieRef, SearchResult, YearOrder};
use crate::website;
use anyhow::Result;
use rand::Rng;
use tracing::warn;

const EMPTY_COLLECTION: &str = "No movies in the database.";
const EMPTY_INPUT: &str = "No empty input allowed.";
const MOVIE_NOT_FOUND: &str = "Movie not found.";

fn print_movies(term: &mut dyn Terminal, movies: &[MovieRef]) {
    for (title, info) in movies {
        term.movie(title, info);
    }
}

/// Lists the collection, or reports it empty. Returns `None` when empty.
fn load_non_empty(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<Option<MovieCollection>> {
    let movies = ctx.store.list()?;
    if movies.is_empty() {
        term.info(EMPTY_COLLECTION);
        return Ok(None);
    }
    Ok(Some(movies))
}

pub fn list(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(movies) = load_non_empty(ctx, term)? else {
        return Ok(());
    };
    term.info(&format!("{} movies in total:", movies.len()));
    for (title, info) in &movies {
        term.movie(title, info);
    }
    Ok(())
}

pub fn add(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(title) = read_non_empty(term, "Enter new movie name: ", "Title must not be empty.")
    else {
        return Ok(());
    };

    let movies = ctx.store.list()?;
    if query::find_title(&movies, &title).is_some() {
        term.error("This movie already exists.");
        return Ok(());
    }

    let (title, year, rating, poster_url) = match ctx.lookup {
        Some(lookup) => match lookup.lookup(&title) {
            Ok(LookupOutcome::Found(details)) => {
                // OMDb may correct the title to one that is already stored.
                if query::find_title(&movies, &details.title).is_some() {
                    term.error("This movie already exists.");
                    return Ok(());
                }
                (details.title, details.year, details.rating, details.poster_url)
            }
            Ok(LookupOutcome::NotFound(reason)) => {
                term.error(&format!("Movie not found in OMDb: {}", reason));
                return Ok(());
            }
            Ok(LookupOutcome::Malformed(reason)) => {
                warn!("Malformed OMDb response for {:?}: {}", title, reason);
                term.error(&format!("Unexpected response from OMDb: {}", reason));
                return Ok(());
            }
            Err(err) => {
                warn!("OMDb lookup for {:?} failed: {}", title, err);
                term.error(&format!("Could not reach OMDb: {}", err));
                return Ok(());
            }
        },
        None => {
            let Some(year) = read_year(term, "Enter new movie year: ") else {
                return Ok(());
            };
            let Some(rating) = read_rating(term, "Enter new movie rating (0-10): ") else {
                return Ok(());
            };
            (title, year, rating, None)
        }
    };

    ctx.store.add(&title, year, rating, poster_url.as_deref())?;
    term.success(&format!("Added: {} ({}), rating: {}", title, year, rating));
    if let Some(poster_url) = poster_url {
        term.info(&format!("Poster URL: {}", poster_url));
    }
    Ok(())
}

pub fn delete(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(name) = read_non_empty(term, "Enter movie name to delete: ", EMPTY_INPUT) else {
        return Ok(());
    };
    let movies = ctx.store.list()?;
    let Some(title) = query::find_title(&movies, &name) else {
        term.error(MOVIE_NOT_FOUND);
        return Ok(());
    };

    ctx.store.delete(title)?;
    term.success(&format!("Movie '{}' successfully deleted.", title));
    Ok(())
}

pub fn update(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(name) = read_non_empty(term, "Enter movie name to update: ", EMPTY_INPUT) else {
        return Ok(());
    };
    let movies = ctx.store.list()?;
    let Some(title) = query::find_title(&movies, &name) else {
        term.error(MOVIE_NOT_FOUND);
        return Ok(());
    };
    let Some(rating) = read_rating(term, "Enter new movie rating (0-10): ") else {
        return Ok(());
    };

    ctx.store.update_rating(title, rating)?;
    term.success(&format!("Movie '{}' successfully updated.", title));
    Ok(())
}

pub fn stats(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let movies = ctx.store.list()?;
    let Some(stats) = query::stats(&movies) else {
        term.info(EMPTY_COLLECTION);
        return Ok(());
    };

    term.info(&format!("Average rating: {:.1}", stats.average));
    term.info(&format!("Median rating: {:.1}", stats.median));
    term.info(&format!(
        "Best movie(s) ({}): {}",
        stats.best_rating,
        stats.best_titles()
    ));
    term.info(&format!(
        "Worst movie(s) ({}): {}",
        stats.worst_rating,
        stats.worst_titles()
    ));
    Ok(())
}

pub fn random<R: Rng + ?Sized>(
    ctx: &MenuContext,
    term: &mut dyn Terminal,
    rng: &mut R,
) -> Result<()> {
    let movies = ctx.store.list()?;
    match query::random_movie(&movies, rng) {
        Some((title, info)) => term.info(&format!(
            "Your movie for tonight: {} ({}), rated {}",
            title, info.year, info.rating
        )),
        None => term.info(EMPTY_COLLECTION),
    }
    Ok(())
}

pub fn search(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(part) = read_non_empty(term, "Enter part of movie name: ", EMPTY_INPUT) else {
        return Ok(());
    };
    let movies = ctx.store.list()?;
    match query::search(&movies, &part) {
        SearchResult::EmptyCollection => term.info(EMPTY_COLLECTION),
        SearchResult::NoMatch => term.error(MOVIE_NOT_FOUND),
        SearchResult::Matches(matches) => print_movies(term, &matches),
    }
    Ok(())
}

pub fn sort_by_rating(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(movies) = load_non_empty(ctx, term)? else {
        return Ok(());
    };
    print_movies(term, &query::sort_by_rating(&movies));
    Ok(())
}

pub fn sort_by_year(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(movies) = load_non_empty(ctx, term)? else {
        return Ok(());
    };
    let Some(latest_first) = read_yes(term, "Do you want the latest movies first? (Y/N): ") else {
        return Ok(());
    };
    let order = if latest_first {
        YearOrder::NewestFirst
    } else {
        YearOrder::OldestFirst
    };
    print_movies(term, &query::sort_by_year(&movies, order));
    Ok(())
}

pub fn filter(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let Some(min_rating) = read_optional_rating(
        term,
        "Enter minimum rating (leave blank for no minimum rating): ",
    ) else {
        return Ok(());
    };
    let Some(start_year) =
        read_optional_year(term, "Enter start year (leave blank for no start year): ")
    else {
        return Ok(());
    };
    let Some(end_year) = read_optional_year(term, "Enter end year (leave blank for no end year): ")
    else {
        return Ok(());
    };

    let movie_filter = MovieFilter {
        min_rating,
        start_year,
        end_year,
    };
    let movies = ctx.store.list()?;
    let matching = query::filter(&movies, &movie_filter);
    if matching.is_empty() {
        term.info("No movies match the filter criteria.");
        return Ok(());
    }
    term.info("Filtered movies:");
    print_movies(term, &matching);
    Ok(())
}

pub fn generate_website(ctx: &MenuContext, term: &mut dyn Terminal) -> Result<()> {
    let movies = ctx.store.list()?;
    website::generate_website(ctx.template_path, ctx.output_path, ctx.page_title, &movies)?;
    term.success("Website was generated successfully.");
    Ok(())
}
