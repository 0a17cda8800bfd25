//! Drives the whole menu loop with scripted input against real stores.

mod common;

use common::{
    for_each_backend, json_store, sqlite_store, ScriptedLookup, ScriptedTerminal, TestStore,
};
use movie_catalog::menu::{self, MenuContext};
use movie_catalog::omdb::MovieLookup;
use movie_catalog::{JsonMovieStore, MovieInfo, MovieStore};
use std::path::{Path, PathBuf};

const PAGE_TITLE: &str = "Test Movies";

struct Paths {
    template: PathBuf,
    output: PathBuf,
}

fn paths(dir: &Path) -> Paths {
    Paths {
        template: dir.join("index_template.html"),
        output: dir.join("index.html"),
    }
}

fn run_session(
    store: &dyn MovieStore,
    lookup: Option<&dyn MovieLookup>,
    dir: &Path,
    inputs: &[&str],
) -> ScriptedTerminal {
    let paths = paths(dir);
    let ctx = MenuContext {
        store,
        lookup,
        template_path: &paths.template,
        output_path: &paths.output,
        page_title: PAGE_TITLE,
    };
    let mut term = ScriptedTerminal::new(inputs);
    menu::run(&ctx, &mut term);
    term
}

fn run_plain(ts: &TestStore, inputs: &[&str]) -> ScriptedTerminal {
    run_session(ts.store.as_ref(), None, ts.dir(), inputs)
}

fn run_with_lookup(ts: &TestStore, lookup: &dyn MovieLookup, inputs: &[&str]) -> ScriptedTerminal {
    run_session(ts.store.as_ref(), Some(lookup), ts.dir(), inputs)
}

fn position(term: &ScriptedTerminal, line: &str) -> usize {
    term.output
        .iter()
        .position(|printed| printed == line)
        .unwrap_or_else(|| panic!("{:?} not printed, output: {:#?}", line, term.output))
}

#[test]
fn test_exit_says_goodbye() {
    let ts = json_store();
    let term = run_plain(&ts, &["0"]);

    assert!(term.printed("Menu:"));
    assert!(term.printed("11. Generate website"));
    assert_eq!(term.output.last().unwrap(), "Bye! See you later.");
    assert!(!term.prompts.iter().any(|p| p.starts_with("Press Enter")));
}

#[test]
fn test_closed_input_ends_session() {
    let ts = json_store();
    // Input ends while the add action asks for a title.
    let term = run_plain(&ts, &["2"]);

    assert_eq!(term.output.last().unwrap(), "Bye! See you later.");
    assert!(ts.store.list().unwrap().is_empty());
}

#[test]
fn test_invalid_choice_redisplays_menu() {
    let ts = json_store();
    let term = run_plain(&ts, &["12", "", "abc", "", "0"]);

    assert_eq!(term.errors, vec!["Invalid choice.", "Invalid choice."]);
    assert_eq!(term.output.iter().filter(|l| *l == "Menu:").count(), 3);
}

#[test]
fn test_list_empty_collection() {
    for_each_backend(|ts| {
        let term = run_plain(ts, &["1", "", "0"]);
        assert!(term.printed("No movies in the database."));
    });
}

#[test]
fn test_manual_add_then_list() {
    for_each_backend(|ts| {
        let term = run_plain(ts, &["2", "Heat", "1995", "8.3", "", "1", "", "0"]);

        assert!(term.printed("Added: Heat (1995), rating: 8.3"));
        assert!(term.printed("1 movies in total:"));
        assert!(term.printed("Heat (1995): 8.3"));
        assert_eq!(ts.store.list().unwrap()["Heat"], MovieInfo::new(1995, 8.3));
    });
}

#[test]
fn test_manual_add_reprompts_year_and_rating() {
    let ts = json_store();
    let term = run_plain(&ts, &["2", "Heat", "soon", "1995", "ten", "10.5", "8", "", "0"]);

    assert_eq!(
        term.errors,
        vec![
            "Invalid year.",
            "Invalid rating.",
            "Rating must be between 0.0 and 10.0."
        ]
    );
    assert_eq!(ts.store.list().unwrap()["Heat"], MovieInfo::new(1995, 8.0));
}

#[test]
fn test_add_rejects_empty_title() {
    let ts = json_store();
    let term = run_plain(&ts, &["2", "  ", "", "0"]);

    assert_eq!(term.errors, vec!["Title must not be empty."]);
    assert!(ts.store.list().unwrap().is_empty());
}

#[test]
fn test_add_refuses_existing_title_ignoring_case() {
    for_each_backend(|ts| {
        ts.store.add("Heat", 1995, 8.3, None).unwrap();

        let term = run_plain(ts, &["2", "HEAT", "", "0"]);

        assert_eq!(term.errors, vec!["This movie already exists."]);
        assert_eq!(ts.store.list().unwrap().len(), 1);
    });
}

#[test]
fn test_add_from_omdb_keeps_poster() {
    let ts = sqlite_store();
    let lookup = ScriptedLookup::default().with_movie(
        "matrix",
        "The Matrix",
        1999,
        8.7,
        Some("http://img/matrix.jpg"),
    );

    let term = run_with_lookup(&ts, &lookup, &["2", "matrix", "", "0"]);

    assert!(term.printed("Added: The Matrix (1999), rating: 8.7"));
    assert!(term.printed("Poster URL: http://img/matrix.jpg"));
    assert_eq!(
        ts.store.list().unwrap()["The Matrix"],
        MovieInfo::new(1999, 8.7).with_poster("http://img/matrix.jpg")
    );
    // Year and rating come from OMDb, nothing else is asked.
    assert!(!term.prompts.iter().any(|p| p.contains("year")));
}

#[test]
fn test_add_from_omdb_refuses_corrected_duplicate() {
    let ts = json_store();
    ts.store.add("The Matrix", 1999, 8.7, None).unwrap();
    let lookup = ScriptedLookup::default().with_movie("matrix", "The Matrix", 1999, 8.7, None);

    let term = run_with_lookup(&ts, &lookup, &["2", "matrix", "", "0"]);

    assert_eq!(term.errors, vec!["This movie already exists."]);
    assert_eq!(ts.store.list().unwrap().len(), 1);
}

#[test]
fn test_add_reports_omdb_failures() {
    let ts = json_store();

    let lookup = ScriptedLookup::default();
    let term = run_with_lookup(&ts, &lookup, &["2", "Nothing", "", "0"]);
    assert_eq!(term.errors, vec!["Movie not found in OMDb: Movie not found!"]);

    let lookup = ScriptedLookup::default().with_malformed("Broken");
    let term = run_with_lookup(&ts, &lookup, &["2", "Broken", "", "0"]);
    assert_eq!(term.errors, vec!["Unexpected response from OMDb: missing Title"]);

    let lookup = ScriptedLookup::unavailable();
    let term = run_with_lookup(&ts, &lookup, &["2", "Heat", "", "0"]);
    assert_eq!(term.errors.len(), 1);
    assert!(term.errors[0].starts_with("Could not reach OMDb"));

    assert!(ts.store.list().unwrap().is_empty());
}

#[test]
fn test_delete_resolves_title_ignoring_case() {
    for_each_backend(|ts| {
        ts.store.add("Heat", 1995, 8.3, None).unwrap();
        ts.store.add("Ronin", 1998, 7.2, None).unwrap();

        let term = run_plain(ts, &["3", "heat", "", "0"]);

        assert!(term.printed("Movie 'Heat' successfully deleted."));
        let movies = ts.store.list().unwrap();
        assert!(!movies.contains_key("Heat"));
        assert!(movies.contains_key("Ronin"));
    });
}

#[test]
fn test_delete_and_update_unknown_or_empty_title() {
    for_each_backend(|ts| {
        ts.store.add("Heat", 1995, 8.3, None).unwrap();

        let term = run_plain(ts, &["3", "Ronin", "", "4", "Ronin", "", "3", "", "", "0"]);

        assert_eq!(
            term.errors,
            vec!["Movie not found.", "Movie not found.", "No empty input allowed."]
        );
        assert_eq!(ts.store.list().unwrap().len(), 1);
    });
}

#[test]
fn test_update_reprompts_until_valid_rating() {
    for_each_backend(|ts| {
        ts.store
            .add("Heat", 1995, 8.3, Some("http://img/heat.jpg"))
            .unwrap();

        let term = run_plain(ts, &["4", "HEAT", "abc", "11", "9", "", "0"]);

        assert_eq!(
            term.errors,
            vec!["Invalid rating.", "Rating must be between 0.0 and 10.0."]
        );
        assert!(term.printed("Movie 'Heat' successfully updated."));
        assert_eq!(
            ts.store.list().unwrap()["Heat"],
            MovieInfo::new(1995, 9.0).with_poster("http://img/heat.jpg")
        );
    });
}

#[test]
fn test_stats_with_tied_best() {
    let ts = json_store();
    ts.store.add("A", 2000, 9.0, None).unwrap();
    ts.store.add("B", 2001, 9.0, None).unwrap();
    ts.store.add("C", 2002, 3.0, None).unwrap();

    let term = run_plain(&ts, &["5", "", "0"]);

    let start = position(&term, "Average rating: 7.0");
    assert_eq!(term.output[start + 1], "Median rating: 9.0");
    assert_eq!(term.output[start + 2], "Best movie(s) (9): A, B");
    assert_eq!(term.output[start + 3], "Worst movie(s) (3): C");
}

#[test]
fn test_random_pick_from_single_movie() {
    let ts = sqlite_store();
    ts.store.add("Heat", 1995, 8.3, None).unwrap();

    let term = run_plain(&ts, &["6", "", "6", "", "0"]);

    let picks = term
        .output
        .iter()
        .filter(|l| *l == "Your movie for tonight: Heat (1995), rated 8.3")
        .count();
    assert_eq!(picks, 2);
}

#[test]
fn test_search_substring() {
    let ts = json_store();
    ts.store.add("Titanic", 1997, 7.9, None).unwrap();
    ts.store.add("Matrix", 1999, 8.7, None).unwrap();

    let term = run_plain(&ts, &["7", "ti", "", "7", "xyz", "", "0"]);

    assert!(term.printed("Titanic (1997): 7.9"));
    assert!(!term.printed("Matrix (1999): 8.7"));
    assert_eq!(term.errors, vec!["Movie not found."]);
}

#[test]
fn test_sort_by_rating() {
    let ts = json_store();
    ts.store.add("Low", 2000, 2.0, None).unwrap();
    ts.store.add("High", 2000, 9.0, None).unwrap();
    ts.store.add("Mid", 2000, 5.0, None).unwrap();

    let term = run_plain(&ts, &["8", "", "0"]);

    let high = position(&term, "High (2000): 9");
    assert_eq!(term.output[high + 1], "Mid (2000): 5");
    assert_eq!(term.output[high + 2], "Low (2000): 2");
}

#[test]
fn test_sort_by_year_both_directions() {
    let ts = sqlite_store();
    ts.store.add("X", 2019, 5.0, None).unwrap();
    ts.store.add("Y", 2021, 5.0, None).unwrap();
    ts.store.add("Z", 2020, 5.0, None).unwrap();

    let term = run_plain(&ts, &["9", "Y", "", "0"]);
    let first = position(&term, "Y (2021): 5");
    assert_eq!(term.output[first + 1], "Z (2020): 5");
    assert_eq!(term.output[first + 2], "X (2019): 5");

    let term = run_plain(&ts, &["9", "n", "", "0"]);
    let first = position(&term, "X (2019): 5");
    assert_eq!(term.output[first + 1], "Z (2020): 5");
    assert_eq!(term.output[first + 2], "Y (2021): 5");
}

#[test]
fn test_filter_bounds() {
    let ts = json_store();
    ts.store.add("Old", 1980, 9.0, None).unwrap();
    ts.store.add("Mid", 2000, 6.0, None).unwrap();
    ts.store.add("New", 2020, 8.0, None).unwrap();

    let term = run_plain(&ts, &["10", "7", "1990", "", "", "0"]);
    assert!(term.printed("New (2020): 8"));
    assert!(!term.printed("Old (1980): 9"));
    assert!(!term.printed("Mid (2000): 6"));

    let term = run_plain(&ts, &["10", "", "", "", "", "0"]);
    assert!(term.printed("Old (1980): 9"));
    assert!(term.printed("Mid (2000): 6"));
    assert!(term.printed("New (2020): 8"));

    let term = run_plain(&ts, &["10", "9.5", "", "", "", "0"]);
    assert!(term.printed("No movies match the filter criteria."));
}

#[test]
fn test_filter_ignores_unparseable_year() {
    let ts = json_store();
    ts.store.add("Old", 1980, 9.0, None).unwrap();

    let term = run_plain(&ts, &["10", "", "nineteen", "", "", "0"]);

    assert!(term.printed("Old (1980): 9"));
}

#[test]
fn test_generate_website() {
    let ts = json_store();
    ts.store
        .add("Heat", 1995, 8.3, Some("http://img/heat.jpg"))
        .unwrap();
    let paths = paths(ts.dir());
    std::fs::write(
        &paths.template,
        "<title>__TEMPLATE_TITLE__</title><body>__TEMPLATE_MOVIE_GRID__</body>",
    )
    .unwrap();

    let term = run_plain(&ts, &["11", "", "0"]);

    assert!(term.printed("Website was generated successfully."));
    let page = std::fs::read_to_string(&paths.output).unwrap();
    assert!(page.contains("<title>Test Movies</title>"));
    assert!(page.contains("http://img/heat.jpg"));
    assert!(page.contains("1995 | ⭐ 8.3"));
}

#[test]
fn test_generate_website_without_template_keeps_session() {
    let ts = json_store();

    let term = run_plain(&ts, &["11", "", "1", "", "0"]);

    assert_eq!(term.errors.len(), 1);
    assert!(term.errors[0].starts_with("Something went wrong: template file not found"));
    assert!(term.printed("No movies in the database."));
    assert!(!paths(ts.dir()).output.exists());
}

#[test]
fn test_store_failure_is_reported_and_session_continues() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = JsonMovieStore::new(dir.path().join("missing").join("movies.json"));

    let term = run_session(
        &store,
        None,
        dir.path(),
        &["2", "Heat", "1995", "8", "", "1", "", "0"],
    );

    assert_eq!(term.errors.len(), 1);
    assert!(term.errors[0].starts_with("Something went wrong: I/O error"));
    assert!(term.printed("No movies in the database."));
    assert_eq!(term.output.last().unwrap(), "Bye! See you later.");
    assert_eq!(term.remaining_inputs(), 0);
}
