//! Interactive numbered menu over a [`MovieStore`].
//!
//! The loop only talks to a [`Terminal`], so the same code drives the
//! rustyline session in the binary and scripted sessions in tests.

mod actions;
mod prompt;
mod terminal;

pub use terminal::{RustylineTerminal, Terminal};

use crate::movie_store::{MovieStore, StoreError};
use crate::omdb::MovieLookup;
use std::path::Path;
use tracing::{debug, error};

const CHOICE_PROMPT: &str = "Enter choice (0-11): ";
const PAUSE_PROMPT: &str = "Press Enter to continue...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    SortByRating,
    SortByYear,
    Filter,
    GenerateWebsite,
}

impl MenuChoice {
    /// Every choice in the order it is displayed.
    pub const ALL: [MenuChoice; 12] = [
        MenuChoice::Exit,
        MenuChoice::List,
        MenuChoice::Add,
        MenuChoice::Delete,
        MenuChoice::Update,
        MenuChoice::Stats,
        MenuChoice::Random,
        MenuChoice::Search,
        MenuChoice::SortByRating,
        MenuChoice::SortByYear,
        MenuChoice::Filter,
        MenuChoice::GenerateWebsite,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Exit => "0",
            MenuChoice::List => "1",
            MenuChoice::Add => "2",
            MenuChoice::Delete => "3",
            MenuChoice::Update => "4",
            MenuChoice::Stats => "5",
            MenuChoice::Random => "6",
            MenuChoice::Search => "7",
            MenuChoice::SortByRating => "8",
            MenuChoice::SortByYear => "9",
            MenuChoice::Filter => "10",
            MenuChoice::GenerateWebsite => "11",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit",
            MenuChoice::List => "List movies",
            MenuChoice::Add => "Add movie",
            MenuChoice::Delete => "Delete movie",
            MenuChoice::Update => "Update movie",
            MenuChoice::Stats => "Stats",
            MenuChoice::Random => "Random movie",
            MenuChoice::Search => "Search movie",
            MenuChoice::SortByRating => "Movies sorted by rating",
            MenuChoice::SortByYear => "Movies sorted by year",
            MenuChoice::Filter => "Filter movies",
            MenuChoice::GenerateWebsite => "Generate website",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == input)
    }
}

/// Everything an action needs besides the terminal.
pub struct MenuContext<'a> {
    pub store: &'a dyn MovieStore,
    /// Without a lookup service, new movies are entered by hand.
    pub lookup: Option<&'a dyn MovieLookup>,
    pub template_path: &'a Path,
    pub output_path: &'a Path,
    pub page_title: &'a str,
}

/// Runs the menu until the user picks Exit or closes the input.
pub fn run(ctx: &MenuContext, term: &mut dyn Terminal) {
    loop {
        term.show_menu();
        let Some(line) = term.read_line(CHOICE_PROMPT) else {
            break;
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Exit) => {
                term.goodbye();
                return;
            }
            Some(choice) => run_action(ctx, term, choice),
            None => term.error("Invalid choice."),
        }

        if term.read_line(PAUSE_PROMPT).is_none() {
            break;
        }
    }
    term.goodbye();
}

/// Runs a single action. Failures are reported and never end the session.
pub fn run_action(ctx: &MenuContext, term: &mut dyn Terminal, choice: MenuChoice) {
    debug!("Running menu action {:?}", choice);
    let result = match choice {
        MenuChoice::Exit => Ok(()),
        MenuChoice::List => actions::list(ctx, term),
        MenuChoice::Add => actions::add(ctx, term),
        MenuChoice::Delete => actions::delete(ctx, term),
        MenuChoice::Update => actions::update(ctx, term),
        MenuChoice::Stats => actions::stats(ctx, term),
        MenuChoice::Random => actions::random(ctx, term, &mut rand::rng()),
        MenuChoice::Search => actions::search(ctx, term),
        MenuChoice::SortByRating => actions::sort_by_rating(ctx, term),
        MenuChoice::SortByYear => actions::sort_by_year(ctx, term),
        MenuChoice::Filter => actions::filter(ctx, term),
        MenuChoice::GenerateWebsite => actions::generate_website(ctx, term),
    };

    if let Err(err) = result {
        error!("Menu action {:?} failed: {:#}", choice, err);
        match err.downcast_ref::<StoreError>() {
            Some(store_err) if store_err.is_not_found() => term.error("Movie not found."),
            _ => term.error(&format!("Something went wrong: {:#}", err)),
        }
    }
}
