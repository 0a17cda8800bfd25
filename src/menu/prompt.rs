//! Re-prompting input helpers. Every helper returns `None` once the input is closed.

use super::Terminal;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

fn valid_rating(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Asks until a number within the rating range is entered.
pub fn read_rating(term: &mut dyn Terminal, prompt: &str) -> Option<f64> {
    loop {
        let input = term.read_line(prompt)?;
        match input.trim().parse::<f64>() {
            Ok(rating) if valid_rating(rating) => return Some(rating),
            Ok(_) => term.error("Rating must be between 0.0 and 10.0."),
            Err(_) => term.error("Invalid rating."),
        }
    }
}

/// Like [`read_rating`], but a blank answer means no rating.
pub fn read_optional_rating(term: &mut dyn Terminal, prompt: &str) -> Option<Option<f64>> {
    loop {
        let input = term.read_line(prompt)?;
        let input = input.trim();
        if input.is_empty() {
            return Some(None);
        }
        match input.parse::<f64>() {
            Ok(rating) if valid_rating(rating) => return Some(Some(rating)),
            Ok(_) => term.error("Rating must be between 0 and 10."),
            Err(_) => term.error("Invalid rating. Please enter a number between 0 and 10."),
        }
    }
}

/// Asks until an integer year is entered.
pub fn read_year(term: &mut dyn Terminal, prompt: &str) -> Option<i32> {
    loop {
        let input = term.read_line(prompt)?;
        match input.trim().parse::<i32>() {
            Ok(year) => return Some(year),
            Err(_) => term.error("Invalid year."),
        }
    }
}

/// A blank or unparseable answer means no year.
pub fn read_optional_year(term: &mut dyn Terminal, prompt: &str) -> Option<Option<i32>> {
    let input = term.read_line(prompt)?;
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    match input.parse::<i32>() {
        Ok(year) => Some(Some(year)),
        Err(_) => {
            term.warning("Invalid year, ignoring this bound.");
            Some(None)
        }
    }
}

/// Anything but "y" is a no.
pub fn read_yes(term: &mut dyn Terminal, prompt: &str) -> Option<bool> {
    let input = term.read_line(prompt)?;
    Some(input.trim().eq_ignore_ascii_case("y"))
}

/// Reads a line and trims it, reporting an error when it is empty.
pub fn read_non_empty(
    term: &mut dyn Terminal,
    prompt: &str,
    empty_message: &str,
) -> Option<String> {
    let input = term.read_line(prompt)?;
    let input = input.trim();
    if input.is_empty() {
        term.error(empty_message);
        return None;
    }
    Some(input.to_string())
}
