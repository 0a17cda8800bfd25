//! Static HTML page generation from a template with two placeholders.

use crate::movie::MovieCollection;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const MOVIE_GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
pub const DEFAULT_PAGE_TITLE: &str = "My Movie Collection";

#[derive(Debug, Error)]
pub enum WebsiteError {
    #[error("template file not found: {0:?}")]
    TemplateNotFound(PathBuf),

    #[error("failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write website to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One list item per movie: poster, title, year and rating.
pub fn render_movie_grid(movies: &MovieCollection) -> String {
    let mut grid = String::from("\n<ul class=\"movie-grid\">\n");
    for (title, info) in movies {
        let title = escape_html(title);
        let poster = info.poster_url.as_deref().map(escape_html).unwrap_or_default();
        grid.push_str(&format!(
            r#"    <li>
        <div class="movie">
            <img class="movie-poster" src="{poster}" alt="{title} poster">
            <div class="movie-title">{title}</div>
            <div class="movie-year">{year} | ⭐ {rating}</div>
        </div>
    </li>
"#,
            poster = poster,
            title = title,
            year = info.year,
            rating = info.rating,
        ));
    }
    grid.push_str("</ul>\n");
    grid
}

pub fn render_page(template: &str, page_title: &str, movies: &MovieCollection) -> String {
    template
        .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
        .replace(MOVIE_GRID_PLACEHOLDER, &render_movie_grid(movies))
}

/// Reads the template, renders every movie into it and writes the page.
pub fn generate_website(
    template_path: &Path,
    output_path: &Path,
    page_title: &str,
    movies: &MovieCollection,
) -> Result<(), WebsiteError> {
    let template = fs::read_to_string(template_path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            WebsiteError::TemplateNotFound(template_path.to_path_buf())
        } else {
            WebsiteError::Read {
                path: template_path.to_path_buf(),
                source,
            }
        }
    })?;

    let page = render_page(&template, page_title, movies);
    fs::write(output_path, page).map_err(|source| WebsiteError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        "Generated website with {} movies at {:?}",
        movies.len(),
        output_path
    );
    Ok(())
}
