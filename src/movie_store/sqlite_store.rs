use super::schema::MOVIES_TABLE;
use super::{MovieStore, StoreError, StoreResult};
use crate::movie::{MovieCollection, MovieInfo};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode};
use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, info};

/// Stores movies as rows of the `movies` table, one statement per call.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteMovieStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open movies database at {:?}", db_path))?;
        Self::initialize(&conn)?;
        info!("Movies database ready at {:?}", db_path);

        Ok(SqliteMovieStore {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(SqliteMovieStore {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        MOVIES_TABLE
            .create_if_missing(conn)
            .context("Failed to create movies table")?;
        MOVIES_TABLE
            .validate(conn)
            .context("Movies table does not match the expected schema")
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

impl MovieStore for SqliteMovieStore {
    fn list(&self) -> StoreResult<MovieCollection> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT title, year, rating, poster_url FROM {} ORDER BY id",
            MOVIES_TABLE.name
        ))?;
        let movies = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    MovieInfo {
                        year: row.get(1)?,
                        rating: row.get(2)?,
                        poster_url: row.get(3)?,
                    },
                ))
            })?
            .collect::<Result<MovieCollection, _>>()?;
        Ok(movies)
    }

    fn add(
        &self,
        title: &str,
        year: i32,
        rating: f64,
        poster_url: Option<&str>,
    ) -> StoreResult<()> {
        let conn = self.conn();
        conn.execute(
            &format!(
                "INSERT INTO {} (title, year, rating, poster_url) VALUES (?1, ?2, ?3, ?4)",
                MOVIES_TABLE.name
            ),
            params![title, year, rating, poster_url],
        )
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::AlreadyExists {
                    title: title.to_string(),
                }
            } else {
                StoreError::Database(err)
            }
        })?;
        debug!("Inserted movie {}", title);
        Ok(())
    }

    fn delete(&self, title: &str) -> StoreResult<()> {
        let conn = self.conn();
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE title = ?1", MOVIES_TABLE.name),
            params![title],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound {
                title: title.to_string(),
            });
        }
        debug!("Deleted movie {}", title);
        Ok(())
    }

    fn update_rating(&self, title: &str, rating: f64) -> StoreResult<()> {
        let conn = self.conn();
        let updated = conn.execute(
            &format!("UPDATE {} SET rating = ?1 WHERE title = ?2", MOVIES_TABLE.name),
            params![rating, title],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                title: title.to_string(),
            });
        }
        debug!("Updated rating of {} to {}", title, rating);
        Ok(())
    }

    fn location(&self) -> String {
        self.db_path.display().to_string()
    }
}
