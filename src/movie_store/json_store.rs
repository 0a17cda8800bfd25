use super::{MovieStore, StoreError, StoreResult};
use crate::config::DEFAULT_MOVIES_FILE;
use crate::movie::{MovieCollection, MovieInfo};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// What was found at the snapshot path.
enum Snapshot {
    Missing,
    Loaded(MovieCollection),
    /// The file exists but could not be read at all.
    Unreadable(std::io::Error),
    /// The file was read but does not hold a collection, including non UTF-8 bytes.
    Corrupt,
}

/// Keeps the whole collection as one JSON object in a single file.
///
/// Malformed or unreadable content is treated as an empty collection. Before a
/// write replaces a file that failed to parse, the old content is copied next
/// to it with a `.corrupt` suffix. Writes over a file that cannot be read fail.
pub struct JsonMovieStore {
    file_path: PathBuf,
}

impl JsonMovieStore {
    pub fn new<T: Into<PathBuf>>(file_path: T) -> Self {
        JsonMovieStore {
            file_path: file_path.into(),
        }
    }

    /// Walks up from the current directory looking for a `movies.json`.
    pub fn infer_path() -> Option<PathBuf> {
        let mut current_dir = std::env::current_dir().ok()?;
        loop {
            let candidate = current_dir.join(DEFAULT_MOVIES_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }
        None
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn read_snapshot(&self) -> Snapshot {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Snapshot::Missing,
            Err(err) => {
                warn!(
                    "Could not read movies file {:?}, treating it as empty: {}",
                    self.file_path, err
                );
                return Snapshot::Unreadable(err);
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(movies) => Snapshot::Loaded(movies),
            Err(err) => {
                warn!(
                    "Movies file {:?} is not valid, treating it as empty: {}",
                    self.file_path, err
                );
                Snapshot::Corrupt
            }
        }
    }

    /// Loads the collection for a read-modify-write cycle.
    fn load_for_update(&self) -> StoreResult<MovieCollection> {
        match self.read_snapshot() {
            Snapshot::Loaded(movies) => Ok(movies),
            Snapshot::Missing => Ok(MovieCollection::new()),
            Snapshot::Unreadable(source) => Err(StoreError::Io {
                path: self.file_path.clone(),
                source,
            }),
            Snapshot::Corrupt => {
                let backup_path = self.corrupt_backup_path();
                fs::copy(&self.file_path, &backup_path).map_err(|source| StoreError::Io {
                    path: backup_path.clone(),
                    source,
                })?;
                warn!(
                    "Backed up unparseable movies file to {:?} before overwriting it",
                    backup_path
                );
                Ok(MovieCollection::new())
            }
        }
    }

    /// Replaces the file with the given collection in a single rename.
    fn save(&self, movies: &MovieCollection) -> StoreResult<()> {
        let json_string = serde_json::to_string_pretty(movies)?;

        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| StoreError::Io {
            path: self.file_path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(&dir).map_err(io_err)?;
        file.write_all(json_string.as_bytes()).map_err(io_err)?;
        file.as_file().sync_all().map_err(io_err)?;
        file.persist(&self.file_path)
            .map_err(|err| io_err(err.error))?;

        debug!("Saved {} movies to {:?}", movies.len(), self.file_path);
        Ok(())
    }
}

impl MovieStore for JsonMovieStore {
    fn list(&self) -> StoreResult<MovieCollection> {
        match self.read_snapshot() {
            Snapshot::Loaded(movies) => Ok(movies),
            _ => Ok(MovieCollection::new()),
        }
    }

    fn add(
        &self,
        title: &str,
        year: i32,
        rating: f64,
        poster_url: Option<&str>,
    ) -> StoreResult<()> {
        let mut movies = self.load_for_update()?;
        movies.insert(
            title.to_string(),
            MovieInfo {
                year,
                rating,
                poster_url: poster_url.map(str::to_string),
            },
        );
        debug!("Adding movie {}", title);
        self.save(&movies)
    }

    fn delete(&self, title: &str) -> StoreResult<()> {
        let mut movies = self.load_for_update()?;
        if movies.remove(title).is_none() {
            debug!("Movie {} not in file, nothing to delete", title);
            return Ok(());
        }
        self.save(&movies)
    }

    fn update_rating(&self, title: &str, rating: f64) -> StoreResult<()> {
        let mut movies = self.load_for_update()?;
        match movies.get_mut(title) {
            Some(info) => info.rating = rating,
            None => {
                debug!("Movie {} not in file, nothing to update", title);
                return Ok(());
            }
        }
        self.save(&movies)
    }

    fn location(&self) -> String {
        self.file_path.display().to_string()
    }
}
