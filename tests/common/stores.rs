use movie_catalog::movie_store::{self, MovieStore, StorageBackend, StoreLocation};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A store opened on a fresh temporary directory, kept alive as long as the store.
pub struct TestStore {
    pub store: Box<dyn MovieStore>,
    pub backend: StorageBackend,
    dir: TempDir,
}

impl TestStore {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn json_store() -> TestStore {
    let dir = TempDir::new().unwrap();
    let store = movie_store::open(&StoreLocation::Json(dir.path().join("movies.json"))).unwrap();
    TestStore {
        store,
        backend: StorageBackend::Json,
        dir,
    }
}

pub fn sqlite_store() -> TestStore {
    let dir = TempDir::new().unwrap();
    let store = movie_store::open(&StoreLocation::Sqlite(dir.path().join("movies.db"))).unwrap();
    TestStore {
        store,
        backend: StorageBackend::Sqlite,
        dir,
    }
}

/// Runs `check` once against a fresh store of each backend.
pub fn for_each_backend(check: impl Fn(&TestStore)) {
    for test_store in [json_store(), sqlite_store()] {
        check(&test_store);
    }
}
