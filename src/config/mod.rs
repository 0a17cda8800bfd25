mod file_config;

pub use file_config::{FileConfig, OmdbConfig};

use crate::movie_store::{StorageBackend, StoreLocation};
use crate::omdb::{DEFAULT_OMDB_URL, DEFAULT_TIMEOUT_SEC};
use crate::website::DEFAULT_PAGE_TITLE;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_MOVIES_FILE: &str = "movies.json";
pub const DEFAULT_TEMPLATE_PATH: &str = "static/index_template.html";
pub const DEFAULT_OUTPUT_PATH: &str = "static/index.html";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub backend: Option<StorageBackend>,
    pub movies_file: Option<PathBuf>,
    pub db_url: Option<String>,
    pub template_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub omdb_url: Option<String>,
    pub omdb_timeout_sec: Option<u64>,
}

/// Values picked up from the process environment (and `.env`).
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub backend: Option<String>,
    pub db_url: Option<String>,
    pub omdb_api_key: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        EnvConfig {
            backend: var("MOVIES_BACKEND"),
            db_url: var("DB_URL"),
            omdb_api_key: var("OMDB_API_KEY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmdbSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreLocation,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub page_title: String,
    /// `None` when no API key is configured, movies are then entered by hand.
    pub omdb: Option<OmdbSettings>,
}

impl AppConfig {
    /// Resolve configuration from the TOML file, CLI arguments and environment.
    /// For each setting the first source that has it wins, in that order.
    pub fn resolve(
        cli: &CliConfig,
        file_config: Option<FileConfig>,
        env: &EnvConfig,
    ) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let backend = match file.backend.as_deref() {
            Some(s) => parse_backend(s)?,
            None => match (cli.backend, env.backend.as_deref()) {
                (Some(backend), _) => backend,
                (None, Some(s)) => parse_backend(s)?,
                (None, None) => StorageBackend::default(),
            },
        };

        let store = match backend {
            StorageBackend::Json => StoreLocation::Json(
                file.movies_file
                    .map(PathBuf::from)
                    .or_else(|| cli.movies_file.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_MOVIES_FILE)),
            ),
            StorageBackend::Sqlite => {
                let db_url = file
                    .db_url
                    .or_else(|| cli.db_url.clone())
                    .or_else(|| env.db_url.clone())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "db_url must be specified via --db-url, the DB_URL variable or in config file"
                        )
                    })?;
                StoreLocation::Sqlite(parse_db_url(&db_url)?)
            }
        };

        let template_path = file
            .template_path
            .map(PathBuf::from)
            .or_else(|| cli.template_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH));
        let output_path = file
            .output_path
            .map(PathBuf::from)
            .or_else(|| cli.output_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
        let page_title = file
            .page_title
            .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string());

        let omdb_file = file.omdb.unwrap_or_default();
        let omdb = omdb_file
            .api_key
            .or_else(|| env.omdb_api_key.clone())
            .map(|api_key| OmdbSettings {
                base_url: omdb_file
                    .url
                    .or_else(|| cli.omdb_url.clone())
                    .unwrap_or_else(|| DEFAULT_OMDB_URL.to_string()),
                api_key,
                timeout_sec: omdb_file
                    .timeout_sec
                    .or(cli.omdb_timeout_sec)
                    .unwrap_or(DEFAULT_TIMEOUT_SEC),
            });

        Ok(Self {
            store,
            template_path,
            output_path,
            page_title,
            omdb,
        })
    }
}

/// Parses a backend name using clap's ValueEnum trait.
fn parse_backend(s: &str) -> Result<StorageBackend> {
    match StorageBackend::from_str(s, true) {
        Ok(backend) => Ok(backend),
        Err(_) => bail!("Unknown storage backend '{}', expected json or sqlite", s),
    }
}

/// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db`, `sqlite://`
/// (in-memory) or a bare file path.
pub fn parse_db_url(url: &str) -> Result<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        bail!("Empty database URL");
    }
    if let Some(path) = url.strip_prefix("sqlite:///") {
        if path.is_empty() {
            bail!("Database URL {} has no file path", url);
        }
        return Ok(PathBuf::from(path));
    }
    if let Some(rest) = url.strip_prefix("sqlite://") {
        if rest.is_empty() {
            return Ok(PathBuf::from(":memory:"));
        }
        bail!("Database URL {} must use three slashes before the file path", url);
    }
    if url.contains("://") {
        bail!("Unsupported database URL {}, only sqlite is supported", url);
    }
    Ok(PathBuf::from(url))
}
