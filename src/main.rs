use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_catalog::cli_style::{self, get_styles};
use movie_catalog::config::{AppConfig, CliConfig, EnvConfig, FileConfig};
use movie_catalog::menu::{self, MenuContext, RustylineTerminal};
use movie_catalog::movie_store::{self, StorageBackend};
use movie_catalog::omdb::{MovieLookup, OmdbClient};
use movie_catalog::JsonMovieStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Values in the file take precedence over CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Storage backend for the movie collection.
    #[clap(long, value_enum)]
    pub backend: Option<StorageBackend>,

    /// JSON file holding the collection. If omitted, it is looked up in the
    /// current directory and its parents.
    #[clap(long, value_parser = parse_path)]
    pub movies_file: Option<PathBuf>,

    /// SQLite database URL, e.g. sqlite:///movies.db. Falls back to DB_URL.
    #[clap(long)]
    pub db_url: Option<String>,

    /// HTML template used to generate the website.
    #[clap(long, value_parser = parse_path)]
    pub template: Option<PathBuf>,

    /// Where the generated website is written.
    #[clap(long, value_parser = parse_path)]
    pub output: Option<PathBuf>,

    /// Base URL of the OMDb API.
    #[clap(long)]
    pub omdb_url: Option<String>,

    /// Timeout in seconds for OMDb requests.
    #[clap(long)]
    pub omdb_timeout_sec: Option<u64>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            backend: self.backend,
            movies_file: self
                .movies_file
                .clone()
                .or_else(JsonMovieStore::infer_path),
            db_url: self.db_url.clone(),
            template_path: self.template.clone(),
            output_path: self.output.clone(),
            omdb_url: self.omdb_url.clone(),
            omdb_timeout_sec: self.omdb_timeout_sec,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(
        &cli_args.to_cli_config(),
        file_config,
        &EnvConfig::from_env(),
    )?;

    let store = movie_store::open(&app_config.store).context("Could not open the movie store")?;

    let omdb_client = match &app_config.omdb {
        Some(settings) => {
            info!("OMDb lookups enabled via {}", settings.base_url);
            Some(OmdbClient::new(
                &settings.base_url,
                &settings.api_key,
                Duration::from_secs(settings.timeout_sec),
            )?)
        }
        None => {
            info!("No OMDb API key configured, movies will be entered manually");
            None
        }
    };

    let ctx = MenuContext {
        store: store.as_ref(),
        lookup: omdb_client.as_ref().map(|client| client as &dyn MovieLookup),
        template_path: &app_config.template_path,
        output_path: &app_config.output_path,
        page_title: &app_config.page_title,
    };

    cli_style::print_banner(&store.location());
    let mut terminal = RustylineTerminal::new()?;
    menu::run(&ctx, &mut terminal);
    Ok(())
}
