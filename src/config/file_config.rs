use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub backend: Option<String>,
    pub movies_file: Option<String>,
    pub db_url: Option<String>,

    // Website generation
    pub template_path: Option<String>,
    pub output_path: Option<String>,
    pub page_title: Option<String>,

    pub omdb: Option<OmdbConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct OmdbConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_sec: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
