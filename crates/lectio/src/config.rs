use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub content: ContentConfig,
    pub db: DbConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Bundled corpus document (JSON).
    pub corpus_path: PathBuf,
    /// Bundled daily reference list (JSON array of address strings).
    pub daily_references_path: PathBuf,
    /// Cap on search results handed to screens.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    lectio_core::DEFAULT_SEARCH_LIMIT
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.content.corpus_path.as_os_str().is_empty() {
        anyhow::bail!("content.corpus_path must not be empty");
    }
    if config.content.daily_references_path.as_os_str().is_empty() {
        anyhow::bail!("content.daily_references_path must not be empty");
    }
    if config.content.search_limit == 0 {
        anyhow::bail!("content.search_limit must be > 0");
    }
    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }

    Ok(config)
}
