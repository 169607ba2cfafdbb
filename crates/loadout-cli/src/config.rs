use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use loadout_cache::DEFAULT_RECENT_CAPACITY;
use loadout_store::{FsPresetStore, HttpPresetStore, PresetStore, STORAGE_PREFIX};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Client configuration. Every key is optional in the TOML file; command-line
/// flags take precedence over file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host of the save endpoint (`<api_base>/api/save-preset`).
    pub api_base: String,
    /// Read root. A URL, or a local directory holding `presets/`.
    /// Defaults to `<api_base>/presets`.
    pub storage_root: Option<String>,
    pub cache_dir: PathBuf,
    pub recent_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8787".into(),
            storage_root: None,
            cache_dir: PathBuf::from(".loadout/cache"),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// File config (if any) with command-line overrides applied.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(api_base) = &cli.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(root) = &cli.storage_root {
            config.storage_root = Some(root.clone());
        }
        if let Some(dir) = &cli.cache_dir {
            config.cache_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn storage_root(&self) -> String {
        match &self.storage_root {
            Some(root) => root.clone(),
            None => format!("{}/{STORAGE_PREFIX}", self.api_base.trim_end_matches('/')),
        }
    }

    pub fn save_endpoint(&self) -> String {
        format!("{}/api/save-preset", self.api_base.trim_end_matches('/'))
    }

    /// Object store selected by the storage root: HTTP for URLs, the
    /// filesystem otherwise.
    pub fn open_store(&self) -> Arc<dyn PresetStore> {
        let root = self.storage_root();
        if root.starts_with("http://") || root.starts_with("https://") {
            Arc::new(HttpPresetStore::new(root).with_save_endpoint(self.save_endpoint()))
        } else {
            Arc::new(FsPresetStore::new(root))
        }
    }
}
