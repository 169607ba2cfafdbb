use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from a TOML file. Missing keys take their
/// default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `presets/<id>.json`.
    pub storage_root: PathBuf,
    /// Request body limit for the save endpoint.
    pub max_body_bytes: usize,
    /// Answer CORS preflights and add `Access-Control-Allow-Origin: *`.
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            storage_root: PathBuf::from("."),
            max_body_bytes: 1024 * 1024,
            permissive_cors: true,
        }
    }
}

impl ServerConfig {
    /// Read a config file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
