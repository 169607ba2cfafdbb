use std::sync::Arc;

use loadout_store::FsPresetStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Preset server over a filesystem store.
pub struct LoadoutServer {
    config: ServerConfig,
    state: AppState,
}

impl LoadoutServer {
    /// Server storing presets under `config.storage_root`.
    pub fn new(config: ServerConfig) -> Self {
        let store = FsPresetStore::new(&config.storage_root);
        let state = AppState::new(Arc::new(store));
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve until the task is dropped.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        tracing::info!(
            addr = %listener.local_addr()?,
            root = %self.config.storage_root.display(),
            "loadout server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = LoadoutServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8787".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = LoadoutServer::new(ServerConfig::default());
        let _router = server.router();
    }
}
