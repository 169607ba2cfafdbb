//! HTTP server for the loadout preset vault.
//!
//! Hosts the write path (`POST /api/save-preset`), which content-addresses
//! and stores a preset create-if-absent, and the anonymous read path
//! (`GET /presets/{id}.json`) over any [`PresetStore`](loadout_store::PresetStore).

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::LoadoutServer;
