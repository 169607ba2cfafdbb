use async_trait::async_trait;
use bytes::Bytes;
use loadout_types::PresetId;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;
use crate::traits::PresetStore;

/// Remote preset store over HTTP.
///
/// Reads are anonymous GETs of `<storage_root>/<id>.json`. Writes POST
/// `{"data": <preset>}` to the save endpoint, which hashes server-side; the
/// returned id must match the locally computed one. Without a save endpoint
/// the store is read-only.
#[derive(Clone, Debug)]
pub struct HttpPresetStore {
    client: reqwest::Client,
    storage_root: String,
    save_endpoint: Option<String>,
}

#[derive(Deserialize)]
struct SaveResponse {
    id: String,
}

impl HttpPresetStore {
    /// Read-only store rooted at `storage_root`
    /// (e.g. `https://host/presets`).
    pub fn new(storage_root: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            storage_root: storage_root.into().trim_end_matches('/').to_string(),
            save_endpoint: None,
        }
    }

    /// Enable writes through `endpoint` (e.g. `https://host/api/save-preset`).
    pub fn with_save_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.save_endpoint = Some(endpoint.into());
        self
    }

    /// Use a preconfigured client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// URL of a stored preset.
    pub fn object_url(&self, id: &PresetId) -> String {
        format!("{}/{}", self.storage_root, id.file_name())
    }
}

#[async_trait]
impl PresetStore for HttpPresetStore {
    async fn exists(&self, id: &PresetId) -> StoreResult<bool> {
        let response = self.client.head(self.object_url(id)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::Transport(format!(
                "HEAD {} returned {status}",
                self.object_url(id)
            ))),
        }
    }

    async fn write(&self, object: &StoredObject) -> StoreResult<()> {
        let endpoint = self.save_endpoint.as_ref().ok_or(StoreError::ReadOnly)?;
        let body = json!({ "data": object.to_value()? });
        debug!(%endpoint, id = %object.id, "posting preset to save endpoint");
        let response = self.client.post(endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Transport(format!(
                "save endpoint responded with {status}: {detail}"
            )));
        }
        let saved: SaveResponse = response.json().await?;
        if saved.id != object.id.as_str() {
            return Err(StoreError::Transport(format!(
                "save endpoint returned id {}, expected {}",
                saved.id, object.id
            )));
        }
        Ok(())
    }

    async fn get(&self, id: &PresetId) -> StoreResult<Bytes> {
        let url = self.object_url(id);
        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.clone())),
            status if status.is_success() => Ok(response.bytes().await?),
            status => Err(StoreError::Transport(format!("GET {url} returned {status}"))),
        }
    }

    fn location(&self, id: &PresetId) -> String {
        self.object_url(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_trims_trailing_slash() {
        let store = HttpPresetStore::new("https://example.com/presets/");
        let id = PresetId::parse("0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(
            store.object_url(&id),
            "https://example.com/presets/0123456789abcdef0123456789abcdef.json"
        );
        assert_eq!(store.location(&id), store.object_url(&id));
    }

    #[tokio::test]
    async fn read_only_store_rejects_writes() {
        let store = HttpPresetStore::new("http://127.0.0.1:9/presets");
        let obj = StoredObject::seal(&loadout_types::SavedPreset::blank()).unwrap();
        let err = store.write(&obj).await.unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let store = HttpPresetStore::new("http://127.0.0.1:9/presets");
        let id = PresetId::parse("abc").unwrap();
        let err = store.get(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
