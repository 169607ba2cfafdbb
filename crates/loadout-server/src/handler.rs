use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use loadout_schema::normalize_preset;
use loadout_store::{PresetStore, StoredObject};
use loadout_types::PresetId;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PresetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PresetStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: String,
}

/// `POST /api/save-preset`.
///
/// Accepts `{"data": <preset>}` or a bare preset object. The payload is
/// normalized, canonicalized and written create-if-absent; the response
/// carries its content address.
pub async fn save_preset(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<SaveResponse>> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let payload = match body.get("data") {
        Some(data) => data,
        None => &body,
    };
    if !payload.is_object() {
        return Err(ServerError::BadRequest(
            "Preset data must be a JSON object".into(),
        ));
    }

    let preset = normalize_preset(payload);
    let object = StoredObject::seal(&preset).map_err(ServerError::SaveFailed)?;
    let id = state
        .store
        .put_if_absent(&object)
        .await
        .map_err(ServerError::SaveFailed)?;
    info!(%id, "preset saved via endpoint");
    Ok(Json(SaveResponse { id: id.to_string() }))
}

/// `GET /presets/{id}.json`: stored bytes as-is.
pub async fn read_preset(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ServerResult<Response> {
    let id = file
        .strip_suffix(".json")
        .and_then(|stem| PresetId::parse(stem).ok())
        .ok_or(ServerError::NotFound)?;
    match state.store.get(&id).await {
        Ok(bytes) => {
            debug!(%id, size = bytes.len(), "serving preset");
            Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
        }
        Err(e) if e.is_not_found() => Err(ServerError::NotFound),
        Err(e) => Err(e.into()),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": "loadout-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
