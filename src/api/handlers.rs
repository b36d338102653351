//! API Handlers
//!
//! HTTP request handlers for the cat resource.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::config::Config;
use crate::error::{CatError, Result};
use crate::models::{Cat, CatAttributes, CatParams, HealthResponse};
use crate::store::CatStore;

/// Application state shared across all handlers.
///
/// Contains the cat store wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cat store
    pub store: Arc<RwLock<CatStore>>,
}

impl AppState {
    /// Creates a new AppState with the given store.
    pub fn new(store: CatStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the snapshot file when `data_file` is set, otherwise keeps
    /// everything in memory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = match &config.data_file {
            Some(path) => CatStore::open(path)?,
            None => CatStore::new(),
        };
        Ok(Self::new(store))
    }
}

/// Parses a path identifier; anything unparseable is simply not found.
fn parse_id(raw: &str) -> Result<u64> {
    raw.parse().map_err(|_| CatError::NotFound(raw.to_string()))
}

/// Unwraps the `cat` envelope from an extracted body.
///
/// A body that parses as JSON but has no object shape at all carries no
/// `cat` parameter; other rejections pass through with their own status.
fn require_cat(
    payload: std::result::Result<Json<CatParams>, JsonRejection>,
) -> Result<CatAttributes> {
    match payload {
        Ok(Json(params)) => params.require_cat(),
        Err(JsonRejection::JsonDataError(_)) => Err(CatError::ParameterMissing("cat")),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Runs a mutation on the blocking pool while holding the write lock.
///
/// Writes may flush the snapshot file with blocking I/O, which must not
/// stall a runtime worker.
async fn write_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&mut CatStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut store = state.store.clone().write_owned().await;
    tokio::task::spawn_blocking(move || op(&mut *store))
        .await
        .map_err(|e| CatError::Storage(format!("store task failed: {}", e)))?
}

/// Handler for GET /cats
///
/// Lists every cat in insertion order.
pub async fn index_handler(State(state): State<AppState>) -> Json<Vec<Cat>> {
    let store = state.store.read().await;
    Json(store.list())
}

/// Handler for GET /cats/:id
pub async fn show_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cat>> {
    let id = parse_id(&id)?;

    let store = state.store.read().await;
    Ok(Json(store.find(id)?))
}

/// Handler for POST /cats
///
/// Validates and stores a new cat. Responds 200 with the created record.
pub async fn create_handler(
    State(state): State<AppState>,
    params: std::result::Result<Json<CatParams>, JsonRejection>,
) -> Result<Json<Cat>> {
    let attrs = require_cat(params)?;

    let cat = write_store(&state, move |store| store.create(attrs))
        .await
        .inspect_err(|e| debug!("Rejected create: {}", e))?;

    Ok(Json(cat))
}

/// Handler for PATCH/PUT /cats/:id
///
/// Applies the submitted attributes over the stored cat.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: std::result::Result<Json<CatParams>, JsonRejection>,
) -> Result<Json<Cat>> {
    let id = parse_id(&id)?;
    let changes = require_cat(params)?;

    let cat = write_store(&state, move |store| store.update(id, changes))
        .await
        .inspect_err(|e| debug!("Rejected update of cat {}: {}", id, e))?;

    Ok(Json(cat))
}

/// Handler for DELETE /cats/:id
///
/// Removes the cat and echoes it back.
pub async fn destroy_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cat>> {
    let id = parse_id(&id)?;

    let cat = write_store(&state, move |store| store.delete(id)).await?;
    Ok(Json(cat))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse::healthy(store.len()))
}
