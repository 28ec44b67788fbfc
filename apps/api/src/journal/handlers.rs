use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::journal::history::{group_by_period, search, HistoryFilter, HistoryGroup};
use crate::journal::settings::{SettingsUpdate, SettingsView};
use crate::models::{Entry, EntryId, NewEntry};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DemoSeeded {
    pub seeded: usize,
}

/// GET /api/v1/entries
pub async fn handle_list_entries(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Json<Vec<Entry>> {
    let view = state.journal.view().await;
    let entries = search(view.snapshot.entries(), &filter)
        .into_iter()
        .cloned()
        .collect();
    Json(entries)
}

/// POST /api/v1/entries
pub async fn handle_create_entry(
    State(state): State<AppState>,
    Json(req): Json<NewEntry>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = state.journal.add_entry(req, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/entries/:id
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, AppError> {
    state.journal.delete_entry(id, state.clock.now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/entries
pub async fn handle_clear_entries(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.journal.clear(state.clock.now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/entries/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Json<Vec<HistoryGroup>> {
    let view = state.journal.view().await;
    let matching = search(view.snapshot.entries(), &filter);
    Json(group_by_period(&matching, state.clock.now()))
}

/// POST /api/v1/demo
pub async fn handle_seed_demo(State(state): State<AppState>) -> Result<Json<DemoSeeded>, AppError> {
    let seeded = state.journal.seed_demo(state.clock.now()).await?;
    Ok(Json(DemoSeeded { seeded }))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(state.settings.read().await.view())
}

/// PUT /api/v1/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(req): Json<SettingsUpdate>,
) -> Result<Json<SettingsView>, AppError> {
    let key_changed = req.api_key.is_some();
    let mut settings = state.settings.write().await;
    let updated = settings.apply(req, state.store.as_ref()).await?;
    if key_changed {
        state.use_api_key(updated.api_key.as_deref());
    }
    *settings = updated;
    Ok(Json(settings.view()))
}
