use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::AbTestConfig;
use crate::services::request_builder::{build_request, VariantSource};
use crate::services::session_service::{
    self, apply_config_patch, snapshot, ConfigPatch, DraftPatch, SessionSnapshot,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_manual))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(drop_session))
        .route("/sessions/:id/config", put(patch_config))
        .route("/sessions/:id/variants/generate", post(generate_variants))
        .route("/sessions/:id/variants/:index/edit", post(open_edit))
        .route("/sessions/:id/variants/draft", put(update_draft))
        .route("/sessions/:id/variants/save", post(save_edit))
        .route("/sessions/:id/variants/cancel", post(cancel_edit))
        .route("/sessions/:id/variants/:index", delete(delete_variant))
        .route("/sessions/:id/finalize", post(finalize))
}

/// Manual entry path: the config itself is the whole submission, no session
/// or review cycle involved.
async fn submit_manual(
    State(state): State<AppState>,
    Json(config): Json<AbTestConfig>,
) -> Result<Json<Value>, AppError> {
    let request = build_request(&config, VariantSource::Manual);
    info!(
        test_type = ?request.test_type(),
        project_id = request.project_id(),
        "submitting manual test"
    );

    state.variants.submit_test(&request).await?;
    Ok(Json(json!({ "status": "submitted" })))
}

async fn create_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let snapshot = state.sessions.create();
    info!(session_id = %snapshot.session_id, "created test session");
    Json(snapshot)
}

async fn get_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let session = session.lock();
    Ok(Json(snapshot(&session)))
}

async fn drop_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    state.sessions.remove(id)?;
    info!(session_id = %id, "dropped test session");
    Ok(Json(json!({ "status": "deleted" })))
}

async fn patch_config(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(patch): Json<ConfigPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    apply_config_patch(&state.sessions, id, patch).map(Json)
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    #[serde(default)]
    goal: String,
}

/// Generate, or regenerate when variants already exist. Regeneration discards
/// the current list including unsaved edits; the dashboard is expected to
/// warn before calling this a second time.
async fn generate_variants(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<SessionSnapshot>, AppError> {
    session_service::generate(&state.sessions, state.variants.as_ref(), id, &body.goal)
        .await
        .map(Json)
}

async fn open_edit(
    Path((id, index)): Path<(Uuid, usize)>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let mut session = session.lock();
    session.workflow.open_edit(index)?;
    Ok(Json(snapshot(&session)))
}

async fn update_draft(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let mut session = session.lock();
    session.workflow.update_draft(|draft| patch.apply(draft))?;
    Ok(Json(snapshot(&session)))
}

async fn save_edit(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let mut session = session.lock();
    session.workflow.save_edit()?;
    Ok(Json(snapshot(&session)))
}

async fn cancel_edit(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let mut session = session.lock();
    session.workflow.cancel_edit()?;
    Ok(Json(snapshot(&session)))
}

async fn delete_variant(
    Path((id, index)): Path<(Uuid, usize)>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id)?;
    let mut session = session.lock();
    session.workflow.delete(index)?;
    Ok(Json(snapshot(&session)))
}

async fn finalize(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    session_service::finalize(&state.sessions, state.variants.as_ref(), id)
        .await
        .map(Json)
}
