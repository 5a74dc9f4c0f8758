//! HTTP handlers and router.
//!
//! Handlers extract the bearer token and parameters, delegate to a service,
//! and shape the response. One presentation quirk is deliberate: the note
//! listing endpoints answer 404 with a message body when the result set is
//! empty, while the service itself returns an empty collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::{
    ChangeColorRequest, CollaboratorRequest, CreateLabelRequest, CreateNoteRequest, LoginRequest,
    Note, RegisterRequest, RenameLabelRequest, SetReminderRequest, UpdateNoteRequest,
};

use crate::error::ApiError;
use crate::extract::BearerToken;
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/notes", get(list_notes).post(create_note))
        .route("/api/v1/notes/search", get(search_notes))
        .route("/api/v1/notes/trashed", get(list_trashed))
        .route("/api/v1/notes/pinned", get(list_pinned))
        .route("/api/v1/notes/archived", get(list_archived))
        .route("/api/v1/notes/reminders", get(list_reminders))
        .route("/api/v1/notes/:id", put(update_note).delete(delete_note))
        .route("/api/v1/notes/:id/archive", post(archive_note))
        .route("/api/v1/notes/:id/pin", post(pin_note))
        .route("/api/v1/notes/:id/trash", post(trash_note))
        .route("/api/v1/notes/:id/restore", post(restore_note))
        .route("/api/v1/notes/:id/color", patch(change_color))
        .route(
            "/api/v1/notes/:id/reminder",
            put(set_reminder).delete(remove_reminder),
        )
        .route("/api/v1/notes/:id/labels", get(labels_of_note))
        .route(
            "/api/v1/notes/:id/labels/:label_id",
            post(add_label_to_note).delete(remove_label_from_note),
        )
        .route(
            "/api/v1/notes/:id/collaborators",
            get(list_collaborators)
                .post(add_collaborator)
                .delete(remove_collaborator),
        )
        .route("/api/v1/labels", get(list_labels).post(create_label))
        .route("/api/v1/labels/:id", put(rename_label).delete(delete_label))
        .with_state(state)
}

// =============================================================================
// SYSTEM
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::ApiDoc::openapi())
}

// =============================================================================
// AUTH
// =============================================================================

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.users.login(body).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.me(&token).await?;
    Ok(Json(user))
}

// =============================================================================
// NOTE LIFECYCLE
// =============================================================================

async fn create_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.notes.create_note(&token, body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.notes.update_note(&token, id, body).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

async fn delete_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.delete_note(&token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn archive_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let archived = state.notes.toggle_archive(&token, id).await?;
    Ok(Json(serde_json::json!({ "archived": archived })))
}

async fn pin_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pinned = state.notes.toggle_pin(&token, id).await?;
    Ok(Json(serde_json::json!({ "pinned": pinned })))
}

async fn trash_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let trashed = state.notes.trash_note(&token, id).await?;
    Ok(Json(serde_json::json!({ "trashed": trashed })))
}

async fn restore_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let restored = state.notes.restore_note(&token, id).await?;
    Ok(Json(serde_json::json!({ "restored": restored })))
}

async fn change_color(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeColorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.change_color(&token, id, &body.color).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_reminder(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<SetReminderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.set_reminder(&token, id, body.reminder_at).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_reminder(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.remove_reminder(&token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// NOTE LISTINGS
// =============================================================================

/// Empty listings answer 404 at this layer; the service returns them as empty
/// collections.
fn listing_response(notes: Vec<Note>) -> Result<Json<Vec<Note>>, ApiError> {
    if notes.is_empty() {
        return Err(ApiError::NotFound("no notes found".to_string()));
    }
    Ok(Json(notes))
}

async fn list_notes(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    listing_response(state.notes.all_notes(&token).await?)
}

async fn list_trashed(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    listing_response(state.notes.trashed_notes(&token).await?)
}

async fn list_pinned(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    listing_response(state.notes.pinned_notes(&token).await?)
}

async fn list_archived(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    listing_response(state.notes.archived_notes(&token).await?)
}

async fn list_reminders(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    listing_response(state.notes.reminder_notes(&token).await?)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    title: String,
}

async fn search_notes(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.search_by_title(&token, &query.title).await?;
    Ok(Json(notes))
}

// =============================================================================
// LABELS
// =============================================================================

async fn labels_of_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let labels = state.notes.labels_of_note(&token, id).await?;
    Ok(Json(labels))
}

async fn list_labels(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    let labels = state.labels.labels_of_user(&token).await?;
    Ok(Json(labels))
}

async fn create_label(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<CreateLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let label = state.labels.create_label(&token, &body.name).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

async fn rename_label(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.labels.rename_label(&token, id, &body.name).await?;
    Ok(Json(serde_json::json!({ "renamed": true })))
}

async fn delete_label(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.labels.delete_label(&token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_label_to_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((id, label_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    state.labels.add_label_to_note(&token, id, label_id).await?;
    Ok(StatusCode::CREATED)
}

async fn remove_label_from_note(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((id, label_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .labels
        .remove_label_from_note(&token, id, label_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("label not attached to note".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// COLLABORATORS
// =============================================================================

async fn list_collaborators(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.collaborators.collaborators_of_note(&token, id).await?;
    Ok(Json(users))
}

async fn add_collaborator(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<CollaboratorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .collaborators
        .add_collaborator(&token, id, &body.email)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "added": true })),
    ))
}

async fn remove_collaborator(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<CollaboratorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .collaborators
        .remove_collaborator(&token, id, &body.email)
        .await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "{} is not a collaborator",
            body.email
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
