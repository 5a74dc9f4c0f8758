//! Core data models for quill.
//!
//! These types are shared across all quill crates and represent the core
//! domain entities: users, notes, and labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color assigned to a note when none is given at creation time.
pub const DEFAULT_NOTE_COLOR: &str = "white";

// =============================================================================
// USER TYPES
// =============================================================================

/// A registered account.
///
/// `password_hash` never leaves the server: it is skipped on serialization so
/// the entity can double as the API response shape.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note and its full lifecycle state.
///
/// State flags are independent booleans except on the trash transition, which
/// clears `archived`, `pinned`, and `reminder_at` in the same mutation.
/// `updated_at` stays `None` until the first mutation after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub color: String,
    pub archived: bool,
    pub pinned: bool,
    pub trashed: bool,
    pub reminder_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
}

impl Note {
    /// Timestamp used when ordering by recency of modification.
    ///
    /// Falls back to the creation time for notes never mutated since creation,
    /// so the ordering is total.
    pub fn last_modified_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

// =============================================================================
// LABEL TYPES
// =============================================================================

/// A user-owned label, attachable to any number of notes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    /// Optional color override; defaults to [`DEFAULT_NOTE_COLOR`].
    pub color: Option<String>,
}

/// Request for a field-wise overwrite of a note's content fields.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
}

/// New account registration.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credential login, exchanged for a bearer token.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Color change for a note.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChangeColorRequest {
    pub color: String,
}

/// Reminder assignment for a note.
///
/// `reminder_at` may be absent; requesting the value the note already carries
/// (absent included) is rejected by the service.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SetReminderRequest {
    pub reminder_at: Option<DateTime<Utc>>,
}

/// New label creation.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateLabelRequest {
    pub name: String,
}

/// Label rename.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RenameLabelRequest {
    pub name: String,
}

/// Collaborator add/remove target, identified by email.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CollaboratorRequest {
    pub email: String,
}
