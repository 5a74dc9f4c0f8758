//! Core traits for quill's store abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Label, Note, User};

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Which slice of an owner's notes a listing query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteFilter {
    /// All notes that are not trashed.
    Active,
    /// Notes with the trashed flag set.
    Trashed,
    /// Pinned notes that are not trashed.
    Pinned,
    /// Archived notes that are not trashed.
    Archived,
    /// Notes carrying a reminder timestamp.
    Reminders,
}

/// Store for note rows.
///
/// Listing queries return rows in storage order; ordering by timestamp is a
/// service concern.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note row.
    async fn insert(&self, note: &Note) -> Result<()>;

    /// Fetch a note by id.
    async fn fetch(&self, id: Uuid) -> Result<Option<Note>>;

    /// Persist the full current state of a note.
    async fn save(&self, note: &Note) -> Result<()>;

    /// Permanently remove a note and its label/collaborator associations.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// List an owner's notes matching the given filter.
    async fn list_by_owner(&self, owner_id: Uuid, filter: NoteFilter) -> Result<Vec<Note>>;

    /// Case-insensitive substring match on note titles.
    async fn search_by_title(&self, title: &str) -> Result<Vec<Note>>;
}

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Store for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn get(&self, id: Uuid) -> Result<Option<User>>;

    /// Fetch a user by email address.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a new user row.
    async fn insert(&self, user: &User) -> Result<()>;
}

// =============================================================================
// LABEL REPOSITORY
// =============================================================================

/// Store for labels and the note ↔ label association.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Insert a new label row.
    async fn insert(&self, label: &Label) -> Result<()>;

    /// Fetch a label by id.
    async fn get(&self, id: Uuid) -> Result<Option<Label>>;

    /// Rename a label.
    async fn rename(&self, id: Uuid, name: &str) -> Result<()>;

    /// Delete a label and detach it from all notes.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// List all labels owned by a user.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Label>>;

    /// Attach a label to a note. Attaching twice is a no-op.
    async fn attach(&self, note_id: Uuid, label_id: Uuid) -> Result<()>;

    /// Detach a label from a note. Returns whether an association existed.
    async fn detach(&self, note_id: Uuid, label_id: Uuid) -> Result<bool>;

    /// List the labels attached to a note.
    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<Label>>;
}

// =============================================================================
// COLLABORATOR REPOSITORY
// =============================================================================

/// Store for the note ↔ collaborating-user association.
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    /// Add a user as collaborator on a note.
    async fn add(&self, note_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Remove a collaborator. Returns whether an association existed.
    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Whether the user already collaborates on the note.
    async fn exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// List the collaborating users of a note.
    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<User>>;
}
