//! Label management service.
//!
//! Same authenticate → resolve → mutate shape as the note service, applied to
//! labels and the note ↔ label association.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use quill_core::{
    Error, Label, LabelRepository, Note, NoteRepository, Result, TokenCodec, User, UserRepository,
};

#[derive(Clone)]
pub struct LabelService {
    users: Arc<dyn UserRepository>,
    notes: Arc<dyn NoteRepository>,
    labels: Arc<dyn LabelRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl LabelService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notes: Arc<dyn NoteRepository>,
        labels: Arc<dyn LabelRepository>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            notes,
            labels,
            tokens,
        }
    }

    async fn authenticate(&self, token: &str) -> Result<User> {
        let user_id = self.tokens.decode(token)?;
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized("no user for token".to_string()))
    }

    async fn resolve_note(&self, note_id: Uuid) -> Result<Note> {
        self.notes
            .fetch(note_id)
            .await?
            .ok_or(Error::NoteNotFound(note_id))
    }

    async fn resolve_label(&self, label_id: Uuid) -> Result<Label> {
        self.labels
            .get(label_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("label {} not found", label_id)))
    }

    /// Create a label owned by the caller. Names are unique per owner.
    pub async fn create_label(&self, token: &str, name: &str) -> Result<Label> {
        let user = self.authenticate(token).await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("label name must not be empty".to_string()));
        }
        let existing = self.labels.list_by_owner(user.id).await?;
        if existing.iter().any(|l| l.name == name) {
            return Err(Error::Conflict(format!("label '{}' already exists", name)));
        }
        let label = Label {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id: user.id,
            created_at: Utc::now(),
        };
        self.labels.insert(&label).await?;
        Ok(label)
    }

    /// Rename a label.
    pub async fn rename_label(&self, token: &str, label_id: Uuid, name: &str) -> Result<()> {
        self.authenticate(token).await?;
        self.resolve_label(label_id).await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("label name must not be empty".to_string()));
        }
        self.labels.rename(label_id, name).await
    }

    /// Delete a label, detaching it from every note.
    pub async fn delete_label(&self, token: &str, label_id: Uuid) -> Result<()> {
        self.authenticate(token).await?;
        self.resolve_label(label_id).await?;
        self.labels.delete(label_id).await
    }

    /// All labels owned by the caller.
    pub async fn labels_of_user(&self, token: &str) -> Result<Vec<Label>> {
        let user = self.authenticate(token).await?;
        self.labels.list_by_owner(user.id).await
    }

    /// Attach a label to a note. Attaching twice is a no-op.
    pub async fn add_label_to_note(
        &self,
        token: &str,
        note_id: Uuid,
        label_id: Uuid,
    ) -> Result<()> {
        self.authenticate(token).await?;
        self.resolve_note(note_id).await?;
        self.resolve_label(label_id).await?;
        self.labels.attach(note_id, label_id).await
    }

    /// Detach a label from a note. Returns whether an association existed.
    pub async fn remove_label_from_note(
        &self,
        token: &str,
        note_id: Uuid,
        label_id: Uuid,
    ) -> Result<bool> {
        self.authenticate(token).await?;
        self.resolve_note(note_id).await?;
        self.resolve_label(label_id).await?;
        self.labels.detach(note_id, label_id).await
    }
}
