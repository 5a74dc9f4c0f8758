//! Collaborator management service.
//!
//! Collaborators are added and removed by email against the note ↔ user join
//! relation, with the usual authenticate → resolve → mutate shape.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::{
    CollaboratorRepository, Error, Note, NoteRepository, Result, TokenCodec, User, UserRepository,
};

#[derive(Clone)]
pub struct CollaboratorService {
    users: Arc<dyn UserRepository>,
    notes: Arc<dyn NoteRepository>,
    collaborators: Arc<dyn CollaboratorRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl CollaboratorService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notes: Arc<dyn NoteRepository>,
        collaborators: Arc<dyn CollaboratorRepository>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            notes,
            collaborators,
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

    /// Add the user with the given email as a collaborator on the note.
    ///
    /// Fails with [`Error::UserNotFound`] when no account carries the email
    /// and [`Error::Conflict`] when the user already collaborates.
    pub async fn add_collaborator(&self, token: &str, note_id: Uuid, email: &str) -> Result<bool> {
        self.authenticate(token).await?;
        self.resolve_note(note_id).await?;
        let target = self
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        if self.collaborators.exists(note_id, target.id).await? {
            return Err(Error::Conflict(format!(
                "{} is already a collaborator",
                email
            )));
        }
        self.collaborators.add(note_id, target.id).await?;
        Ok(true)
    }

    /// Remove a collaborator by email. Returns whether one was removed.
    pub async fn remove_collaborator(
        &self,
        token: &str,
        note_id: Uuid,
        email: &str,
    ) -> Result<bool> {
        self.authenticate(token).await?;
        self.resolve_note(note_id).await?;
        let target = self
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        self.collaborators.remove(note_id, target.id).await
    }

    /// List the collaborating users of a note.
    pub async fn collaborators_of_note(&self, token: &str, note_id: Uuid) -> Result<Vec<User>> {
        self.authenticate(token).await?;
        self.resolve_note(note_id).await?;
        self.collaborators.list_for_note(note_id).await
    }
}
