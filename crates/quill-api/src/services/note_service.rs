//! Note lifecycle service.
//!
//! Every operation follows the same shape: authenticate the caller from the
//! bearer token, resolve the target note where one is named, mutate, persist,
//! and report the outcome. Authorization failures, missing notes, and
//! redundant reminder requests surface as typed errors; the HTTP layer owns
//! their status codes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use quill_core::{
    CreateNoteRequest, Error, Label, LabelRepository, Note, NoteFilter, NoteRepository, Result,
    TokenCodec, UpdateNoteRequest, User, UserRepository, DEFAULT_NOTE_COLOR,
};

/// Orchestrates authorization and note state transitions.
///
/// Toggle-style operations (archive, pin) are read-modify-write without
/// locking: two concurrent requests for the same note can interleave and the
/// last write wins. This is an accepted race, not an oversight.
#[derive(Clone)]
pub struct NoteService {
    users: Arc<dyn UserRepository>,
    notes: Arc<dyn NoteRepository>,
    labels: Arc<dyn LabelRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl NoteService {
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

    /// Decode the token and look the user up.
    ///
    /// Fails with [`Error::Unauthorized`] when either step does. Every
    /// operation below calls this first; nothing proceeds without a resolved
    /// user.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let user_id = self.tokens.decode(token)?;
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized("no user for token".to_string()))
    }

    /// Fetch a note or fail with [`Error::NoteNotFound`].
    async fn resolve(&self, note_id: Uuid) -> Result<Note> {
        self.notes
            .fetch(note_id)
            .await?
            .ok_or(Error::NoteNotFound(note_id))
    }

    /// Create a note owned by the caller.
    ///
    /// The server stamps the creation time and applies the default color when
    /// the request carries none.
    pub async fn create_note(&self, token: &str, req: CreateNoteRequest) -> Result<Note> {
        let user = self.authenticate(token).await?;
        let note = Note {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content,
            color: req.color.unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string()),
            archived: false,
            pinned: false,
            trashed: false,
            reminder_at: None,
            created_at: Utc::now(),
            updated_at: None,
            owner_id: user.id,
        };
        self.notes.insert(&note).await?;
        info!(
            subsystem = "service",
            component = "note_service",
            op = "create_note",
            user_id = %user.id,
            note_id = %note.id,
            "note created"
        );
        Ok(note)
    }

    /// Field-wise overwrite of title and content.
    pub async fn update_note(
        &self,
        token: &str,
        note_id: Uuid,
        req: UpdateNoteRequest,
    ) -> Result<bool> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        note.title = req.title;
        note.content = req.content;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(true)
    }

    /// Permanently remove a note from the store.
    ///
    /// This is not the trash transition: the row is gone afterwards.
    pub async fn delete_note(&self, token: &str, note_id: Uuid) -> Result<bool> {
        self.authenticate(token).await?;
        self.resolve(note_id).await?;
        self.notes.delete(note_id).await?;
        info!(
            subsystem = "service",
            component = "note_service",
            op = "delete_note",
            note_id = %note_id,
            "note permanently deleted"
        );
        Ok(true)
    }

    /// Flip the archived flag. Returns the resulting state.
    pub async fn toggle_archive(&self, token: &str, note_id: Uuid) -> Result<bool> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        note.archived = !note.archived;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(note.archived)
    }

    /// Flip the pinned flag. Returns the resulting state.
    pub async fn toggle_pin(&self, token: &str, note_id: Uuid) -> Result<bool> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        note.pinned = !note.pinned;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(note.pinned)
    }

    /// Move a note to the trash.
    ///
    /// Clears archived, pinned, and the reminder in the same mutation.
    /// Returns false without touching anything when the note is already
    /// trashed.
    pub async fn trash_note(&self, token: &str, note_id: Uuid) -> Result<bool> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        if note.trashed {
            return Ok(false);
        }
        note.trashed = true;
        note.archived = false;
        note.pinned = false;
        note.reminder_at = None;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(true)
    }

    /// Take a note out of the trash.
    ///
    /// Returns false when the note is not trashed.
    pub async fn restore_note(&self, token: &str, note_id: Uuid) -> Result<bool> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        if !note.trashed {
            return Ok(false);
        }
        note.trashed = false;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(true)
    }

    /// Overwrite the note's color. Does not stamp the update time.
    pub async fn change_color(&self, token: &str, note_id: Uuid, color: &str) -> Result<()> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        note.color = color.to_string();
        self.notes.save(&note).await?;
        Ok(())
    }

    /// Set the note's reminder.
    ///
    /// Requesting the value the note already carries is an error, including
    /// when both are absent.
    pub async fn set_reminder(
        &self,
        token: &str,
        note_id: Uuid,
        remind_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<()> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        if note.reminder_at == remind_at {
            return Err(Error::Reminder(
                "reminder already set for this time".to_string(),
            ));
        }
        note.reminder_at = remind_at;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(())
    }

    /// Clear the note's reminder. Fails when none is set.
    pub async fn remove_reminder(&self, token: &str, note_id: Uuid) -> Result<()> {
        self.authenticate(token).await?;
        let mut note = self.resolve(note_id).await?;
        if note.reminder_at.is_none() {
            return Err(Error::Reminder("no reminder set".to_string()));
        }
        note.reminder_at = None;
        note.updated_at = Some(Utc::now());
        self.notes.save(&note).await?;
        Ok(())
    }

    /// All non-trashed notes of the caller, newest creation first.
    pub async fn all_notes(&self, token: &str) -> Result<Vec<Note>> {
        let user = self.authenticate(token).await?;
        let mut notes = self.notes.list_by_owner(user.id, NoteFilter::Active).await?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(
            subsystem = "service",
            component = "note_service",
            op = "all_notes",
            user_id = %user.id,
            result_count = notes.len(),
            "listed notes"
        );
        Ok(notes)
    }

    /// Trashed notes of the caller, most recently modified first.
    pub async fn trashed_notes(&self, token: &str) -> Result<Vec<Note>> {
        self.flag_listing(token, NoteFilter::Trashed).await
    }

    /// Pinned notes of the caller, most recently modified first.
    pub async fn pinned_notes(&self, token: &str) -> Result<Vec<Note>> {
        self.flag_listing(token, NoteFilter::Pinned).await
    }

    /// Archived notes of the caller, most recently modified first.
    pub async fn archived_notes(&self, token: &str) -> Result<Vec<Note>> {
        self.flag_listing(token, NoteFilter::Archived).await
    }

    async fn flag_listing(&self, token: &str, filter: NoteFilter) -> Result<Vec<Note>> {
        let user = self.authenticate(token).await?;
        let mut notes = self.notes.list_by_owner(user.id, filter).await?;
        notes.sort_by(|a, b| b.last_modified_at().cmp(&a.last_modified_at()));
        Ok(notes)
    }

    /// Notes carrying a reminder, latest reminder first.
    pub async fn reminder_notes(&self, token: &str) -> Result<Vec<Note>> {
        let user = self.authenticate(token).await?;
        let mut notes = self
            .notes
            .list_by_owner(user.id, NoteFilter::Reminders)
            .await?;
        notes.sort_by(|a, b| b.reminder_at.cmp(&a.reminder_at));
        Ok(notes)
    }

    /// Title substring search.
    ///
    /// Unlike the listing operations, an empty result set is an error here.
    pub async fn search_by_title(&self, token: &str, title: &str) -> Result<Vec<Note>> {
        self.authenticate(token).await?;
        let notes = self.notes.search_by_title(title).await?;
        if notes.is_empty() {
            return Err(Error::NotFound("no notes matched the title".to_string()));
        }
        Ok(notes)
    }

    /// Labels attached to a note.
    pub async fn labels_of_note(&self, token: &str, note_id: Uuid) -> Result<Vec<Label>> {
        self.authenticate(token).await?;
        self.resolve(note_id).await?;
        self.labels.list_for_note(note_id).await
    }
}
