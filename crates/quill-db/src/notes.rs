//! Note repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use quill_core::{Note, NoteFilter, NoteRepository, Result};

use crate::escape_like;

const NOTE_COLUMNS: &str = "id, title, content, color, archived, pinned, trashed, \
     reminder_at, created_at, updated_at, owner_id";

/// Build the WHERE-clause fragment for a listing filter.
///
/// Pinned/archived/reminder listings exclude trashed notes; the trash
/// transition clears those flags, so the exclusion only matters for rows
/// written outside the state machine.
fn filter_clause(filter: NoteFilter) -> &'static str {
    match filter {
        NoteFilter::Active => "AND trashed = FALSE",
        NoteFilter::Trashed => "AND trashed = TRUE",
        NoteFilter::Pinned => "AND pinned = TRUE AND trashed = FALSE",
        NoteFilter::Archived => "AND archived = TRUE AND trashed = FALSE",
        NoteFilter::Reminders => "AND reminder_at IS NOT NULL AND trashed = FALSE",
    }
}

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, note: &Note) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO note (
                id, title, content, color, archived, pinned, trashed,
                reminder_at, created_at, updated_at, owner_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.color)
        .bind(note.archived)
        .bind(note.pinned)
        .bind(note.trashed)
        .bind(note.reminder_at)
        .bind(note.created_at)
        .bind(note.updated_at)
        .bind(note.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM note WHERE id = $1",
            NOTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn save(&self, note: &Note) -> Result<()> {
        sqlx::query(
            r#"UPDATE note SET
                title = $2, content = $3, color = $4, archived = $5,
                pinned = $6, trashed = $7, reminder_at = $8, updated_at = $9
            WHERE id = $1"#,
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.color)
        .bind(note.archived)
        .bind(note.pinned)
        .bind(note.trashed)
        .bind(note.reminder_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // Join rows in note_label / note_collaborator go with it (ON DELETE CASCADE).
        sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid, filter: NoteFilter) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {} FROM note WHERE owner_id = $1 {}",
            NOTE_COLUMNS,
            filter_clause(filter)
        );
        let notes = sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Note>> {
        let pattern = format!("%{}%", escape_like(title));
        let query = format!(
            "SELECT {} FROM note WHERE title ILIKE $1 AND trashed = FALSE",
            NOTE_COLUMNS
        );
        let notes = sqlx::query_as::<_, Note>(&query)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }
}
