//! Label repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use quill_core::{Label, LabelRepository, Result};

const LABEL_COLUMNS: &str = "id, name, owner_id, created_at";

/// PostgreSQL implementation of LabelRepository.
#[derive(Clone)]
pub struct PgLabelRepository {
    pool: Pool<Postgres>,
}

impl PgLabelRepository {
    /// Create a new PgLabelRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LabelRepository for PgLabelRepository {
    async fn insert(&self, label: &Label) -> Result<()> {
        sqlx::query(
            "INSERT INTO label (id, name, owner_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(label.id)
        .bind(&label.name)
        .bind(label.owner_id)
        .bind(label.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Label>> {
        let label = sqlx::query_as::<_, Label>(&format!(
            "SELECT {} FROM label WHERE id = $1",
            LABEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(label)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<()> {
        sqlx::query("UPDATE label SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // note_label rows cascade.
        sqlx::query("DELETE FROM label WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(&format!(
            "SELECT {} FROM label WHERE owner_id = $1 ORDER BY name",
            LABEL_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(labels)
    }

    async fn attach(&self, note_id: Uuid, label_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT INTO note_label (note_id, label_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(note_id)
        .bind(label_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn detach(&self, note_id: Uuid, label_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM note_label WHERE note_id = $1 AND label_id = $2")
            .bind(note_id)
            .bind(label_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            r#"SELECT l.id, l.name, l.owner_id, l.created_at
               FROM label l
               JOIN note_label nl ON nl.label_id = l.id
               WHERE nl.note_id = $1
               ORDER BY l.name"#,
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(labels)
    }
}
