//! Collaborator repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use quill_core::{CollaboratorRepository, Result, User};

/// PostgreSQL implementation of CollaboratorRepository.
#[derive(Clone)]
pub struct PgCollaboratorRepository {
    pool: Pool<Postgres>,
}

impl PgCollaboratorRepository {
    /// Create a new PgCollaboratorRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollaboratorRepository for PgCollaboratorRepository {
    async fn add(&self, note_id: Uuid, user_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO note_collaborator (note_id, user_id) VALUES ($1, $2)")
            .bind(note_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM note_collaborator WHERE note_id = $1 AND user_id = $2")
                .bind(note_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM note_collaborator WHERE note_id = $1 AND user_id = $2) AS present",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get::<bool, _>("present")?)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT a.id, a.name, a.email, a.password_hash, a.is_verified, a.created_at
               FROM account a
               JOIN note_collaborator nc ON nc.user_id = a.id
               WHERE nc.note_id = $1
               ORDER BY a.email"#,
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
