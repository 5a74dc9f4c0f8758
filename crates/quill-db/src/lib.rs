//! # quill-db
//!
//! PostgreSQL database layer for quill.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for users, notes, labels, and collaborators
//! - Schema migrations

pub mod collaborators;
pub mod labels;
pub mod notes;
pub mod pool;
pub mod users;

pub use collaborators::PgCollaboratorRepository;
pub use labels::PgLabelRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use users::PgUserRepository;

// Re-export core types
pub use quill_core::*;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Aggregated handle over all repositories sharing one connection pool.
///
/// Stores are explicit handles passed into the services; there are no ambient
/// singletons.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// User account repository.
    pub users: PgUserRepository,
    /// Note repository for lifecycle state and CRUD.
    pub notes: PgNoteRepository,
    /// Label repository and note ↔ label association.
    pub labels: PgLabelRepository,
    /// Collaborator association repository.
    pub collaborators: PgCollaboratorRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            labels: PgLabelRepository::new(pool.clone()),
            collaborators: PgCollaboratorRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the database with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = pool::create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Connect to the database with custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = pool::create_pool_with_config(database_url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
