//! Shared application state.

use std::sync::Arc;

use quill_core::{
    CollaboratorRepository, LabelRepository, NoteRepository, TokenCodec, UserRepository,
};
use quill_db::Database;

use crate::services::{CollaboratorService, LabelService, NoteService, UserService};

/// Handles on every service, cloned into each handler invocation.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub labels: LabelService,
    pub collaborators: CollaboratorService,
    pub users: UserService,
}

impl AppState {
    /// Wire the services over the database repositories and token codec.
    pub fn new(db: &Database, tokens: Arc<dyn TokenCodec>) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(db.users.clone());
        let notes: Arc<dyn NoteRepository> = Arc::new(db.notes.clone());
        let labels: Arc<dyn LabelRepository> = Arc::new(db.labels.clone());
        let collaborators: Arc<dyn CollaboratorRepository> = Arc::new(db.collaborators.clone());

        Self {
            notes: NoteService::new(
                users.clone(),
                notes.clone(),
                labels.clone(),
                tokens.clone(),
            ),
            labels: LabelService::new(users.clone(), notes.clone(), labels, tokens.clone()),
            collaborators: CollaboratorService::new(
                users.clone(),
                notes,
                collaborators,
                tokens.clone(),
            ),
            users: UserService::new(users, tokens),
        }
    }
}
