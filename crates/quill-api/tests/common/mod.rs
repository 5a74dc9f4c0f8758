//! In-memory store implementations for service tests.
//!
//! These satisfy the quill-core repository traits with plain maps behind
//! mutexes, so the services can be exercised without a database.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_core::{
    CollaboratorRepository, HmacTokenCodec, Label, LabelRepository, Note, NoteFilter,
    NoteRepository, Result, TokenCodec, User, UserRepository,
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<()> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: Mutex<HashMap<Uuid, Note>>,
}

fn matches(note: &Note, filter: NoteFilter) -> bool {
    match filter {
        NoteFilter::Active => !note.trashed,
        NoteFilter::Trashed => note.trashed,
        NoteFilter::Pinned => note.pinned && !note.trashed,
        NoteFilter::Archived => note.archived && !note.trashed,
        NoteFilter::Reminders => note.reminder_at.is_some() && !note.trashed,
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, note: &Note) -> Result<()> {
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Note>> {
        Ok(self.notes.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, note: &Note) -> Result<()> {
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.notes.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid, filter: NoteFilter) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.owner_id == owner_id && matches(n, filter))
            .cloned()
            .collect())
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Note>> {
        let needle = title.to_lowercase();
        Ok(self
            .notes
            .lock()
            .unwrap()
            .values()
            .filter(|n| !n.trashed && n.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryLabelRepository {
    labels: Mutex<HashMap<Uuid, Label>>,
    links: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait]
impl LabelRepository for MemoryLabelRepository {
    async fn insert(&self, label: &Label) -> Result<()> {
        self.labels.lock().unwrap().insert(label.id, label.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Label>> {
        Ok(self.labels.lock().unwrap().get(&id).cloned())
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<()> {
        if let Some(label) = self.labels.lock().unwrap().get_mut(&id) {
            label.name = name.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.labels.lock().unwrap().remove(&id);
        self.links.lock().unwrap().retain(|(_, l)| *l != id);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Label>> {
        let mut labels: Vec<Label> = self
            .labels
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(labels)
    }

    async fn attach(&self, note_id: Uuid, label_id: Uuid) -> Result<()> {
        self.links.lock().unwrap().insert((note_id, label_id));
        Ok(())
    }

    async fn detach(&self, note_id: Uuid, label_id: Uuid) -> Result<bool> {
        Ok(self.links.lock().unwrap().remove(&(note_id, label_id)))
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<Label>> {
        let links = self.links.lock().unwrap();
        let labels = self.labels.lock().unwrap();
        let mut result: Vec<Label> = links
            .iter()
            .filter(|(n, _)| *n == note_id)
            .filter_map(|(_, l)| labels.get(l).cloned())
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

pub struct MemoryCollaboratorRepository {
    users: Arc<MemoryUserRepository>,
    links: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl MemoryCollaboratorRepository {
    pub fn new(users: Arc<MemoryUserRepository>) -> Self {
        Self {
            users,
            links: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl CollaboratorRepository for MemoryCollaboratorRepository {
    async fn add(&self, note_id: Uuid, user_id: Uuid) -> Result<()> {
        self.links.lock().unwrap().insert((note_id, user_id));
        Ok(())
    }

    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.links.lock().unwrap().remove(&(note_id, user_id)))
    }

    async fn exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.links.lock().unwrap().contains(&(note_id, user_id)))
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<User>> {
        let ids: Vec<Uuid> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| *n == note_id)
            .map(|(_, u)| *u)
            .collect();
        let mut users = Vec::new();
        for id in ids {
            if let Some(user) = self.users.get(id).await? {
                users.push(user);
            }
        }
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}

/// Everything the services need, backed by memory.
pub struct TestBackend {
    pub users: Arc<MemoryUserRepository>,
    pub notes: Arc<MemoryNoteRepository>,
    pub labels: Arc<MemoryLabelRepository>,
    pub collaborators: Arc<MemoryCollaboratorRepository>,
    pub tokens: Arc<HmacTokenCodec>,
}

impl TestBackend {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserRepository::default());
        Self {
            notes: Arc::new(MemoryNoteRepository::default()),
            labels: Arc::new(MemoryLabelRepository::default()),
            collaborators: Arc::new(MemoryCollaboratorRepository::new(users.clone())),
            tokens: Arc::new(HmacTokenCodec::new("test-secret")),
            users,
        }
    }

    /// Insert a user and hand back their bearer token.
    pub async fn seed_user(&self, email: &str) -> (User, String) {
        let user = User {
            id: Uuid::new_v4(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            password_hash: quill_core::password::hash_password("password"),
            is_verified: true,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await.unwrap();
        let token = self.tokens.encode(user.id);
        (user, token)
    }

    pub fn note_service(&self) -> quill_api::services::NoteService {
        quill_api::services::NoteService::new(
            self.users.clone(),
            self.notes.clone(),
            self.labels.clone(),
            self.tokens.clone(),
        )
    }

    pub fn label_service(&self) -> quill_api::services::LabelService {
        quill_api::services::LabelService::new(
            self.users.clone(),
            self.notes.clone(),
            self.labels.clone(),
            self.tokens.clone(),
        )
    }

    pub fn collaborator_service(&self) -> quill_api::services::CollaboratorService {
        quill_api::services::CollaboratorService::new(
            self.users.clone(),
            self.notes.clone(),
            self.collaborators.clone(),
            self.tokens.clone(),
        )
    }

    pub fn user_service(&self) -> quill_api::services::UserService {
        quill_api::services::UserService::new(self.users.clone(), self.tokens.clone())
    }
}
