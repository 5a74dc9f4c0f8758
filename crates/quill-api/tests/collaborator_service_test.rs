//! Collaborator management tests against in-memory stores.

mod common;

use common::TestBackend;
use quill_core::{CreateNoteRequest, Error};
use uuid::Uuid;

fn new_note(title: &str) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        content: "content".to_string(),
        color: None,
    }
}

#[tokio::test]
async fn test_add_and_list_collaborators() {
    let backend = TestBackend::new();
    let collabs = backend.collaborator_service();
    let notes = backend.note_service();
    let (_, owner) = backend.seed_user("ada@example.com").await;
    let (grace, _) = backend.seed_user("grace@example.com").await;

    let note = notes.create_note(&owner, new_note("shared")).await.unwrap();

    collabs
        .add_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap();

    let listed = collabs.collaborators_of_note(&owner, note.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, grace.id);
}

#[tokio::test]
async fn test_add_collaborator_unknown_email_fails() {
    let backend = TestBackend::new();
    let collabs = backend.collaborator_service();
    let notes = backend.note_service();
    let (_, owner) = backend.seed_user("ada@example.com").await;

    let note = notes.create_note(&owner, new_note("shared")).await.unwrap();

    let err = collabs
        .add_collaborator(&owner, note.id, "nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn test_add_collaborator_twice_conflicts() {
    let backend = TestBackend::new();
    let collabs = backend.collaborator_service();
    let notes = backend.note_service();
    let (_, owner) = backend.seed_user("ada@example.com").await;
    backend.seed_user("grace@example.com").await;

    let note = notes.create_note(&owner, new_note("shared")).await.unwrap();
    collabs
        .add_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap();

    let err = collabs
        .add_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_remove_collaborator() {
    let backend = TestBackend::new();
    let collabs = backend.collaborator_service();
    let notes = backend.note_service();
    let (_, owner) = backend.seed_user("ada@example.com").await;
    backend.seed_user("grace@example.com").await;

    let note = notes.create_note(&owner, new_note("shared")).await.unwrap();
    collabs
        .add_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap();

    assert!(collabs
        .remove_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap());

    // Already gone: reports no association.
    assert!(!collabs
        .remove_collaborator(&owner, note.id, "grace@example.com")
        .await
        .unwrap());

    assert!(collabs
        .collaborators_of_note(&owner, note.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_collaborators_require_existing_note() {
    let backend = TestBackend::new();
    let collabs = backend.collaborator_service();
    let (_, owner) = backend.seed_user("ada@example.com").await;
    backend.seed_user("grace@example.com").await;

    let err = collabs
        .add_collaborator(&owner, Uuid::new_v4(), "grace@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoteNotFound(_)));
}
