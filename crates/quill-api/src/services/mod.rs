//! Service layer: the decision logic between the HTTP handlers and the
//! stores.

mod collab_service;
mod label_service;
mod note_service;
mod user_service;

pub use collab_service::CollaboratorService;
pub use label_service::LabelService;
pub use note_service::NoteService;
pub use user_service::UserService;
