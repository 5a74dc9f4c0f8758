//! # quill-api
//!
//! HTTP API server for quill. The service layer under [`services`] carries
//! the decision logic; handlers translate between HTTP and services.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod services;
pub mod state;

pub use handlers::router;
pub use state::AppState;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill API",
        version = "0.4.2",
        description = "Note backend: authenticated note lifecycle, labels, and collaborators"
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Notes", description = "Note lifecycle and listings"),
        (name = "Labels", description = "Label management"),
        (name = "Collaborators", description = "Note collaborators"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
