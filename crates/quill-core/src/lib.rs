//! # quill-core
//!
//! Core types, traits, and abstractions for the quill note backend.
//!
//! This crate provides the foundational data structures, the error type, the
//! store trait definitions, and the bearer token codec that other quill
//! crates depend on.

pub mod error;
pub mod logging;
pub mod models;
pub mod password;
pub mod token;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use token::{HmacTokenCodec, TokenCodec};
pub use traits::*;
