//! genemesh-common — Shared domain types, engine DTOs, errors and message templates.

pub mod error;
pub mod entities;
pub mod dto;
pub mod messages;

// Re-export commonly used types
pub use error::{GeneMeshError, Result};
pub use messages::MessageCatalog;
