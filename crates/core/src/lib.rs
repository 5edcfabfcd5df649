//! `listkeep-core` — shared domain primitives (no HTTP, no storage).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ListId;
