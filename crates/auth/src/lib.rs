//! `listkeep-auth` — credentials, sessions, and role checks.
//!
//! This crate is intentionally decoupled from HTTP; the API crate turns its
//! answers into status codes.

pub mod authorize;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{authorize_role, AuthzError};
pub use roles::Role;
pub use session::{Session, SessionRegistry, SessionToken, DEFAULT_SESSION_TTL_SECS};
pub use user::{CredentialStore, User};
