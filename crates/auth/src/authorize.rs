//! Role policy check applied after authentication.

use thiserror::Error;

use crate::{Role, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: '{username}' lacks role '{required}'")]
    Forbidden { username: String, required: Role },
}

/// Check that an authenticated user holds `required`.
///
/// - No IO
/// - No panics
/// - Exact role match (there is no role hierarchy beyond admin/user)
pub fn authorize_role(user: &User, required: Role) -> Result<(), AuthzError> {
    if user.role == required {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            username: user.username.clone(),
            required,
        })
    }
}
