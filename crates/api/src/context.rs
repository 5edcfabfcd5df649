use listkeep_auth::{Role, User};

/// Identity of the caller, inserted by the access-control middleware.
///
/// Present on every request that passed `auth_required` or `admin_required`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    username: String,
    role: Role,
}

impl CallerContext {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&User> for CallerContext {
    fn from(user: &User) -> Self {
        Self::new(user.username.clone(), user.role)
    }
}
