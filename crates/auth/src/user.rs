//! Static account registry.

use std::collections::HashMap;

use serde::Serialize;

use crate::Role;

/// An account known to the server.
///
/// Passwords are compared by exact match and never serialised.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing)]
    password: String,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role,
            password: password.into(),
        }
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Read-only username → account lookup, fixed at startup.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: HashMap<String, User>,
}

impl CredentialStore {
    /// Build a store from an explicit account list (later duplicates win).
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.username.clone(), u))
                .collect(),
        }
    }

    /// The two built-in accounts: `admin` (admin role) and `user`.
    pub fn with_default_accounts() -> Self {
        Self::from_users([
            User::new("admin", Role::Admin, "password"),
            User::new("user", Role::User, "password"),
        ])
    }

    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Returns the account only when both username and password match exactly.
    pub fn verify(&self, username: &str, password: &str) -> Option<&User> {
        self.find(username).filter(|u| u.password_matches(password))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accounts_have_expected_roles() {
        let store = CredentialStore::with_default_accounts();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("admin").unwrap().role, Role::Admin);
        assert_eq!(store.find("user").unwrap().role, Role::User);
        assert!(store.find("root").is_none());
    }

    #[test]
    fn verify_requires_exact_password() {
        let store = CredentialStore::with_default_accounts();
        assert!(store.verify("admin", "password").is_some());
        assert!(store.verify("admin", "Password").is_none());
        assert!(store.verify("admin", "password ").is_none());
        assert!(store.verify("nobody", "password").is_none());
    }

    #[test]
    fn password_is_not_serialized_or_debug_printed() {
        let user = User::new("alice", Role::User, "hunter2");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "alice", "role": "user" }));
        assert!(!format!("{user:?}").contains("hunter2"));
    }
}
