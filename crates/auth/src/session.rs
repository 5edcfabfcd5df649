//! Opaque-token session registry.
//!
//! A session is created by a successful login and consulted on every
//! protected request. It is valid while its token is registered, its expiry
//! lies strictly in the future, and the owning account still exists.
//! Expired sessions are ignored lazily and dropped by [`SessionRegistry::purge_expired`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{CredentialStore, User};

/// Seven days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Bearer token handed out at login: a random non-negative integer in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A freshly issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Token → session map shared by every request worker.
pub struct SessionRegistry {
    credentials: Arc<CredentialStore>,
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
    token_source: fn() -> u64,
}

impl SessionRegistry {
    pub fn new(credentials: Arc<CredentialStore>, ttl: Duration) -> Self {
        Self {
            credentials,
            ttl,
            sessions: RwLock::new(HashMap::new()),
            token_source: rand::random::<u64>,
        }
    }

    /// Registry with the default seven-day lifetime.
    pub fn with_default_ttl(credentials: Arc<CredentialStore>) -> Self {
        Self::new(credentials, Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }

    #[cfg(test)]
    fn with_token_source(mut self, token_source: fn() -> u64) -> Self {
        self.token_source = token_source;
        self
    }

    /// Issue a new session for `username`, expiring at `now + ttl`.
    ///
    /// Repeated logins create independent sessions. A drawn token that is
    /// already registered is discarded and redrawn.
    pub fn create(&self, username: &str, now: DateTime<Utc>) -> Session {
        let expires_at = now + self.ttl;
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let token = loop {
            let candidate = SessionToken::from_number((self.token_source)());
            if !sessions.contains_key(candidate.as_str()) {
                break candidate;
            }
            tracing::debug!("session token collision; drawing again");
        };

        sessions.insert(
            token.as_str().to_string(),
            SessionEntry {
                username: username.to_string(),
                expires_at,
            },
        );

        Session {
            token,
            username: username.to_string(),
            expires_at,
        }
    }

    pub fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.resolve_user(token, now).is_some()
    }

    /// Resolve the account behind a valid token.
    ///
    /// Returns `None` for unknown tokens, sessions with `expires_at <= now`,
    /// and sessions whose account no longer exists.
    pub fn resolve_user(&self, token: &str, now: DateTime<Utc>) -> Option<User> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.get(token)?;
        if entry.expires_at <= now {
            return None;
        }
        self.credentials.find(&entry.username).cloned()
    }

    /// Drop every session that has expired by `now`; returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_token, entry| entry.expires_at > now);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("ttl", &self.ttl)
            .field("sessions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{Role, User};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::with_default_ttl(Arc::new(CredentialStore::with_default_accounts()))
    }

    #[test]
    fn created_session_expires_after_seven_days() {
        let reg = registry();
        let now = test_time();
        let session = reg.create("admin", now);

        assert_eq!(session.username, "admin");
        assert_eq!(session.expires_at - now, Duration::days(7));
        assert!(session.token.as_str().parse::<u64>().is_ok());
        assert!(reg.is_valid(session.token.as_str(), now));
    }

    #[test]
    fn session_is_invalid_at_and_after_expiry() {
        let reg = registry();
        let now = test_time();
        let session = reg.create("user", now);

        let just_before = session.expires_at - Duration::milliseconds(1);
        assert!(reg.is_valid(session.token.as_str(), just_before));
        assert!(!reg.is_valid(session.token.as_str(), session.expires_at));
        assert!(!reg.is_valid(session.token.as_str(), session.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn unknown_token_is_invalid() {
        let reg = registry();
        assert!(!reg.is_valid("12345", test_time()));
        assert!(reg.resolve_user("", test_time()).is_none());
    }

    #[test]
    fn session_for_missing_account_is_invalid() {
        let reg = registry();
        let now = test_time();
        let session = reg.create("ghost", now);
        assert!(!reg.is_valid(session.token.as_str(), now));
    }

    #[test]
    fn resolve_user_returns_owning_account() {
        let reg = registry();
        let now = test_time();
        let session = reg.create("admin", now);

        let user = reg.resolve_user(session.token.as_str(), now).unwrap();
        assert_eq!(user, User::new("admin", Role::Admin, "password"));
    }

    #[test]
    fn repeated_logins_create_independent_sessions() {
        let reg = registry();
        let now = test_time();
        let a = reg.create("user", now);
        let b = reg.create("user", now);

        assert_ne!(a.token, b.token);
        assert_eq!(reg.len(), 2);
        assert!(reg.is_valid(a.token.as_str(), now));
        assert!(reg.is_valid(b.token.as_str(), now));
    }

    #[test]
    fn colliding_token_is_redrawn_instead_of_overwriting() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn source() -> u64 {
            // 7, 7, 8, 8, ...
            (7 + CALLS.fetch_add(1, Ordering::SeqCst) / 2) as u64
        }

        let reg = registry().with_token_source(source);
        let now = test_time();
        let first = reg.create("admin", now);
        let second = reg.create("user", now);

        assert_eq!(first.token.as_str(), "7");
        assert_eq!(second.token.as_str(), "8");
        assert_eq!(reg.resolve_user("7", now).unwrap().username, "admin");
        assert_eq!(reg.resolve_user("8", now).unwrap().username, "user");
    }

    #[test]
    fn purge_expired_removes_only_expired_sessions() {
        let reg = SessionRegistry::new(
            Arc::new(CredentialStore::with_default_accounts()),
            Duration::minutes(10),
        );
        let t0 = test_time();
        let old = reg.create("admin", t0);
        let fresh = reg.create("user", t0 + Duration::minutes(5));

        let removed = reg.purge_expired(t0 + Duration::minutes(10));
        assert_eq!(removed, 1);
        assert_eq!(reg.len(), 1);
        assert!(reg.resolve_user(old.token.as_str(), t0).is_none());
        assert!(reg.is_valid(fresh.token.as_str(), t0 + Duration::minutes(10)));
    }
}
