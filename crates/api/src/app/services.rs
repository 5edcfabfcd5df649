use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use listkeep_auth::{CredentialStore, SessionRegistry};
use listkeep_lists::ListStore;

use crate::config::AppConfig;

/// Process-wide state, built once at startup and shared by every handler.
#[derive(Debug)]
pub struct AppServices {
    pub credentials: Arc<CredentialStore>,
    pub sessions: Arc<SessionRegistry>,
    pub lists: Arc<ListStore>,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let credentials = Arc::new(CredentialStore::with_default_accounts());
        let sessions = Arc::new(SessionRegistry::new(credentials.clone(), config.session_ttl));

        Self {
            credentials,
            sessions,
            lists: Arc::new(ListStore::new()),
        }
    }
}

/// Periodically drop expired sessions so the registry does not grow without bound.
///
/// Validity never depends on this task; expired sessions are already rejected
/// at lookup time.
pub fn spawn_session_sweeper(
    sessions: Arc<SessionRegistry>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired(Utc::now());
            if removed > 0 {
                tracing::info!(removed, remaining = sessions.len(), "purged expired sessions");
            } else {
                tracing::debug!(remaining = sessions.len(), "session sweep found nothing to purge");
            }
        }
    })
}
