//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `LISTKEEP_BIND_ADDR` | `0.0.0.0:8888` |
//! | `LISTKEEP_SESSION_TTL_SECS` | `604800` (7 days) |
//! | `LISTKEEP_SESSION_SWEEP_SECS` | `3600`, `0` disables the sweep |
//! | `LISTKEEP_LOG_FORMAT` | `json` (or `text`) |

use std::net::SocketAddr;
use std::time::Duration as StdDuration;

use anyhow::{ensure, Context};
use listkeep_auth::DEFAULT_SESSION_TTL_SECS;
use listkeep_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "LISTKEEP_BIND_ADDR";
pub const SESSION_TTL_VAR: &str = "LISTKEEP_SESSION_TTL_SECS";
pub const SESSION_SWEEP_VAR: &str = "LISTKEEP_SESSION_SWEEP_SECS";
pub const LOG_FORMAT_VAR: &str = "LISTKEEP_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8888";
const DEFAULT_SWEEP_SECS: u64 = 60 * 60;
// Ten years; keeps `now + ttl` far from chrono's range limits.
const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub session_ttl: chrono::Duration,
    /// `None` disables the background sweep; expired sessions are then only
    /// ignored, never dropped.
    pub session_sweep_interval: Option<StdDuration>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            session_ttl: chrono::Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            session_sweep_interval: Some(StdDuration::from_secs(DEFAULT_SWEEP_SECS)),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_VAR} must be a socket address like 0.0.0.0:8888"))?;

        let ttl_secs = match lookup(SESSION_TTL_VAR) {
            Some(raw) => parse_secs(SESSION_TTL_VAR, &raw)?,
            None => DEFAULT_SESSION_TTL_SECS as u64,
        };
        ensure!(
            ttl_secs <= MAX_SESSION_TTL_SECS,
            "{SESSION_TTL_VAR} must be at most {MAX_SESSION_TTL_SECS}"
        );

        let sweep_secs = match lookup(SESSION_SWEEP_VAR) {
            Some(raw) => parse_secs(SESSION_SWEEP_VAR, &raw)?,
            None => DEFAULT_SWEEP_SECS,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            session_ttl: chrono::Duration::seconds(ttl_secs as i64),
            session_sweep_interval: (sweep_secs > 0).then(|| StdDuration::from_secs(sweep_secs)),
            log_format,
        })
    }
}

fn parse_secs(var: &str, raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("{var} must be a non-negative number of seconds, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = from_pairs(&[]).unwrap();
        let def = AppConfig::default();
        assert_eq!(cfg.bind_addr, def.bind_addr);
        assert_eq!(cfg.session_ttl, chrono::Duration::days(7));
        assert_eq!(cfg.session_sweep_interval, Some(StdDuration::from_secs(3600)));
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_pairs(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (SESSION_TTL_VAR, "60"),
            (SESSION_SWEEP_VAR, "0"),
            (LOG_FORMAT_VAR, "text"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.session_ttl, chrono::Duration::seconds(60));
        assert_eq!(cfg.session_sweep_interval, None);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(from_pairs(&[(BIND_ADDR_VAR, "nowhere")]).is_err());
        assert!(from_pairs(&[(SESSION_TTL_VAR, "-5")]).is_err());
        assert!(from_pairs(&[(SESSION_TTL_VAR, "999999999999")]).is_err());
        assert!(from_pairs(&[(SESSION_SWEEP_VAR, "soon")]).is_err());
        assert!(from_pairs(&[(LOG_FORMAT_VAR, "xml")]).is_err());
    }
}
