//! Application configuration loaded from environment variables.
//!
//! All settings have defaults so the application can start with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use handee_shared::constants::{CALL_TICK_INTERVAL, CHAT_POLL_INTERVAL, DEFAULT_NOTIFICATION_DURATION};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite file holding the record store.
    /// Env: `HANDEE_DB_PATH`
    /// Default: `handee.db` in the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory (nothing survives the process).
    /// Env: `HANDEE_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Chat refresh interval.
    /// Env: `HANDEE_POLL_INTERVAL_MS`
    /// Default: 2000 ms
    pub poll_interval: Duration,

    /// Call duration tick.
    pub call_tick: Duration,

    /// Default notification lifetime.
    /// Env: `HANDEE_TOAST_DURATION_MS`
    /// Default: 5000 ms
    pub toast_duration: Duration,

    /// Populate an empty store with demo accounts and listings.
    /// Env: `HANDEE_SEED_DEMO` (true/false)
    /// Default: `false`
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            in_memory: false,
            poll_interval: CHAT_POLL_INTERVAL,
            call_tick: CALL_TICK_INTERVAL,
            toast_duration: DEFAULT_NOTIFICATION_DURATION,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// In-memory configuration, handy for tests and previews.
    pub fn ephemeral() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("HANDEE_DB_PATH").filter(|p| !p.is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(val) = lookup("HANDEE_IN_MEMORY") {
            config.in_memory = parse_flag(&val);
        }

        if let Some(val) = lookup("HANDEE_POLL_INTERVAL_MS") {
            match parse_millis(&val) {
                Some(d) => config.poll_interval = d,
                None => tracing::warn!(value = %val, "Invalid HANDEE_POLL_INTERVAL_MS, using default"),
            }
        }

        if let Some(val) = lookup("HANDEE_TOAST_DURATION_MS") {
            match parse_millis(&val) {
                Some(d) => config.toast_duration = d,
                None => tracing::warn!(value = %val, "Invalid HANDEE_TOAST_DURATION_MS, using default"),
            }
        }

        if let Some(val) = lookup("HANDEE_SEED_DEMO") {
            config.seed_demo_data = parse_flag(&val);
        }

        config
    }
}

fn parse_flag(val: &str) -> bool {
    val != "false" && val != "0"
}

/// Positive millisecond count.
fn parse_millis(val: &str) -> Option<Duration> {
    val.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = load(&[]);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.call_tick, Duration::from_secs(1));
        assert_eq!(config.toast_duration, Duration::from_millis(5000));
        assert!(config.db_path.is_none());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HANDEE_DB_PATH", "/tmp/handee.db"),
            ("HANDEE_POLL_INTERVAL_MS", "250"),
            ("HANDEE_SEED_DEMO", "true"),
            ("HANDEE_IN_MEMORY", "1"),
        ]);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/handee.db")));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(config.seed_demo_data);
        assert!(config.in_memory);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = load(&[
            ("HANDEE_POLL_INTERVAL_MS", "soon"),
            ("HANDEE_TOAST_DURATION_MS", "0"),
            ("HANDEE_SEED_DEMO", "false"),
        ]);
        assert_eq!(config.poll_interval, CHAT_POLL_INTERVAL);
        assert_eq!(config.toast_duration, DEFAULT_NOTIFICATION_DURATION);
        assert!(!config.seed_demo_data);
    }
}
