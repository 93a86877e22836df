//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;

/// Configuration for a [`TrackingClient`](crate::TrackingClient).
///
/// Deserializable so callers can load it straight from a JSON/TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key sent in the `Tracking-Api-Key` header.
    pub app_key: String,
    /// Log requests, responses and retries at debug level.
    pub debug: bool,
    /// Use the sandbox copy of the remote API.
    pub sandbox: bool,
    /// Base URL, overridable for testing.
    pub base_url: String,
    /// Minimum gap between consecutive requests in milliseconds. Zero
    /// disables the throttle; positive values below 1000 are raised to 1000.
    pub interval_ms: u64,
    /// Maximum number of re-issues after a rate-limit response.
    pub max_retries: u32,
    /// Initial wait before a rate-limit retry, in milliseconds.
    pub retry_wait_ms: u64,
    /// Ceiling on a single retry wait, in milliseconds.
    pub retry_max_wait_ms: u64,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            debug: false,
            sandbox: false,
            base_url: BASE_URL.to_string(),
            interval_ms: 0,
            max_retries: DEFAULT_RETRY_COUNT,
            retry_wait_ms: DEFAULT_RETRY_WAIT_MS,
            retry_max_wait_ms: DEFAULT_RETRY_MAX_WAIT_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            ..Self::default()
        }
    }

    /// Full endpoint prefix, including the sandbox suffix when enabled.
    pub(crate) fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.sandbox {
            format!("{base}{SANDBOX_SUFFIX}")
        } else {
            base.to_string()
        }
    }

    /// Minimum interval between requests, `None` when the throttle is off.
    pub(crate) fn min_interval(&self) -> Option<Duration> {
        if self.interval_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS)))
        }
    }

    pub(crate) fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            default_timeout()
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}
