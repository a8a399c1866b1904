//! Client configuration: defaults, environment overrides and YAML files.

use crate::resilience::RetryPolicy;
use crate::Result;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// HTTP and retry settings shared by both nodes.
///
/// Every field has a default, so a YAML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    pub proxy_url: Option<String>,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            pool_max_idle_per_host: 8,
            pool_idle_timeout_secs: 90,
            proxy_url: None,
            max_attempts: 3,
            retry_delay_ms: 1_000,
        }
    }
}

impl ClientConfig {
    /// Defaults with `ELEVENLABS_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Apply environment overrides on top of `self`. Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("ELEVENLABS_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Some(v) = env_parse::<u64>("ELEVENLABS_HTTP_TIMEOUT_SECS") {
            self.timeout_secs = v;
        }
        if let Some(v) = env_parse::<usize>("ELEVENLABS_HTTP_POOL_MAX_IDLE_PER_HOST") {
            self.pool_max_idle_per_host = v;
        }
        if let Ok(proxy) = env::var("ELEVENLABS_PROXY_URL") {
            if !proxy.trim().is_empty() {
                self.proxy_url = Some(proxy);
            }
        }
        if let Some(v) = env_parse::<u32>("ELEVENLABS_MAX_ATTEMPTS") {
            self.max_attempts = v;
        }
        if let Some(v) = env_parse::<u64>("ELEVENLABS_RETRY_DELAY_MS") {
            self.retry_delay_ms = v;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Retry policy for the voice lookup (network failures only).
    pub fn lookup_retry(&self) -> RetryPolicy {
        RetryPolicy::network_only()
            .with_max_attempts(self.max_attempts)
            .with_delay(self.retry_delay())
    }

    /// Retry policy for synthesis (any failure, decode included).
    pub fn synthesis_retry(&self) -> RetryPolicy {
        RetryPolicy::any_failure()
            .with_max_attempts(self.max_attempts)
            .with_delay(self.retry_delay())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}
