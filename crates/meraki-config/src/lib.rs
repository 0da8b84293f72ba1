//! Configuration for the `airmarshal` CLI.
//!
//! Settings are layered with figment: built-in defaults, then
//! `MERAKI_DASHBOARD_*` environment variables, then CLI flag overrides.
//! No configuration file is read. The result is translated into the
//! transport and retry settings `meraki-core` consumes.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use meraki_core::{CoreError, DEFAULT_BASE_URL, DashboardClient, RetryPolicy, TransportConfig};

/// Prefix for environment variables, e.g. `MERAKI_DASHBOARD_API_KEY`.
pub const ENV_PREFIX: &str = "MERAKI_DASHBOARD_";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured (set MERAKI_DASHBOARD_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Layers ──────────────────────────────────────────────────────────

/// The merged, not yet validated shape every provider feeds into.
#[derive(Debug, Deserialize, Serialize)]
struct RawSettings {
    api_key: Option<String>,
    base_url: String,
    timeout: u64,
    retry_attempts: u32,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout: 30,
            retry_attempts: 5,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
}

// ── Settings ────────────────────────────────────────────────────────

/// Validated settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub api_key: SecretString,
    pub base_url: Url,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

impl Settings {
    /// Merge defaults, environment, and `overrides`, then validate.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let raw: RawSettings = Figment::new()
            .merge(Serialized::defaults(RawSettings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        let settings = Self::validate(raw)?;
        debug!(
            base_url = %settings.base_url,
            timeout_secs = settings.timeout.as_secs(),
            retry_attempts = settings.retry_attempts,
            "configuration loaded"
        );
        Ok(settings)
    }

    fn validate(raw: RawSettings) -> Result<Self, ConfigError> {
        let api_key = raw
            .api_key
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from)
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url: Url = raw.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", raw.base_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }

        if raw.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if raw.retry_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "retry_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(raw.timeout),
            retry_attempts: raw.retry_attempts,
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(self.timeout)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            ..RetryPolicy::default()
        }
    }

    /// Build an authenticated Dashboard client from these settings.
    pub fn client(&self) -> Result<DashboardClient, CoreError> {
        let client =
            DashboardClient::from_api_key(self.base_url.as_str(), &self.api_key, &self.transport())?;
        Ok(client.with_retry_policy(self.retry_policy()))
    }
}
