// ── Core error types ──
//
// User-facing errors from meraki-core. Consumers never see reqwest errors
// or JSON parse failures directly; the `From<meraki_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the Dashboard at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Dashboard request timed out: {reason}")]
    Timeout { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{endpoint} still failing after {attempts} attempts: {reason}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        reason: String,
    },

    // ── Enumeration errors ───────────────────────────────────────────
    #[error("The API key cannot see any organizations")]
    NoOrganizations,

    #[error("Can't request organizations: {reason}")]
    OrganizationsUnavailable { reason: String },

    #[error("Can't request networks for organization {org_id}: {reason}")]
    NetworksUnavailable { org_id: String, reason: String },

    // ── Matching errors ──────────────────────────────────────────────
    #[error("Invalid SSID pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Wrap a failed top-level listing (organizations, networks).
    ///
    /// Auth, connection, and retry failures keep their own variant so the
    /// CLI can map them to the right exit code; anything else becomes the
    /// listing-specific error built by `wrap`.
    pub(crate) fn listing(err: meraki_api::Error, wrap: impl FnOnce(String) -> Self) -> Self {
        match err {
            meraki_api::Error::InvalidApiKey { .. }
            | meraki_api::Error::Transport(_)
            | meraki_api::Error::RetriesExhausted { .. } => Self::from(err),
            other => wrap(other.to_string()),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<meraki_api::Error> for CoreError {
    fn from(err: meraki_api::Error) -> Self {
        match err {
            meraki_api::Error::InvalidApiKey { status } => CoreError::AuthenticationFailed {
                message: format!("Dashboard rejected the API key (HTTP {status})"),
            },
            meraki_api::Error::InvalidHeader(reason) => CoreError::AuthenticationFailed {
                message: format!("API key is not a valid header value: {reason}"),
            },
            meraki_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        reason: e.to_string(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            meraki_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            meraki_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot be used for API paths: {url}"),
            },
            meraki_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                status: Some(429),
            },
            meraki_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            meraki_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response body: {message}"),
                status: None,
            },
            meraki_api::Error::RetriesExhausted {
                endpoint,
                attempts,
                source,
            } => CoreError::RetriesExhausted {
                endpoint,
                attempts,
                reason: source.to_string(),
            },
        }
    }
}
