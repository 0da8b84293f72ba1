//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text, and each of those to a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use meraki_config::ConfigError;
use meraki_core::{CoreError, TimespanError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the Dashboard at {url}")]
    #[diagnostic(
        code(airmarshal::connection_failed),
        help("Check network access to the Dashboard API, or the --base-url value.\nCause: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Dashboard request timed out: {reason}")]
    #[diagnostic(
        code(airmarshal::timeout),
        help("Increase the per-request timeout with --timeout.")
    )]
    Timeout { reason: String },

    #[error("{endpoint} still failing after {attempts} attempts")]
    #[diagnostic(
        code(airmarshal::retries_exhausted),
        help("The Dashboard kept failing or rate limiting the request.\nLast error: {reason}\nRaise --retry-attempts or try again later.")
    )]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        reason: String,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("No Dashboard API key configured")]
    #[diagnostic(
        code(airmarshal::no_api_key),
        help("Set MERAKI_DASHBOARD_API_KEY or pass --api-key.")
    )]
    MissingApiKey,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(airmarshal::auth_failed),
        help("Verify the API key and that API access is enabled for the organization.")
    )]
    AuthFailed { message: String },

    // ── Enumeration ──────────────────────────────────────────────────
    #[error("The API key cannot see any organizations")]
    #[diagnostic(code(airmarshal::no_organizations))]
    NoOrganizations,

    #[error("{message}")]
    #[diagnostic(code(airmarshal::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(airmarshal::timespan),
        help("Pass --timespan in seconds (at most 2678400) or as a duration like \"7d\".")
    )]
    Timespan(#[from] TimespanError),

    #[error("Invalid SSID pattern '{pattern}'")]
    #[diagnostic(code(airmarshal::invalid_pattern), help("{reason}"))]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airmarshal::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(code(airmarshal::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV record: {0}")]
    #[diagnostic(code(airmarshal::csv))]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    #[diagnostic(code(airmarshal::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize YAML: {0}")]
    #[diagnostic(code(airmarshal::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } | Self::RetriesExhausted { .. } => exit_code::TIMEOUT,
            Self::MissingApiKey | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timespan(_) | Self::InvalidPattern { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { reason } => Self::Timeout { reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::RetriesExhausted {
                endpoint,
                attempts,
                reason,
            } => Self::RetriesExhausted {
                endpoint,
                attempts,
                reason,
            },
            CoreError::NoOrganizations => Self::NoOrganizations,
            CoreError::InvalidPattern { pattern, reason } => {
                Self::InvalidPattern { pattern, reason }
            }
            CoreError::Config { message } => Self::Config { message },
            err @ (CoreError::OrganizationsUnavailable { .. }
            | CoreError::NetworksUnavailable { .. }
            | CoreError::Api { .. }) => Self::ApiError {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingApiKey => Self::MissingApiKey,
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(err) => Self::Config {
                message: err.to_string(),
            },
        }
    }
}
