use thiserror::Error;

/// Top-level error type for the `meraki-api` crate.
///
/// Covers every failure mode of the Dashboard API surface: transport,
/// authentication, HTTP status, decoding, and the retry budget.
/// `meraki-core` maps these into domain-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the Dashboard (HTTP 401/403).
    #[error("Invalid API key (HTTP {status})")]
    InvalidApiKey { status: u16 },

    /// The key could not be encoded as an HTTP header value.
    #[error("API key is not a valid header value: {0}")]
    InvalidHeader(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Base URL that cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(String),

    // ── Dashboard API ───────────────────────────────────────────────
    /// Rate limited by the Dashboard. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Non-success HTTP status from the Dashboard.
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Retry ───────────────────────────────────────────────────────
    /// A retried call kept failing until the attempt budget ran out.
    #[error("{endpoint} still failing after {attempts} attempts: {source}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Every transport failure counts (the clients endpoint in particular
    /// tends to drop connections), plus Dashboard rate limiting.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::RateLimited { .. })
    }
}
