// Shared transport configuration for building reqwest::Client instances.
//
// Holds the timeout and user agent so the CLI and tests build clients
// the same way, and injects the Dashboard auth headers.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the Dashboard API key.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

const USER_AGENT: &str = concat!("airmarshal/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout, covering connect through body read.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` with additional default headers.
    fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Build a client that authenticates every request with `api_key`.
    ///
    /// The key header is marked sensitive so it never shows up in
    /// `Debug` output of requests.
    pub fn build_authenticated_client(
        &self,
        api_key: &SecretString,
    ) -> Result<reqwest::Client, Error> {
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        self.build_client_with_headers(headers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(TransportConfig::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_key_with_control_characters() {
        let key = SecretString::from("bad\nkey".to_string());
        let err = TransportConfig::default()
            .build_authenticated_client(&key)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)), "got {err:?}");
    }
}
