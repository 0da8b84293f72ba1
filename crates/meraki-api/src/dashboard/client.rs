// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with Dashboard-specific URL construction, status
// mapping, and JSON decoding. Endpoint methods live in sibling modules
// (organizations, networks, devices) as inherent impls to keep this module
// focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::transport::TransportConfig;

/// Public Dashboard API v0 root.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v0";

/// Dashboard error bodies look like `{"errors": ["..."]}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Read-only client for the Meraki Dashboard API.
///
/// Every method issues exactly one GET (plus retries, for the endpoints
/// that use the [`RetryPolicy`]) and decodes the JSON body. No caching.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl DashboardClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X-Cisco-Meraki-API-Key` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_authenticated_client(api_key)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy used by retried endpoints.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// `["networks", "N_1", "devices"]` -> `{base}/networks/N_1/devices`
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        self.get_with_params(url, &[]).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    /// GET under the retry policy: transport failures and rate limiting
    /// are retried with backoff, everything else fails immediately.
    pub(crate) async fn get_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        self.retry
            .run(endpoint, move || self.get_with_params(url.clone(), params))
            .await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..floor_char_boundary(&body, 200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Error::InvalidApiKey {
                status: status.as_u16(),
            };
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(1);
            return Error::RateLimited { retry_after_secs };
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
            _ if raw.trim().is_empty() => status.to_string(),
            _ => raw[..floor_char_boundary(&raw, 200)].to_owned(),
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Largest index `<= max` that sits on a char boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Helper so endpoint modules can build the shared `timespan` query param.
pub(crate) fn timespan_param(timespan: crate::Timespan) -> [(&'static str, String); 1] {
    [("timespan", timespan.to_string())]
}
