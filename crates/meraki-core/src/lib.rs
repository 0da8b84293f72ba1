//! Search logic between `meraki-api` and the `airmarshal` CLI.
//!
//! - **[`Enumerator`]**: walks organization → wireless networks →
//!   (Air Marshal records | devices → clients) as lazy streams, applying
//!   the skip-or-abort policy for each level.
//!
//! - **Matchers** ([`SsidMatcher`], [`AppleTvMatcher`]): per-record
//!   predicates: case-insensitive regex over SSIDs, and the MAC-prefix /
//!   description heuristic for Apple TVs.
//!
//! - **Search pipelines** ([`search_ssids`], [`search_apple_tvs`]): the
//!   enumerator streams filtered through a matcher into report rows.

pub mod enumerate;
pub mod error;
pub mod matcher;
pub mod report;
pub mod search;

// ── Primary re-exports ──────────────────────────────────────────────
pub use enumerate::{ClientSighting, Enumerator, SsidSighting};
pub use error::CoreError;
pub use matcher::{AppleTvMatcher, MatchReason, SsidMatcher};
pub use report::{AppleTvMatch, ReportRow, SsidMatch};
pub use search::{search_apple_tvs, search_ssids};

// API types the CLI needs without depending on `meraki-api` directly.
pub use meraki_api::{
    DEFAULT_BASE_URL, DashboardClient, RetryPolicy, Timespan, TimespanError, TransportConfig,
};
