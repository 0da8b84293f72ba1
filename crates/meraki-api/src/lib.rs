//! Async read-only client for the Meraki Dashboard API.
//!
//! - **[`DashboardClient`]**: authenticated GETs for organizations,
//!   networks, Air Marshal records, devices, and device clients.
//! - **[`RetryPolicy`]**: bounded exponential backoff used by the flaky
//!   per-device clients endpoint.
//! - **[`Timespan`]**: validated lookback window (at most 31 days).
//! - **Models** ([`models`]): serde mirrors of the Dashboard JSON shapes.

pub mod dashboard;
pub mod error;
pub mod retry;
pub mod timespan;
pub mod transport;

pub use dashboard::client::{DEFAULT_BASE_URL, DashboardClient};
pub use dashboard::models;
pub use dashboard::models::{AirMarshalRecord, Client, Device, Network, Organization};
pub use error::Error;
pub use retry::RetryPolicy;
pub use timespan::{Timespan, TimespanError};
pub use transport::{API_KEY_HEADER, TransportConfig};
