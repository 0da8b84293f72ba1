// Dashboard device-scoped endpoints

use tracing::debug;

use super::client::{DashboardClient, timespan_param};
use super::models::Client;
use crate::error::Error;
use crate::timespan::Timespan;

impl DashboardClient {
    /// Clients seen by a device within the lookback window.
    ///
    /// `GET /devices/{serial}/clients?timespan={s}`
    ///
    /// This endpoint regularly drops connections under load, so it runs
    /// under the client's [`RetryPolicy`](crate::RetryPolicy). Once the
    /// budget is spent the call fails with [`Error::RetriesExhausted`].
    pub async fn list_device_clients(
        &self,
        serial: &str,
        timespan: Timespan,
    ) -> Result<Vec<Client>, Error> {
        let url = self.url(&["devices", serial, "clients"]);
        debug!(serial, %timespan, "listing device clients");
        self.get_with_retry("device clients", url, &timespan_param(timespan))
            .await
    }
}
