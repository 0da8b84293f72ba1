// Dashboard network-scoped endpoints
//
// Both are single GETs with no retry: the enumerator decides per call
// whether a failure skips the network or aborts the run.

use tracing::debug;

use super::client::{DashboardClient, timespan_param};
use super::models::{AirMarshalRecord, Device};
use crate::error::Error;
use crate::timespan::Timespan;

impl DashboardClient {
    /// SSIDs seen by Air Marshal scanning within the lookback window.
    ///
    /// `GET /networks/{networkId}/airMarshal?timespan={s}`
    pub async fn list_air_marshal(
        &self,
        network_id: &str,
        timespan: Timespan,
    ) -> Result<Vec<AirMarshalRecord>, Error> {
        let url = self.url(&["networks", network_id, "airMarshal"]);
        debug!(network_id, %timespan, "listing air marshal records");
        self.get_with_params(url, &timespan_param(timespan)).await
    }

    /// Devices claimed into a network.
    ///
    /// `GET /networks/{networkId}/devices`
    pub async fn list_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        let url = self.url(&["networks", network_id, "devices"]);
        debug!(network_id, "listing devices");
        self.get(url).await
    }
}
