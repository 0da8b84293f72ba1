// Dashboard organization endpoints

use tracing::debug;

use super::client::DashboardClient;
use super::models::{Network, Organization};
use crate::error::Error;

impl DashboardClient {
    /// List all organizations the API key can read.
    ///
    /// `GET /organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        let url = self.url(&["organizations"]);
        debug!("listing organizations");
        self.get(url).await
    }

    /// List every network in an organization, regardless of type.
    ///
    /// `GET /organizations/{orgId}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        let url = self.url(&["organizations", org_id, "networks"]);
        debug!(org_id, "listing networks");
        self.get(url).await
    }
}
