// ── Organization → network → (Air Marshal | device → client) walk ──
//
// Produces lazy streams of sightings in API order. Requests are issued one
// at a time as the consumer pulls items; nothing is prefetched or cached.
//
// Failure policy:
// - organizations / networks listing: fatal, the stream ends with the error
// - Air Marshal or device listing for one network: warn and skip the network
// - client listing for one device: warn and skip the device, unless the
//   transport itself gave out (retries exhausted, connection lost)

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::Stream;
use tracing::{debug, info, warn};

use meraki_api::{
    AirMarshalRecord, Client, DashboardClient, Device, Network, Organization, Timespan,
};

use crate::error::CoreError;

/// One Air Marshal record, with the network it was seen from.
#[derive(Debug, Clone)]
pub struct SsidSighting {
    pub network: Arc<Network>,
    pub record: AirMarshalRecord,
}

/// One client, with the device that saw it and that device's network.
#[derive(Debug, Clone)]
pub struct ClientSighting {
    pub network: Arc<Network>,
    pub device: Arc<Device>,
    pub client: Client,
}

/// Walks the first organization's wireless networks.
#[derive(Debug, Clone, Copy)]
pub struct Enumerator<'a> {
    client: &'a DashboardClient,
    timespan: Timespan,
}

impl<'a> Enumerator<'a> {
    pub fn new(client: &'a DashboardClient, timespan: Timespan) -> Self {
        Self { client, timespan }
    }

    /// The first organization the API key can see.
    ///
    /// Only one organization is ever scanned; extras are logged and ignored.
    pub async fn organization(&self) -> Result<Organization, CoreError> {
        first_organization(self.client).await
    }

    /// Every Air Marshal record of every wireless network.
    pub fn air_marshal(&self) -> impl Stream<Item = Result<SsidSighting, CoreError>> + use<'a> {
        let client = self.client;
        let timespan = self.timespan;

        try_stream! {
            let org = first_organization(client).await?;
            for network in wireless_networks(client, &org).await? {
                let network = Arc::new(network);
                let records = match client.list_air_marshal(&network.id, timespan).await {
                    Ok(records) => records,
                    Err(err) if is_skippable(&err) => {
                        warn!(
                            network_id = %network.id,
                            network = %network.name,
                            error = %err,
                            "can't request air marshal data, skipping network"
                        );
                        continue;
                    }
                    Err(err) => Err(CoreError::from(err))?,
                };

                debug!(network = %network.name, count = records.len(), "air marshal records");
                for record in records {
                    yield SsidSighting {
                        network: Arc::clone(&network),
                        record,
                    };
                }
            }
        }
    }

    /// Every client seen by every device of every wireless network.
    pub fn device_clients(&self) -> impl Stream<Item = Result<ClientSighting, CoreError>> + use<'a> {
        let client = self.client;
        let timespan = self.timespan;

        try_stream! {
            let org = first_organization(client).await?;
            for network in wireless_networks(client, &org).await? {
                let network = Arc::new(network);
                info!(network = %network.name, "working on network");

                let devices = match client.list_devices(&network.id).await {
                    Ok(devices) => devices,
                    Err(err) if is_skippable(&err) => {
                        warn!(
                            network_id = %network.id,
                            network = %network.name,
                            error = %err,
                            "can't request devices, skipping network"
                        );
                        continue;
                    }
                    Err(err) => Err(CoreError::from(err))?,
                };

                for device in devices {
                    let device = Arc::new(device);
                    info!(device = %device.name, serial = %device.serial, "working on device");

                    let clients = match client.list_device_clients(&device.serial, timespan).await {
                        Ok(clients) => clients,
                        Err(err) if is_skippable(&err) => {
                            warn!(
                                serial = %device.serial,
                                device = %device.name,
                                error = %err,
                                "can't request clients, skipping device"
                            );
                            continue;
                        }
                        Err(err) => Err(CoreError::from(err))?,
                    };

                    for c in clients {
                        yield ClientSighting {
                            network: Arc::clone(&network),
                            device: Arc::clone(&device),
                            client: c,
                        };
                    }
                }
            }
        }
    }
}

async fn first_organization(client: &DashboardClient) -> Result<Organization, CoreError> {
    let orgs = client
        .list_organizations()
        .await
        .map_err(|e| CoreError::listing(e, |reason| CoreError::OrganizationsUnavailable { reason }))?;

    let total = orgs.len();
    let org = orgs.into_iter().next().ok_or(CoreError::NoOrganizations)?;
    if total > 1 {
        warn!(
            organization = %org.name,
            ignored = total - 1,
            "API key sees several organizations; only the first is scanned"
        );
    }
    debug!(org_id = %org.id, organization = %org.name, "using organization");
    Ok(org)
}

async fn wireless_networks(
    client: &DashboardClient,
    org: &Organization,
) -> Result<Vec<Network>, CoreError> {
    let networks = client.list_networks(&org.id).await.map_err(|e| {
        CoreError::listing(e, |reason| CoreError::NetworksUnavailable {
            org_id: org.id.clone(),
            reason,
        })
    })?;

    Ok(networks
        .into_iter()
        .filter(|n| {
            if !n.is_wireless() {
                debug!(network = %n.name, network_type = %n.network_type, "skipping non-wireless network");
            }
            n.is_wireless()
        })
        .collect())
}

/// Per-network and per-device failures that leave the rest of the walk
/// meaningful: HTTP status errors and undecodable bodies.
fn is_skippable(err: &meraki_api::Error) -> bool {
    !matches!(
        err,
        meraki_api::Error::Transport(_) | meraki_api::Error::RetriesExhausted { .. }
    )
}
