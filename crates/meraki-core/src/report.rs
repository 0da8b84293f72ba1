// ── Report rows ──
//
// One row per match. `fields()` is the delimited-record column order the
// CSV output has always used; the serde shape feeds JSON/YAML output.

use serde::Serialize;

use crate::enumerate::{ClientSighting, SsidSighting};
use crate::matcher::MatchReason;

/// A row that can be written as a flat delimited record.
pub trait ReportRow: Serialize {
    /// Column values, in output order.
    fn fields(&self) -> Vec<&str>;
}

/// An Air Marshal SSID that matched the search pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsidMatch {
    pub network: String,
    pub ssid: String,
}

impl From<&SsidSighting> for SsidMatch {
    fn from(s: &SsidSighting) -> Self {
        Self {
            network: s.network.name.clone(),
            ssid: s.record.ssid.clone(),
        }
    }
}

impl ReportRow for SsidMatch {
    fn fields(&self) -> Vec<&str> {
        vec![self.network.as_str(), self.ssid.as_str()]
    }
}

/// A client flagged as a likely Apple TV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppleTvMatch {
    pub network: String,
    pub device: String,
    pub mac: String,
    pub ip: String,
    pub description: String,
    pub dhcp_hostname: String,
    pub reason: MatchReason,
}

impl AppleTvMatch {
    pub fn new(sighting: &ClientSighting, reason: MatchReason) -> Self {
        let client = &sighting.client;
        Self {
            network: sighting.network.name.clone(),
            device: sighting.device.name.clone(),
            mac: client.mac.clone(),
            ip: client.ip.clone().unwrap_or_default(),
            description: client.description.clone(),
            dhcp_hostname: client.dhcp_hostname.clone().unwrap_or_default(),
            reason,
        }
    }
}

impl ReportRow for AppleTvMatch {
    /// `reason` stays out of the delimited record.
    fn fields(&self) -> Vec<&str> {
        vec![
            self.network.as_str(),
            self.device.as_str(),
            self.mac.as_str(),
            self.ip.as_str(),
            self.description.as_str(),
            self.dhcp_hostname.as_str(),
        ]
    }
}
