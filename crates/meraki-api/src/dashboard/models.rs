// Dashboard API response types
//
// These mirror the raw JSON shapes returned by the v0 Dashboard endpoints.
// Optional text fields that the reports print are filled with "unknown" at
// deserialization time instead of being patched up afterwards.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for missing device names and client descriptions.
pub const UNKNOWN: &str = "unknown";

/// Network type that carries Air Marshal data and wireless clients.
pub const WIRELESS_NETWORK_TYPE: &str = "wireless";

// ── Organization ─────────────────────────────────────────────────────

/// An organization visible to the API key.
///
/// `GET /organizations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Older responses return this as a JSON number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ── Network ──────────────────────────────────────────────────────────

/// A network within an organization.
///
/// `GET /organizations/{orgId}/networks`
///
/// Only the fields the walk reads are decoded. Everything else (tags, time
/// zone, ...) is ignored so a shape change there cannot fail the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// `wireless`, `appliance`, `switch`, `camera`, `combined`, ...
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub network_type: String,
}

impl Network {
    /// Only wireless networks are scanned; `combined` and the rest are not.
    pub fn is_wireless(&self) -> bool {
        self.network_type == WIRELESS_NETWORK_TYPE
    }
}

// ── Air Marshal ──────────────────────────────────────────────────────

/// One SSID observed by Air Marshal scanning.
///
/// `GET /networks/{networkId}/airMarshal?timespan={s}`
///
/// BSSIDs, channels, RSSI and wired data vary between firmware versions and
/// are not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirMarshalRecord {
    /// Hidden networks come back empty or null.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid: String,
}

// ── Device ───────────────────────────────────────────────────────────

/// A device (access point, switch, ...) in a network.
///
/// `GET /networks/{networkId}/devices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub serial: String,
    #[serde(default = "unknown", deserialize_with = "null_as_unknown")]
    pub name: String,
}

// ── Client ───────────────────────────────────────────────────────────

/// A client seen by a device within the lookback window.
///
/// `GET /devices/{serial}/clients?timespan={s}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default = "unknown", deserialize_with = "null_as_unknown")]
    pub description: String,
    #[serde(default)]
    pub dhcp_hostname: Option<String>,
}

// ── Serde helpers ────────────────────────────────────────────────────

fn unknown() -> String {
    UNKNOWN.to_owned()
}

fn null_as_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(unknown))
}

fn null_as_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn device_without_name_is_unknown() {
        let device: Device = serde_json::from_value(json!({ "serial": "Q2XX-AAAA-0001" })).unwrap();
        assert_eq!(device.name, "unknown");
    }

    #[test]
    fn device_with_null_name_is_unknown() {
        let device: Device =
            serde_json::from_value(json!({ "serial": "Q2XX-AAAA-0001", "name": null })).unwrap();
        assert_eq!(device.name, "unknown");
    }

    #[test]
    fn client_description_defaults() {
        let missing: Client = serde_json::from_value(json!({ "mac": "aa:bb:cc:dd:ee:ff" })).unwrap();
        let null: Client =
            serde_json::from_value(json!({ "mac": "aa:bb:cc:dd:ee:ff", "description": null }))
                .unwrap();
        assert_eq!(missing.description, "unknown");
        assert_eq!(null.description, "unknown");
        assert!(missing.ip.is_none());
    }

    #[test]
    fn client_fields_use_camel_case() {
        let client: Client = serde_json::from_value(json!({
            "mac": "5c:f9:38:00:11:22",
            "ip": "10.0.0.20",
            "description": "Living Room",
            "dhcpHostname": "Living-Room",
            "mdnsName": "Living Room",
            "vlan": 20
        }))
        .unwrap();
        assert_eq!(client.dhcp_hostname.as_deref(), Some("Living-Room"));
        assert_eq!(client.ip.as_deref(), Some("10.0.0.20"));
    }

    #[test]
    fn organization_id_accepts_numbers() {
        let org: Organization =
            serde_json::from_value(json!({ "id": 549_236, "name": "Acme" })).unwrap();
        assert_eq!(org.id, "549236");
    }

    #[test]
    fn network_type_filter_is_exact() {
        let wireless: Network =
            serde_json::from_value(json!({ "id": "N_1", "name": "HQ", "type": "wireless" }))
                .unwrap();
        let combined: Network =
            serde_json::from_value(json!({ "id": "N_2", "name": "Branch", "type": "combined" }))
                .unwrap();
        assert!(wireless.is_wireless());
        assert!(!combined.is_wireless());
    }

    #[test]
    fn hidden_ssid_decodes_as_empty() {
        let record: AirMarshalRecord =
            serde_json::from_value(json!({ "ssid": null, "channels": [1, 6] })).unwrap();
        assert_eq!(record.ssid, "");
    }

    #[test]
    fn air_marshal_ignores_odd_detail_fields() {
        let record: AirMarshalRecord = serde_json::from_value(json!({
            "ssid": "CorpGuest",
            "bssids": [{
                "bssid": null,
                "contained": false,
                "detectedBy": [{ "device": 1234, "rssi": "17" }]
            }],
            "channels": null,
            "wiredMacs": null,
            "wiredVlans": ["20"]
        }))
        .unwrap();
        assert_eq!(record.ssid, "CorpGuest");
    }

    #[test]
    fn network_ignores_tags_and_other_metadata() {
        let network: Network = serde_json::from_value(json!({
            "id": "N_1",
            "name": "HQ-WiFi",
            "type": "wireless",
            "tags": ["a", "b"],
            "organizationId": 549_236,
            "timeZone": null
        }))
        .unwrap();
        assert!(network.is_wireless());
        assert_eq!(network.name, "HQ-WiFi");
    }

    #[test]
    fn client_without_mac_still_decodes() {
        let client: Client =
            serde_json::from_value(json!({ "mac": null, "description": "AppleTV-Living" }))
                .unwrap();
        assert_eq!(client.mac, "");
        assert_eq!(client.description, "AppleTV-Living");
    }
}
