// ── Record matchers ──
//
// Predicates applied to each enumerated record. Substring matching only,
// so both err on the side of reporting too much.

use meraki_api::{AirMarshalRecord, Client};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::CoreError;

/// OUIs registered to Apple and commonly seen on Apple TVs.
pub const APPLE_TV_MAC_PREFIXES: [&str; 3] = ["5c:f9:38", "f4:b7:e2", "50:32:37"];

/// Lowercase description fragments users give Apple TVs.
pub const APPLE_TV_DESCRIPTIONS: [&str; 3] = ["apple tv", "apple-tv", "appletv"];

// ── SSID pattern ─────────────────────────────────────────────────────

/// Case-insensitive, unanchored regex search over SSID names.
#[derive(Debug, Clone)]
pub struct SsidMatcher {
    regex: Regex,
}

impl SsidMatcher {
    pub fn new(pattern: &str) -> Result<Self, CoreError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CoreError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, ssid: &str) -> bool {
        self.regex.is_match(ssid)
    }

    pub fn matches(&self, record: &AirMarshalRecord) -> bool {
        self.is_match(&record.ssid)
    }
}

// ── Apple TV heuristic ───────────────────────────────────────────────

/// Which signature flagged a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    /// MAC address contains a known Apple TV vendor prefix.
    MacPrefix,
    /// Description mentions an Apple TV.
    Description,
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MacPrefix => "mac-prefix",
            Self::Description => "description",
        })
    }
}

/// Flags clients whose MAC prefix OR description looks like an Apple TV.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleTvMatcher;

impl AppleTvMatcher {
    /// The first signature that fires, MAC prefix checked first.
    pub fn match_reason(&self, client: &Client) -> Option<MatchReason> {
        let mac = client.mac.to_lowercase();
        if APPLE_TV_MAC_PREFIXES.iter().any(|p| mac.contains(p)) {
            return Some(MatchReason::MacPrefix);
        }

        let description = client.description.to_lowercase();
        if APPLE_TV_DESCRIPTIONS.iter().any(|d| description.contains(d)) {
            return Some(MatchReason::Description);
        }

        None
    }

    pub fn matches(&self, client: &Client) -> bool {
        self.match_reason(client).is_some()
    }
}
