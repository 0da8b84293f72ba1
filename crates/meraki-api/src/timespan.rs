// ── Lookback window for historical Dashboard queries ──

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lookback window, in seconds, for Air Marshal and client queries.
///
/// The Dashboard refuses windows longer than 31 days, so construction
/// through [`Timespan::from_secs`] rejects them before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Timespan(u32);

impl Timespan {
    /// 31 days.
    pub const MAX_SECS: u64 = 60 * 60 * 24 * 31;

    /// 7 days.
    pub const DEFAULT_SECS: u64 = 60 * 60 * 24 * 7;

    pub const DEFAULT: Self = Self(604_800);

    pub fn from_secs(secs: u64) -> Result<Self, TimespanError> {
        if secs == 0 {
            return Err(TimespanError::Zero);
        }
        if secs > Self::MAX_SECS {
            return Err(TimespanError::TooLong { secs });
        }
        u32::try_from(secs)
            .map(Self)
            .map_err(|_| TimespanError::TooLong { secs })
    }

    pub fn from_duration(duration: Duration) -> Result<Self, TimespanError> {
        Self::from_secs(duration.as_secs())
    }

    pub fn as_secs(self) -> u32 {
        self.0
    }
}

impl Default for Timespan {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Timespan {
    type Error = TimespanError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl From<Timespan> for u64 {
    fn from(t: Timespan) -> Self {
        u64::from(t.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimespanError {
    #[error("Meraki Air Marshal API only allows timespan of <= 31 days (got {secs}s)")]
    TooLong { secs: u64 },

    #[error("timespan must be at least one second")]
    Zero,
}
