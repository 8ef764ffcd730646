use crate::value::Value;
use chrono::DateTime;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Offset-carrying layout used by interval fixtures, e.g. `2018-07-15 00:00:00 +00:00`.
const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

///
/// Timestamp
/// (in seconds)
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn add_seconds(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    #[must_use]
    pub const fn sub_seconds(self, secs: u64) -> Self {
        Self(self.0.saturating_sub(secs))
    }

    pub fn parse_rfc3339(s: &str) -> Result<Self, String> {
        let dt =
            DateTime::parse_from_rfc3339(s).map_err(|e| format!("timestamp parse error: {e}"))?;

        Self::from_unix(dt.timestamp())
    }

    /// Parse integer seconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS ±HH:MM`.
    pub fn parse_flexible(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Ok(n) = s.parse::<u64>() {
            return Ok(Self(n));
        }

        if let Ok(dt) = DateTime::parse_from_str(s, OFFSET_FORMAT) {
            return Self::from_unix(dt.timestamp());
        }

        Self::parse_rfc3339(s)
    }

    fn from_unix(secs: i64) -> Result<Self, String> {
        u64::try_from(secs)
            .map(Self)
            .map_err(|_| "timestamp before epoch".to_string())
    }
}

impl From<u64> for Timestamp {
    fn from(u: u64) -> Self {
        Self(u)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

///
/// TESTS
///
