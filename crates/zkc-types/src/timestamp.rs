use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;
use crate::field::FieldElement;

/// A UTC instant with one-second resolution.
///
/// Serializes as a bare integer of Unix seconds, which is also the value
/// bound into a certificate's leaf hash. Sub-second precision is dropped on
/// construction so the in-memory and wire forms always agree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Build from a Unix second count.
    pub fn from_unix(seconds: i64) -> Result<Self, TypeError> {
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(Self)
            .ok_or(TypeError::InvalidTimestamp(seconds))
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// The Unix second count as a field element. Pre-epoch instants wrap
    /// modulo the prime.
    pub fn to_field_element(&self) -> FieldElement {
        FieldElement::from_i64_mod_order(self.unix_seconds())
    }

    /// The underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        // Truncation cannot leave the representable range.
        DateTime::<Utc>::from_timestamp(value.timestamp(), 0)
            .map(Self)
            .unwrap_or(Self(value))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.unix_seconds())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Self::from_unix(seconds).map_err(serde::de::Error::custom)
    }
}
