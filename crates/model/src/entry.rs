use crate::numeric::{coerce_i64, coerce_u64};
use crate::{PARTITION_KEY, RETENTION_SECONDS};
use serde::{Deserialize, Serialize};

/// A single track written to the playlist log.
///
/// Field names match the table attributes. `timestamp` is the sort key and
/// `ttl` is read by the store's expiry feature, never by this crate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub pk: String,
    #[serde(deserialize_with = "coerce_i64")]
    pub timestamp: i64,
    pub artist: String,
    pub title: String,
    #[serde(rename = "duration", deserialize_with = "coerce_u64")]
    pub duration_seconds: u64,
    #[serde(rename = "ttl", deserialize_with = "coerce_i64")]
    pub expires_at: i64,
}

impl PlaylistEntry {
    /// Create an entry written at `timestamp`, expiring after the retention window.
    pub fn new(timestamp: i64, artist: String, title: String, duration_seconds: u64) -> Self {
        PlaylistEntry {
            pk: PARTITION_KEY.to_string(),
            timestamp,
            artist,
            title,
            duration_seconds,
            expires_at: timestamp + RETENTION_SECONDS,
        }
    }
}
