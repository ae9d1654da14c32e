use serde::{Deserialize, Serialize};

pub mod entry;
pub mod env;
pub mod numeric;

pub use entry::PlaylistEntry;
pub use numeric::NumericValue;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// The single logical collection every entry is stored under.
pub const PARTITION_KEY: &str = "playlist";

/// Entries are purged by the store two days after being written.
pub const RETENTION_SECONDS: i64 = 2 * 24 * 60 * 60;

/// How many entries a read returns.
pub const RECENT_LIMIT: usize = 5;

/// A playlist entry as rendered for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub when: String,
    #[serde(rename = "timeDatetime")]
    pub time_datetime: String,
    pub artist: String,
    pub title: String,
    pub length: String,
}
