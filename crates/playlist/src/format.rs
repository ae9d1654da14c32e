use crate::error::PlaylistError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use model::{DisplayEntry, PlaylistEntry};

/// Entry times are shown in the station's local time.
pub const DISPLAY_TIME_ZONE: Tz = chrono_tz::America::New_York;

const WHEN_FORMAT: &str = "%I:%M%p %m/%d/%Y";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render stored entries for display, keeping their order.
pub fn format_entries(entries: &[PlaylistEntry]) -> Result<Vec<DisplayEntry>, PlaylistError> {
    entries.iter().map(format_entry).collect()
}

pub fn format_entry(entry: &PlaylistEntry) -> Result<DisplayEntry, PlaylistError> {
    let played_at: DateTime<Tz> = DateTime::<Utc>::from_timestamp(entry.timestamp, 0)
        .ok_or_else(|| {
            PlaylistError::Format(format!("timestamp {} is out of range", entry.timestamp))
        })?
        .with_timezone(&DISPLAY_TIME_ZONE);

    Ok(DisplayEntry {
        when: played_at.format(WHEN_FORMAT).to_string(),
        time_datetime: played_at.format(DATETIME_FORMAT).to_string(),
        artist: entry.artist.clone(),
        title: entry.title.clone(),
        length: format_length(entry.duration_seconds),
    })
}

/// `minutes:seconds`, seconds always two digits.
pub fn format_length(duration_seconds: u64) -> String {
    format!("{}:{:02}", duration_seconds / 60, duration_seconds % 60)
}
