use crate::error::PlaylistError;
use crate::format::format_entries;
use crate::response;
use lambda_http::tracing;
use lambda_http::{Body, Response};
use model::{DisplayEntry, PlaylistEntry, PARTITION_KEY, RECENT_LIMIT};
use store::PlaylistStore;

/// The newest entries as a JSON array of display objects.
pub(crate) async fn recent(store: &dyn PlaylistStore) -> Result<Response<Body>, PlaylistError> {
    let mut entries: Vec<PlaylistEntry> = store
        .query_recent(PARTITION_KEY, RECENT_LIMIT)
        .await
        .map_err(PlaylistError::StoreRead)?;
    entries.truncate(RECENT_LIMIT);

    tracing::debug!(count = entries.len(), "Read recent entries");

    let display: Vec<DisplayEntry> = format_entries(&entries)?;
    let body: String =
        serde_json::to_string(&display).map_err(|err| PlaylistError::Format(err.to_string()))?;

    Ok(response::json(body))
}
