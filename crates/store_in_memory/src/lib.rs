use async_trait::async_trait;
use model::{PlaylistEntry, PARTITION_KEY};
use store::StoreErrorReason::BackendFailure;
use store::{PlaylistStore, StoreError, StoreOperation};
use std::sync::{Arc, Mutex, MutexGuard};

/// Playlist store held in process memory, for tests and local runs.
///
/// Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryPlaylistStore {
    entries: Arc<Mutex<Vec<PlaylistEntry>>>,
}

impl InMemoryPlaylistStore {
    /// Every entry written so far, in write order.
    pub fn entries(&self) -> Result<Vec<PlaylistEntry>, StoreError> {
        let guard = self.lock(PARTITION_KEY, StoreOperation::QueryRecent)?;

        Ok(guard.clone())
    }

    fn lock(
        &self,
        partition_key: &str,
        operation: StoreOperation,
    ) -> Result<MutexGuard<'_, Vec<PlaylistEntry>>, StoreError> {
        self.entries.lock().map_err(|err| {
            StoreError::new(
                partition_key.to_string(),
                operation,
                BackendFailure(err.to_string().into()),
            )
        })
    }
}

#[async_trait]
impl PlaylistStore for InMemoryPlaylistStore {
    async fn put_entry(&self, entry: PlaylistEntry) -> Result<(), StoreError> {
        self.lock(&entry.pk, StoreOperation::PutEntry)?.push(entry);

        Ok(())
    }

    async fn query_recent(
        &self,
        partition_key: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistEntry>, StoreError> {
        let guard = self.lock(partition_key, StoreOperation::QueryRecent)?;

        let mut entries: Vec<PlaylistEntry> = guard
            .iter()
            .filter(|entry| entry.pk == partition_key)
            .cloned()
            .collect();

        // Stable sort keeps write order between equal timestamps, newest write first
        entries.reverse();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pk: &str, timestamp: i64) -> PlaylistEntry {
        let mut entry: PlaylistEntry =
            PlaylistEntry::new(timestamp, format!("artist {timestamp}"), "title".to_string(), 60);
        entry.pk = pk.to_string();
        entry
    }

    #[tokio::test]
    async fn returns_newest_first_up_to_limit() {
        let store: InMemoryPlaylistStore = InMemoryPlaylistStore::default();

        for timestamp in [30, 10, 70, 50, 20, 60, 40] {
            store.put_entry(entry("playlist", timestamp)).await.unwrap();
        }

        let recent: Vec<PlaylistEntry> = store
            .query_recent("playlist", 5)
            .await
            .expect("Query should succeed");
        let timestamps: Vec<i64> = recent.iter().map(|entry| entry.timestamp).collect();

        assert_eq!(vec![70, 60, 50, 40, 30], timestamps);
    }

    #[tokio::test]
    async fn only_returns_requested_partition() {
        let store: InMemoryPlaylistStore = InMemoryPlaylistStore::default();

        store.put_entry(entry("playlist", 1)).await.unwrap();
        store.put_entry(entry("other", 2)).await.unwrap();

        let recent: Vec<PlaylistEntry> = store.query_recent("playlist", 5).await.unwrap();

        assert_eq!(1, recent.len());
        assert_eq!(2, store.entries().unwrap().len());
    }

    #[test]
    fn entries_reports_poisoned_lock() {
        let store: InMemoryPlaylistStore = InMemoryPlaylistStore::default();
        let writer: InMemoryPlaylistStore = store.clone();

        let _ = std::thread::spawn(move || {
            let _guard = writer.entries.lock().unwrap();
            panic!("writer failed while holding the lock");
        })
        .join();

        assert!(store.entries().is_err());
    }

    #[tokio::test]
    async fn keeps_duplicate_timestamps() {
        let store: InMemoryPlaylistStore = InMemoryPlaylistStore::default();

        store.put_entry(entry("playlist", 5)).await.unwrap();
        store.put_entry(entry("playlist", 5)).await.unwrap();

        let recent: Vec<PlaylistEntry> = store.query_recent("playlist", 5).await.unwrap();

        assert_eq!(2, recent.len());
    }
}
