use ::model::Error;
use async_trait::async_trait;
use model::PlaylistEntry;
use std::fmt::{Display, Formatter};

/// Storage for playlist entries.
///
/// Entries are grouped under a partition key and ordered within it by their
/// timestamp. Implementations never expire entries themselves.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn put_entry(&self, entry: PlaylistEntry) -> Result<(), StoreError>;

    /// The newest `limit` entries in `partition_key`, newest first.
    async fn query_recent(
        &self,
        partition_key: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistEntry>, StoreError>;
}

/// Errors arising from reading or writing entries.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct StoreError {
    pub partition_key: String,

    pub operation: StoreOperation,
    pub reason: StoreErrorReason,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreErrorReason {
    // The entry could not be converted to or from the stored representation
    #[error("{0}")]
    BadState(String),
    // An error from the underlying store
    #[error("{0}")]
    BackendFailure(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    PutEntry,
    QueryRecent,
}

impl StoreError {
    pub fn new(partition_key: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            partition_key,
            operation,
            reason,
        }
    }
}

impl Display for StoreOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_underlying_reason() {
        let err: StoreError = StoreError::new(
            "playlist".to_string(),
            StoreOperation::PutEntry,
            StoreErrorReason::BadState("missing field `artist`".to_string()),
        );

        assert_eq!("missing field `artist`", err.to_string());
        assert_eq!("PutEntry", err.operation.to_string());
    }

    #[test]
    fn wraps_backend_failures() {
        let backend: Error = "throttled".into();
        let err: StoreError = StoreError::new(
            "playlist".to_string(),
            StoreOperation::QueryRecent,
            StoreErrorReason::BackendFailure(backend),
        );

        assert_eq!("throttled", err.to_string());
    }
}
