use async_trait::async_trait;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::operation::query::{QueryError, QueryOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use model::PlaylistEntry;
use std::collections::HashMap;
use store::StoreErrorReason::{BackendFailure, BadState};
use store::StoreOperation::{PutEntry, QueryRecent};
use store::{PlaylistStore, StoreError};

pub mod table;

use table::{PARTITION_KEY, PARTITION_KEY_NAME, PARTITION_KEY_VALUE};

/// Playlist entries stored in a DynamoDB table, see [`table`] for the layout.
#[derive(Clone)]
pub struct DynamoDbPlaylistStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
    consistent_read: bool,
}

impl DynamoDbPlaylistStore {
    pub fn new(table_name: String, dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        DynamoDbPlaylistStore {
            table_name,
            dynamodb_client,
            consistent_read: false,
        }
    }

    /// Read entries written immediately before the query.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(
        &self,
        item: HashMap<String, AttributeValue>,
    ) -> Result<PutItemOutput, SdkError<PutItemError, HttpResponse>> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
    }

    async fn query(
        &self,
        partition_key: &str,
        limit: i32,
    ) -> Result<QueryOutput, SdkError<QueryError, HttpResponse>> {
        self.dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(table::key_condition())
            .expression_attribute_names(PARTITION_KEY_NAME, PARTITION_KEY)
            .expression_attribute_values(
                PARTITION_KEY_VALUE,
                AttributeValue::S(partition_key.to_string()),
            )
            // Descending by sort key
            .scan_index_forward(false)
            .limit(limit)
            .consistent_read(self.consistent_read)
            .send()
            .await
    }
}

#[async_trait]
impl PlaylistStore for DynamoDbPlaylistStore {
    async fn put_entry(&self, entry: PlaylistEntry) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(&entry)
            .map_err(|err| StoreError::new(entry.pk.clone(), PutEntry, BadState(err.to_string())))?;

        self.put_item(item).await.map_err(|err| {
            StoreError::new(
                entry.pk.clone(),
                PutEntry,
                BackendFailure(DisplayErrorContext(&err).to_string().into()),
            )
        })?;

        tracing::debug!(table = %self.table_name, timestamp = entry.timestamp, "Stored entry");

        Ok(())
    }

    async fn query_recent(
        &self,
        partition_key: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistEntry>, StoreError> {
        let limit: i32 = i32::try_from(limit).unwrap_or(i32::MAX);

        let output: QueryOutput = self.query(partition_key, limit).await.map_err(|err| {
            StoreError::new(
                partition_key.to_string(),
                QueryRecent,
                BackendFailure(DisplayErrorContext(&err).to_string().into()),
            )
        })?;

        let items: Vec<HashMap<String, AttributeValue>> = output.items.unwrap_or_default();

        tracing::debug!(table = %self.table_name, count = items.len(), "Queried entries");

        serde_dynamo::from_items(items).map_err(|err| {
            StoreError::new(
                partition_key.to_string(),
                QueryRecent,
                BadState(err.to_string()),
            )
        })
    }
}
