use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, tracing, Error, Request};
use playlist::config::PlaylistConfig;
use playlist::PlaylistFunction;
use std::sync::Arc;
use store::PlaylistStore;
use store_dynamodb::DynamoDbPlaylistStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config: PlaylistConfig = PlaylistConfig::from_env()?;

    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let store: Arc<dyn PlaylistStore> =
        Arc::new(DynamoDbPlaylistStore::new(config.table_name.clone(), dynamodb_client));

    tracing::info!(table = %config.table_name, "Starting playlist function");

    let function: PlaylistFunction = PlaylistFunction::new(store, config.api_key);

    run(service_fn(|event: Request| function.handle(event))).await
}
