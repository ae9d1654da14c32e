use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::operation::query::QueryOutput;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::types::error::ProvisionedThroughputExceededException;
use aws_smithy_mocks::{mock, mock_client, Rule, RuleMode};
use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use model::env::{PLAYLIST_API_KEY, TABLE_NAME};
use std::collections::HashMap;
use std::env;

/// Test configuration values
pub const TEST_TABLE: &str = "playlist_table";
pub const TEST_API_KEY: &str = "test-api-key";

/// Setup default environment variables used in testing
pub fn setup_default_env() {
    unsafe {
        env::set_var(TABLE_NAME, TEST_TABLE);
        env::set_var(PLAYLIST_API_KEY, TEST_API_KEY);
    }
}

/// A stored playlist row as DynamoDB returns it, numbers as decimal strings
pub fn playlist_item(
    timestamp: &str,
    artist: &str,
    title: &str,
    duration: &str,
) -> HashMap<String, AttributeValue> {
    let ttl: String = timestamp
        .parse::<i64>()
        .map(|timestamp| (timestamp + model::RETENTION_SECONDS).to_string())
        .unwrap_or_else(|_| timestamp.to_string());

    HashMap::from([
        ("pk".to_string(), AttributeValue::S(model::PARTITION_KEY.to_string())),
        ("timestamp".to_string(), AttributeValue::N(timestamp.to_string())),
        ("artist".to_string(), AttributeValue::S(artist.to_string())),
        ("title".to_string(), AttributeValue::S(title.to_string())),
        ("duration".to_string(), AttributeValue::N(duration.to_string())),
        ("ttl".to_string(), AttributeValue::N(ttl)),
    ])
}

/// Accept any `PutItem` call
pub fn put_item_succeeds() -> Rule {
    mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .then_output(|| PutItemOutput::builder().build())
}

/// Reject any `PutItem` call as throttled
pub fn put_item_throttled() -> Rule {
    mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
        PutItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder()
                .message("Rate of requests exceeds the allowed throughput")
                .build(),
        )
    })
}

/// Answer any `Query` call with the given rows
pub fn query_returns(items: Vec<HashMap<String, AttributeValue>>) -> Rule {
    mock!(aws_sdk_dynamodb::Client::query)
        .match_requests(|_| true)
        .then_output(move || QueryOutput::builder().set_items(Some(items.clone())).build())
}

/// A mock DynamoDB client answering with the given rules
pub fn create_mock_dynamodb_client(put_rule: &Rule, query_rule: &Rule) -> aws_sdk_dynamodb::Client {
    mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [put_rule, query_rule])
}

/// An API Gateway request with no headers or body
pub fn request(method: Method) -> Request {
    lambda_http::http::Request::builder()
        .method(method)
        .uri("/")
        .body(Body::Empty)
        .expect("Request should build")
}

/// A write request, optionally carrying an `apikey` header
pub fn post_request(api_key: Option<&str>, body: &str) -> Request {
    let mut builder = lambda_http::http::Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("content-type", "application/json");

    if let Some(api_key) = api_key {
        builder = builder.header("apikey", api_key);
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("Request should build")
}

/// The response body as text
pub fn body_text(response: &Response<Body>) -> String {
    String::from_utf8_lossy(response.body()).to_string()
}
