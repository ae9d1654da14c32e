/// Environment variable containing the DynamoDB table name
pub const TABLE_NAME: &str = "TABLE_NAME";
/// Environment variable containing the shared secret required for writes
pub const PLAYLIST_API_KEY: &str = "PLAYLIST_API_KEY";
