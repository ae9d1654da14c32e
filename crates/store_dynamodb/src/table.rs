/// Table layout for the playlist log.
///
/// `pk` is the partition key and `timestamp` the numeric sort key.
/// `ttl` must be configured as the table's time-to-live attribute.
pub const PARTITION_KEY: &str = "pk";
pub const SORT_KEY: &str = "timestamp";
pub const TIME_TO_LIVE: &str = "ttl";

pub(crate) const PARTITION_KEY_NAME: &str = "#pk";
pub(crate) const PARTITION_KEY_VALUE: &str = ":pk";

pub(crate) fn key_condition() -> String {
    format!("{PARTITION_KEY_NAME} = {PARTITION_KEY_VALUE}")
}
