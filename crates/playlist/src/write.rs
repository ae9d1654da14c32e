use crate::clock::Clock;
use crate::config::ApiKey;
use crate::error::PlaylistError;
use crate::response;
use lambda_http::http::{HeaderMap, StatusCode};
use lambda_http::tracing;
use lambda_http::{Body, Request, Response};
use model::PlaylistEntry;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt::Formatter;
use store::PlaylistStore;

pub const API_KEY_HEADER: &str = "apikey";
pub const ITEM_ADDED: &str = "Item added successfully";

/// Body of a write request.
#[derive(Debug, Deserialize)]
struct AppendRequest {
    artist: String,
    title: String,
    #[serde(deserialize_with = "deserialize_duration")]
    duration: u64,
}

/// Accepts integers, floats truncated toward zero, and strings holding an integer.
struct DurationVisitor;

impl DurationVisitor {
    fn non_negative<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("a non-negative integer duration in seconds")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        self.non_negative(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
        let truncated: f64 = value.trunc();

        if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            return Err(E::invalid_value(de::Unexpected::Float(value), &self));
        }

        self.non_negative(truncated as i64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        match value.trim().parse::<i64>() {
            Ok(parsed) => self.non_negative(parsed),
            Err(_) => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
        }
    }
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(DurationVisitor)
}

impl AppendRequest {
    fn parse(body: &[u8]) -> Result<Self, PlaylistError> {
        let request: AppendRequest = serde_json::from_slice(body)?;

        if request.artist.is_empty() {
            return Err(PlaylistError::Validation("artist must not be empty".to_string()));
        }
        if request.title.is_empty() {
            return Err(PlaylistError::Validation("title must not be empty".to_string()));
        }

        Ok(request)
    }
}

fn authorize(api_key: &ApiKey, headers: &HeaderMap) -> Result<(), PlaylistError> {
    let candidate: Option<&str> = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match candidate {
        Some(candidate) if api_key.matches(candidate) => Ok(()),
        _ => Err(PlaylistError::Auth),
    }
}

/// Authorize, validate and store one entry timestamped by `clock`.
pub(crate) async fn append(
    store: &dyn PlaylistStore,
    api_key: &ApiKey,
    clock: &dyn Clock,
    event: &Request,
) -> Result<Response<Body>, PlaylistError> {
    authorize(api_key, event.headers())?;

    let request: AppendRequest = AppendRequest::parse(event.body())?;
    let entry: PlaylistEntry = PlaylistEntry::new(
        clock.now().timestamp(),
        request.artist,
        request.title,
        request.duration,
    );

    tracing::info!(
        artist = %entry.artist,
        title = %entry.title,
        timestamp = entry.timestamp,
        "Adding entry"
    );

    store
        .put_entry(entry)
        .await
        .map_err(PlaylistError::StoreWrite)?;

    Ok(response::text(StatusCode::OK, ITEM_ADDED))
}
