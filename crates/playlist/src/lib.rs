use crate::clock::{Clock, SystemClock};
use crate::config::ApiKey;
use crate::error::PlaylistError;
use crate::router::RequestKind;
use lambda_http::tracing::{Instrument, Span};
use lambda_http::{tracing, Body, Error, Request, Response};
use std::sync::Arc;
use store::PlaylistStore;

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
mod read;
mod response;
pub mod router;
mod write;

pub use write::{API_KEY_HEADER, ITEM_ADDED};

/// The playlist log function, built once per cold start and shared by every invocation.
///
/// ```ignore
/// use lambda_http::{run, service_fn, Error, Request};
/// use playlist::PlaylistFunction;
/// use playlist::config::PlaylistConfig;
/// use store_in_memory::InMemoryPlaylistStore;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let config: PlaylistConfig = PlaylistConfig::from_env()?;
///     let function: PlaylistFunction =
///         PlaylistFunction::new(Arc::new(InMemoryPlaylistStore::default()), config.api_key);
///
///     run(service_fn(|event: Request| function.handle(event))).await
/// }
/// ```
#[derive(Clone)]
pub struct PlaylistFunction {
    store: Arc<dyn PlaylistStore>,
    api_key: ApiKey,
    clock: Arc<dyn Clock>,
}

impl PlaylistFunction {
    pub fn new(store: Arc<dyn PlaylistStore>, api_key: ApiKey) -> Self {
        PlaylistFunction {
            store,
            api_key,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to timestamp new entries.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handle one request. Failures become error responses, so this only
    /// returns `Err` if the runtime itself cannot continue.
    pub async fn handle(&self, event: Request) -> Result<Response<Body>, Error> {
        let kind: RequestKind = RequestKind::from(event.method());
        let request_span: Span = tracing::span!(tracing::Level::INFO, "Playlist", kind = %kind);

        let result: Result<Response<Body>, PlaylistError> =
            self.dispatch(kind, &event).instrument(request_span).await;

        Ok(result.unwrap_or_else(|err| {
            if err.status_code().is_server_error() {
                tracing::error!(error = %err, "Request failed");
            } else {
                tracing::warn!(error = %err, "Request rejected");
            }

            err.into_response()
        }))
    }

    async fn dispatch(
        &self,
        kind: RequestKind,
        event: &Request,
    ) -> Result<Response<Body>, PlaylistError> {
        match kind {
            RequestKind::Append => {
                write::append(
                    self.store.as_ref(),
                    &self.api_key,
                    self.clock.as_ref(),
                    event,
                )
                .await
            }
            RequestKind::Recent => read::recent(self.store.as_ref()).await,
            RequestKind::Unsupported(method) => Err(PlaylistError::UnsupportedMethod(method)),
        }
    }
}
