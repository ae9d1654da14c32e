use crate::response;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Response};
use store::StoreError;

/// Every way a request can fail, each mapped to one HTTP status.
///
/// The body of the error response is the `Display` text, which carries the
/// underlying message unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("Forbidden")]
    Auth,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    StoreWrite(StoreError),
    #[error("{0}")]
    StoreRead(StoreError),
    #[error("{0}")]
    Format(String),
    #[error("Method Not Allowed")]
    UnsupportedMethod(Method),
}

impl PlaylistError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlaylistError::Auth => StatusCode::FORBIDDEN,
            PlaylistError::Validation(_) | PlaylistError::StoreWrite(_) => StatusCode::BAD_REQUEST,
            PlaylistError::StoreRead(_) | PlaylistError::Format(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            PlaylistError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn into_response(self) -> Response<Body> {
        response::text(self.status_code(), self.to_string())
    }
}

impl From<serde_json::Error> for PlaylistError {
    fn from(err: serde_json::Error) -> Self {
        PlaylistError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::StoreErrorReason::BackendFailure;
    use store::StoreOperation;

    fn store_error(message: &str) -> StoreError {
        StoreError::new(
            "playlist".to_string(),
            StoreOperation::PutEntry,
            BackendFailure(message.to_string().into()),
        )
    }

    #[test]
    fn maps_each_failure_to_its_status() {
        let cases: Vec<(PlaylistError, StatusCode, &str)> = vec![
            (PlaylistError::Auth, StatusCode::FORBIDDEN, "Forbidden"),
            (
                PlaylistError::Validation("missing field `artist`".to_string()),
                StatusCode::BAD_REQUEST,
                "missing field `artist`",
            ),
            (
                PlaylistError::StoreWrite(store_error("throttled")),
                StatusCode::BAD_REQUEST,
                "throttled",
            ),
            (
                PlaylistError::StoreRead(store_error("timed out")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "timed out",
            ),
            (
                PlaylistError::UnsupportedMethod(Method::DELETE),
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed",
            ),
        ];

        for (err, status, body) in cases {
            let response: Response<Body> = err.into_response();

            assert_eq!(status, response.status());
            assert_eq!(body, String::from_utf8_lossy(response.body()));
        }
    }
}
