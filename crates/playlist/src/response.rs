use lambda_http::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use lambda_http::http::{HeaderValue, StatusCode};
use lambda_http::{Body, Response};

pub(crate) fn text(status: StatusCode, body: impl Into<String>) -> Response<Body> {
    let mut response: Response<Body> = Response::new(Body::from(body.into()));
    *response.status_mut() = status;
    response
}

/// A 200 response readable from any origin.
pub(crate) fn json(body: String) -> Response<Body> {
    let mut response: Response<Body> = text(StatusCode::OK, body);
    let headers = response.headers_mut();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    response
}
