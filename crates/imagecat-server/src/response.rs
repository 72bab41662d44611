//! Response builders shared by all handlers
//!
//! JSON endpoints go through [`json`] / [`json_error`] and get their CORS
//! headers from [`apply_cors`] in the router, so no handler sets them itself.

use crate::error::ApiError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use imagecat::DEFAULT_CONTENT_TYPE;
use serde::Serialize;
use serde_json::json;

/// Body type of every response
pub type Body = Full<Bytes>;

/// Cache policy for served image files
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600";

fn with_body(status: StatusCode, content_type: HeaderValue, body: impl Into<Bytes>) -> Response<Body> {
    let mut resp = Response::new(Full::new(body.into()));
    *resp.status_mut() = status;
    resp.headers_mut().insert(header::CONTENT_TYPE, content_type);
    resp
}

/// Serialize `value` as the JSON body
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Response<Body>, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok(with_body(
        status,
        HeaderValue::from_static("application/json"),
        body,
    ))
}

/// `{"error": msg}` envelope for JSON endpoints
pub fn json_error(err: &ApiError) -> Response<Body> {
    let body = json!({ "error": err.public_message() }).to_string();
    with_body(
        err.status(),
        HeaderValue::from_static("application/json"),
        body,
    )
}

/// Plain text body, used by the file-serving endpoints
pub fn text(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    with_body(
        status,
        HeaderValue::from_static("text/plain; charset=utf-8"),
        message.into(),
    )
}

pub fn text_error(err: &ApiError) -> Response<Body> {
    text(err.status(), err.public_message())
}

/// Raw file contents
pub fn file(content_type: &str, bytes: Vec<u8>) -> Response<Body> {
    let content_type = HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    with_body(StatusCode::OK, content_type, bytes)
}

pub fn empty(status: StatusCode) -> Response<Body> {
    let mut resp = Response::new(Full::new(Bytes::new()));
    *resp.status_mut() = status;
    resp
}

pub fn redirect(location: &'static str) -> Response<Body> {
    let mut resp = empty(StatusCode::FOUND);
    resp.headers_mut()
        .insert(header::LOCATION, HeaderValue::from_static(location));
    resp
}

/// Allow any origin to `GET` the JSON API
pub fn apply_cors(resp: &mut Response<Body>) {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_envelope() {
        let resp = json_error(&ApiError::NotFound("Image not found: x.png".into()));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("application/json")
        );
    }

    #[test]
    fn test_cors_headers() {
        let mut resp = empty(StatusCode::NO_CONTENT);
        apply_cors(&mut resp);
        let h = resp.headers();
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[test]
    fn test_file_falls_back_on_bad_content_type() {
        let resp = file("bad\nvalue", vec![1, 2, 3]);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_redirect() {
        let resp = redirect("/static/index.html");
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/static/index.html");
    }
}
