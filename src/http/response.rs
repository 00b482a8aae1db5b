//! HTTP response building module
//!
//! Provides builders for the JSON and file responses the API emits,
//! decoupled from the handlers that produce them.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::{self, CachePolicy};
use super::cors;

/// Response type produced by every handler
pub type HttpResponse = Response<Full<Bytes>>;

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!("Failed to serialize response: {e}");
            return build_raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"Internal server error"}"#,
            );
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON response from an already serialized body
fn build_raw_json(status: StatusCode, body: &'static str) -> HttpResponse {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from_static(body.as_bytes())))
        })
}

/// A file ready to be sent to the client
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub content: Bytes,
    pub content_type: &'static str,
    pub cache: CachePolicy,
    /// `Content-Disposition` value, if the file is sent as a download
    pub disposition: Option<String>,
}

/// Build a file response with `ETag` and Cache-Control
pub fn build_file_response(file: FilePayload, if_none_match: Option<&str>) -> HttpResponse {
    let etag = cache::generate_etag(&file.content);
    let cache_control = file.cache.to_header_value();

    if cache::check_etag_match(if_none_match, &etag) {
        return build_304_response(&etag, &cache_control);
    }

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", file.content_type)
        .header("Content-Length", file.content.len())
        .header("ETag", &etag)
        .header("Cache-Control", &cache_control);

    if let Some(disposition) = &file.disposition {
        builder = builder.header("Content-Disposition", disposition);
    }

    builder.body(Full::new(file.content)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header("Allow", cors::ALLOWED_METHODS)
        .header("Access-Control-Allow-Methods", cors::ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", cors::ALLOWED_HEADERS)
        .header("Access-Control-Max-Age", cors::MAX_AGE_SECS)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!("Failed to build {status} response: {error}");
}
