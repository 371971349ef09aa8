//! HTTP response building module
//!
//! Provides builders for the responses the climate routes produce,
//! decoupled from the routes themselves.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";
const HTML: &str = "text/html; charset=utf-8";

/// Build a response with an explicit `Content-Length`; HEAD keeps the
/// length but drops the body
fn build_body_response(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec_pretty(body) {
        Ok(json) => build_body_response(status, JSON, Bytes::from(json), is_head),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_500_response(is_head)
        }
    }
}

/// Build plain-text response
pub fn build_text_response(
    status: StatusCode,
    text: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    build_body_response(status, TEXT, Bytes::from_static(text.as_bytes()), is_head)
}

/// Build generic HTML response
pub fn build_html_response(content: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(
        StatusCode::OK,
        HTML,
        Bytes::from_static(content.as_bytes()),
        is_head,
    )
}

/// Build health probe response, e.g. `{"status":"ok"}`
pub fn build_health_response(status: StatusCode, state: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(status, &serde_json::json!({ "status": state }), is_head)
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found", is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut response =
        build_text_response(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed", false);
    response
        .headers_mut()
        .insert("Allow", HeaderValue::from_static("GET, HEAD, OPTIONS"));
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large", false)
}

/// Build 500 response with a generic JSON body
pub fn build_500_response(is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        JSON,
        Bytes::from_static(br#"{"error":"Internal server error"}"#),
        is_head,
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Stamp the headers every response carries
pub fn apply_common_headers(
    response: &mut Response<Full<Bytes>>,
    server_name: &str,
    enable_cors: bool,
) {
    let headers = response.headers_mut();
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            headers.insert(SERVER, value);
        }
        Err(e) => log_build_error("Server header", &e),
    }
    if enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

/// Log response build error
fn log_build_error(what: &str, error: &impl std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
}
