//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, dispatching and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request, Response};

use crate::config::AppState;
use crate::handler::{climate, health};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{match_route, ApiRoute};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // Routes never read a body
    let (parts, _) = req.into_parts();
    let entry = state
        .access_log_enabled()
        .then(|| access_entry(&parts, peer_addr));

    let http_config = &state.config.http;
    let is_head = parts.method == Method::HEAD;

    // 1. Check HTTP method, 2. check body size, 3. dispatch
    let mut response = if let Some(resp) = check_http_method(&parts.method, http_config.enable_cors)
    {
        resp
    } else if let Some(resp) = check_body_size(&parts.headers, http_config.max_body_size) {
        resp
    } else {
        dispatch(parts.uri.path(), &state, is_head).await
    };

    http::apply_common_headers(&mut response, &http_config.server_name, http_config.enable_cors);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a path to its handler
pub async fn dispatch(path: &str, state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let store = &state.store;

    match match_route(path, &state.config.health) {
        ApiRoute::Home => climate::home(is_head),
        ApiRoute::Liveness => health::liveness(is_head),
        ApiRoute::Readiness => health::readiness(store, is_head).await,
        ApiRoute::Precipitation => climate::precipitation(store, is_head).await,
        ApiRoute::Stations => climate::stations(store, is_head).await,
        ApiRoute::Tobs => climate::tobs(store, is_head).await,
        ApiRoute::From { start } => climate::normals_from(store, start, is_head).await,
        ApiRoute::Between { start, end } => {
            climate::normals_between(store, start, end, is_head).await
        }
        ApiRoute::NotFound => http::build_404_response(is_head),
    }
}

/// Capture the request side of an access log line
fn access_entry(parts: &Parts, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
