//! Liveness and readiness probes

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http;
use crate::logger;
use crate::store::ClimateStore;

pub fn liveness(is_head: bool) -> Response<Full<Bytes>> {
    http::build_health_response(StatusCode::OK, "ok", is_head)
}

/// Ready when a read-only connection to the database answers
pub async fn readiness(store: &ClimateStore, is_head: bool) -> Response<Full<Bytes>> {
    match store.ping().await {
        Ok(()) => http::build_health_response(StatusCode::OK, "ok", is_head),
        Err(e) => {
            logger::log_warning(&format!("Readiness check failed: {e}"));
            http::build_health_response(StatusCode::SERVICE_UNAVAILABLE, "unavailable", is_head)
        }
    }
}
