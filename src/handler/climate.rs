//! Climate data handlers
//!
//! One store query per request; rows are serialized to JSON as-is. Date
//! segments that fail to parse get a plain-text usage message with status
//! 200 rather than an error status.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::dates;
use crate::http;
use crate::logger;
use crate::store::{ClimateStore, StoreResult};

pub const HOME_PAGE: &str = concat!(
    "Welcome to the Hawaii Climate App!<br/>",
    "----------------------------------<br/>",
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/start_date<br/>",
    "/api/v1.0/start_date/end_date<br/>",
    "<br>",
    "Note: Replace 'start_date' and 'end_date' with your query dates. ",
    "Format for querying is 'YYYY-MM-DD'",
);

pub const START_USAGE: &str = "Please enter a start date in the format 'YYYY-MM-DD'";

pub const RANGE_USAGE: &str = "Please enter dates in the following order and format: \
'start_date/end_date' i.e. 'YYYY-MM-DD'/'YYYY-MM-DD'";

pub fn home(is_head: bool) -> Response<Full<Bytes>> {
    logger::log_route("home page");
    http::build_html_response(HOME_PAGE, is_head)
}

pub async fn precipitation(store: &ClimateStore, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_route("precipitation page");
    respond(store.precipitation().await, "precipitation", is_head)
}

pub async fn stations(store: &ClimateStore, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_route("station data");
    respond(store.stations().await, "stations", is_head)
}

pub async fn tobs(store: &ClimateStore, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_route("temperature observation data");
    respond(store.most_active_tobs().await, "tobs", is_head)
}

/// Daily normals for every date on or after `start`
pub async fn normals_from(store: &ClimateStore, start: &str, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_route(&format!("daily normals from {start}"));

    let Some(start) = dates::normalize(start) else {
        return http::build_text_response(StatusCode::OK, START_USAGE, is_head);
    };
    respond(store.daily_normals(start, None).await, "daily normals", is_head)
}

/// Daily normals for `start <= date <= end`; an inverted range is simply empty
pub async fn normals_between(
    store: &ClimateStore,
    start: &str,
    end: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    logger::log_route(&format!("daily normals from {start} to {end}"));

    let (Some(start), Some(end)) = (dates::normalize(start), dates::normalize(end)) else {
        return http::build_text_response(StatusCode::OK, RANGE_USAGE, is_head);
    };
    respond(
        store.daily_normals(start, Some(end)).await,
        "daily normals",
        is_head,
    )
}

fn respond<T: Serialize>(
    result: StoreResult<T>,
    resource: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match result {
        Ok(rows) => http::build_json_response(StatusCode::OK, &rows, is_head),
        Err(e) => {
            logger::log_store_error(resource, &e);
            http::build_500_response(is_head)
        }
    }
}
