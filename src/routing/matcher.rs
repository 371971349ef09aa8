//! Route matching module
//!
//! Maps a request path onto the fixed climate route table. Literal routes
//! win over the date patterns, so `/api/v1.0/stations` is never read as a
//! start date.

use crate::config::HealthConfig;

/// Prefix shared by every data route
pub const API_PREFIX: &str = "/api/v1.0/";

/// A matched route; date segments are kept raw and validated by the handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    Home,
    Liveness,
    Readiness,
    Precipitation,
    Stations,
    Tobs,
    From { start: &'a str },
    Between { start: &'a str, end: &'a str },
    NotFound,
}

/// Find the route for a given path
pub fn match_route<'a>(path: &'a str, health: &HealthConfig) -> ApiRoute<'a> {
    if path == "/" {
        return ApiRoute::Home;
    }

    if health.enabled {
        if path == health.liveness_path {
            return ApiRoute::Liveness;
        }
        if path == health.readiness_path {
            return ApiRoute::Readiness;
        }
    }

    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return ApiRoute::NotFound;
    };

    match rest {
        "precipitation" => return ApiRoute::Precipitation,
        "stations" => return ApiRoute::Stations,
        "tobs" => return ApiRoute::Tobs,
        _ => {}
    }

    match_date_segments(rest)
}

/// Match `<start>` or `<start>/<end>`; empty segments never match
fn match_date_segments(rest: &str) -> ApiRoute<'_> {
    let mut segments = rest.split('/');
    let first = segments.next().filter(|s| !s.is_empty());
    let second = segments.next();

    match (first, second, segments.next()) {
        (Some(start), None, None) => ApiRoute::From { start },
        (Some(start), Some(end), None) if !end.is_empty() => ApiRoute::Between { start, end },
        _ => ApiRoute::NotFound,
    }
}
