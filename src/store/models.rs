//! Row types returned by the store, shaped as they appear in responses.

use serde::Serialize;
use std::collections::BTreeMap;

/// Precipitation keyed by observation date; a later row for the same date wins
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// A weather station as listed by `/api/v1.0/stations`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: Option<String>,
    pub name: Option<String>,
}

/// One `(date, tobs)` pair, serialized as a two-element array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsReading(pub String, pub Option<f64>);

/// Per-date temperature aggregate across all stations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNormal {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "T-Min")]
    pub t_min: Option<f64>,
    #[serde(rename = "T-Avg")]
    pub t_avg: Option<f64>,
    #[serde(rename = "T-Max")]
    pub t_max: Option<f64>,
}
