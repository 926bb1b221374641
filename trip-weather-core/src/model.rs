use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar date's observed weather in a past year.
///
/// Samples are built from provider responses and pooled across every
/// (trip date, historical year) pair before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSample {
    pub date: NaiveDate,
    /// Daily minimum temperature, °C.
    pub min_temp: f64,
    /// Daily maximum temperature, °C.
    pub max_temp: f64,
    /// Daily average temperature, °C.
    pub avg_temp: f64,
    pub uv_index: f64,
    /// First reported condition string per observed hour, in hour order.
    /// May be empty; the sample still counts toward temperature/UV averages.
    pub descriptions: Vec<String>,
}

impl HistoricalSample {
    /// The historical year this sample was observed in.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Consolidated prediction for a trip span, ready for persistence by the caller.
///
/// Numeric estimates are pre-rounded: temperatures and UV to 1 decimal,
/// confidence to 2. Never constructed with missing numeric fields; an empty
/// sample pool fails the prediction instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripWeatherPrediction {
    pub trip_start: NaiveDate,
    /// Equal to `trip_start` for a single-day trip.
    pub trip_end: NaiveDate,
    pub predicted_min_temp: f64,
    pub predicted_max_temp: f64,
    pub predicted_uv_index: f64,
    /// Modal condition string, or "No prediction available" if no hourly
    /// descriptions were observed at all.
    pub predicted_description: String,
    /// In [0,1]; 1.0 when historical average temperatures agree exactly.
    pub confidence_score: f64,
    /// Distinct years that contributed samples, ascending.
    pub years_analyzed: Vec<i32>,
    /// Number of trip dates attempted, whether or not they yielded data.
    pub days_analyzed: usize,
}
