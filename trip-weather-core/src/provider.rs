use async_trait::async_trait;
use chrono::NaiveDate;
use std::{collections::HashMap, fmt::Debug};

pub mod weatherstack;

/// Raw hourly record inside a [`DayHistory`].
///
/// `weather_descriptions` may be empty; the predictor takes the first entry
/// per hour and skips hours without one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyObservation {
    pub weather_descriptions: Vec<String>,
}

/// Raw per-date observation as returned by a historical data source.
///
/// Numeric fields are optional because upstream payloads occasionally omit
/// them; a record missing any of them is dropped during sample construction
/// rather than failing the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayHistory {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub uv_index: Option<f64>,
    pub hourly: Vec<HourlyObservation>,
}

/// Capability to fetch historical observations for a location.
///
/// One batched call per (location, date-set) pair — implementations must not
/// be called once per date, and the predictor never does. A date absent from
/// the returned map means "no data for that date", not an error. Retry
/// policy, if any, belongs to the implementation, not the predictor.
#[async_trait]
pub trait HistoryProvider: Send + Sync + Debug {
    async fn fetch_history(
        &self,
        location: &str,
        dates: &[NaiveDate],
    ) -> anyhow::Result<HashMap<NaiveDate, DayHistory>>;
}
