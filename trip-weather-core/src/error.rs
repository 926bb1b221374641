use thiserror::Error;

/// Errors surfaced by [`crate::WeatherPredictor`].
///
/// Per-day fetch failures and individual malformed records are recovered
/// inside the pipeline (they shrink the sample pool instead of propagating),
/// so the only fatal outcome is an empty pool.
#[derive(Debug, Error)]
pub enum PredictError {
    /// No historical samples could be collected for any trip date.
    /// Callers must treat this as a hard failure, never default the numbers.
    #[error("no historical data available for prediction")]
    NoHistoricalData,
}
