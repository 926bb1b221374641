//! Aggregation, confidence scoring, and the trip prediction facade.

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    config::HistoricalWindow,
    dates::{expand_historical_years, expand_trip_range},
    error::PredictError,
    model::{HistoricalSample, TripWeatherPrediction},
    provider::{DayHistory, HistoryProvider},
};

/// Stateless predictor over an injected historical data source.
///
/// Every invocation fetches fresh samples and computes from scratch; nothing
/// is shared between calls.
#[derive(Debug)]
pub struct WeatherPredictor<P: HistoryProvider> {
    provider: P,
    window: HistoricalWindow,
}

impl<P: HistoryProvider> WeatherPredictor<P> {
    pub fn new(provider: P, window: HistoricalWindow) -> Self {
        Self { provider, window }
    }

    /// Predict weather for a trip span ending at `end` (or a single-day trip
    /// when `end` is `None`).
    ///
    /// Pools historical samples across every trip date and every year in the
    /// configured window, then aggregates. A fetch failure for one day's
    /// batch only removes that day's samples from the pool; the prediction
    /// fails only if the pool ends up empty.
    ///
    /// # Errors
    ///
    /// [`PredictError::NoHistoricalData`] when no trip date yielded samples.
    pub async fn predict_trip_weather(
        &self,
        location: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TripWeatherPrediction, PredictError> {
        let trip_dates = match end {
            None => vec![start],
            Some(end) => expand_trip_range(start, end),
        };

        // Per-day fetches run concurrently; join_all yields batches in
        // trip-date order, which keeps the description tie-break stable.
        let batches =
            join_all(trip_dates.iter().map(|date| self.collect_samples(location, *date))).await;
        let samples: Vec<HistoricalSample> = batches.into_iter().flatten().collect();

        if samples.is_empty() {
            return Err(PredictError::NoHistoricalData);
        }

        // Non-empty pool, so the means are all present.
        let (min_estimate, max_estimate) =
            predict_temperatures(&samples).ok_or(PredictError::NoHistoricalData)?;
        let uv_estimate = predict_uv(&samples).ok_or(PredictError::NoHistoricalData)?;

        let mut years: Vec<i32> = samples.iter().map(HistoricalSample::year).collect();
        years.sort_unstable();
        years.dedup();

        Ok(TripWeatherPrediction {
            trip_start: start,
            trip_end: end.unwrap_or(start),
            predicted_min_temp: round_to(min_estimate, 1),
            predicted_max_temp: round_to(max_estimate, 1),
            predicted_uv_index: round_to(uv_estimate, 1),
            predicted_description: predict_description(&samples),
            confidence_score: confidence_score(&samples),
            years_analyzed: years,
            days_analyzed: trip_dates.len(),
        })
    }

    /// One batched fetch for `target`'s counterparts across the historical
    /// window, converted into samples. Recovers from fetch failures by
    /// returning no samples for this day.
    async fn collect_samples(&self, location: &str, target: NaiveDate) -> Vec<HistoricalSample> {
        let historical_dates = expand_historical_years(target, self.window.years());
        if historical_dates.is_empty() {
            return Vec::new();
        }

        let history = match self.provider.fetch_history(location, &historical_dates).await {
            Ok(history) => history,
            Err(error) => {
                warn!(%location, date = %target, %error,
                    "historical fetch failed; day contributes no samples");
                return Vec::new();
            }
        };

        historical_dates
            .into_iter()
            .filter_map(|date| {
                let day = history.get(&date)?;
                let sample = build_sample(date, day);
                if sample.is_none() {
                    debug!(%date, "skipping malformed historical record");
                }
                sample
            })
            .collect()
    }
}

/// A record missing any numeric field is malformed and yields no sample.
fn build_sample(date: NaiveDate, day: &DayHistory) -> Option<HistoricalSample> {
    Some(HistoricalSample {
        date,
        min_temp: day.min_temp?,
        max_temp: day.max_temp?,
        avg_temp: day.avg_temp?,
        uv_index: day.uv_index?,
        descriptions: day
            .hourly
            .iter()
            .filter_map(|hour| hour.weather_descriptions.first().cloned())
            .collect(),
    })
}

/// Mean min and max temperature across the pool; `None` on an empty pool.
pub fn predict_temperatures(samples: &[HistoricalSample]) -> Option<(f64, f64)> {
    let min = mean(samples.iter().map(|s| s.min_temp))?;
    let max = mean(samples.iter().map(|s| s.max_temp))?;
    Some((min, max))
}

/// Mean UV index across the pool; `None` on an empty pool.
pub fn predict_uv(samples: &[HistoricalSample]) -> Option<f64> {
    mean(samples.iter().map(|s| s.uv_index))
}

/// Most frequent condition string across every sample's hourly descriptions.
///
/// Ties break to the first-encountered string in pool order, which the
/// facade pins to ascending trip date then ascending year. An empty
/// description multiset yields the sentinel value.
pub fn predict_description(samples: &[HistoricalSample]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for description in samples.iter().flat_map(|s| s.descriptions.iter()) {
        match counts.iter_mut().find(|(seen, _)| *seen == description.as_str()) {
            Some(entry) => entry.1 += 1,
            None => counts.push((description, 1)),
        }
    }

    counts
        .iter()
        // `>` keeps the earliest entry on ties.
        .fold(None::<(&str, usize)>, |best, &(s, n)| match best {
            Some((_, best_n)) if n <= best_n => best,
            _ => Some((s, n)),
        })
        .map(|(s, _)| s.to_string())
        .unwrap_or_else(|| "No prediction available".to_string())
}

/// Confidence in [0,1] from the dispersion of average temperatures.
///
/// σ is the sample standard deviation of `avg_temp` (0 with fewer than two
/// samples); the score is `1 / (1 + σ/10)`, rounded to 2 decimals. The /10
/// divisor calibrates °C dispersion into a bounded damping factor.
pub fn confidence_score(samples: &[HistoricalSample]) -> f64 {
    let sigma = sample_stddev(&samples.iter().map(|s| s.avg_temp).collect::<Vec<_>>());
    round_to(1.0 / (1.0 + sigma / 10.0), 2)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
