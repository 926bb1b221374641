//! Core library for the trip weather predictor.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over historical weather data sources
//! - Date expansion across trip spans and past years
//! - Aggregation and confidence scoring over historical samples
//!
//! It is used by `trip-weather-cli`, but can also be reused by other binaries or services
//! (e.g. a trip-management backend persisting predictions at trip creation).

pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod predictor;
pub mod provider;

pub use config::{Config, HistoricalWindow};
pub use error::PredictError;
pub use model::{HistoricalSample, TripWeatherPrediction};
pub use predictor::WeatherPredictor;
pub use provider::{DayHistory, HistoryProvider, HourlyObservation};
