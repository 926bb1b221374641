use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::provider::{DayHistory, HourlyObservation};

use super::HistoryProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherstack.com/historical";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Historical weather source backed by the Weatherstack `/historical` endpoint.
///
/// All requested dates go out in a single request, semicolon-joined in the
/// `historical_date` parameter, with hourly records enabled.
#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherstackProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, location: &str, dates: &[NaiveDate]) -> Result<WsHistoricalResponse> {
        let joined = dates
            .iter()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect::<Vec<_>>()
            .join(";");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("query", location),
                ("historical_date", joined.as_str()),
                ("hourly", "1"),
            ])
            .send()
            .await
            .context("Failed to send request to Weatherstack (historical)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Weatherstack historical response body")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Weatherstack historical request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WsHistoricalResponse =
            serde_json::from_str(&body).context("Failed to parse Weatherstack historical JSON")?;

        // Weatherstack reports API-level failures with a 200 status and an
        // error envelope in the body.
        if parsed.success == Some(false) {
            let info = parsed
                .error
                .as_ref()
                .map(|e| format!("code {}: {}", e.code, e.info))
                .unwrap_or_else(|| "no error details".to_string());
            return Err(anyhow::anyhow!("Weatherstack historical request rejected: {info}"));
        }

        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct WsError {
    code: i64,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct WsHour {
    weather_descriptions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WsDay {
    mintemp: Option<f64>,
    maxtemp: Option<f64>,
    avgtemp: Option<f64>,
    uv_index: Option<f64>,
    #[serde(default)]
    hourly: Vec<WsHour>,
}

#[derive(Debug, Deserialize)]
struct WsHistoricalResponse {
    success: Option<bool>,
    error: Option<WsError>,
    #[serde(default)]
    historical: HashMap<String, WsDay>,
}

impl From<WsDay> for DayHistory {
    fn from(day: WsDay) -> Self {
        DayHistory {
            min_temp: day.mintemp,
            max_temp: day.maxtemp,
            avg_temp: day.avgtemp,
            uv_index: day.uv_index,
            hourly: day
                .hourly
                .into_iter()
                .map(|hour| HourlyObservation {
                    weather_descriptions: hour.weather_descriptions.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl HistoryProvider for WeatherstackProvider {
    async fn fetch_history(
        &self,
        location: &str,
        dates: &[NaiveDate],
    ) -> Result<HashMap<NaiveDate, DayHistory>> {
        let parsed = self.fetch(location, dates).await?;

        let mut history = HashMap::with_capacity(parsed.historical.len());
        for (key, day) in parsed.historical {
            // Keys the API returns outside the requested format are dropped;
            // the predictor treats the date as having no data.
            let Ok(date) = NaiveDate::parse_from_str(&key, DATE_FORMAT) else {
                tracing::debug!(%key, "skipping unparseable historical date key");
                continue;
            };
            history.insert(date, DayHistory::from(day));
        }

        Ok(history)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
