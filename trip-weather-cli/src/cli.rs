use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use trip_weather_core::{
    Config, TripWeatherPrediction, WeatherPredictor,
    provider::weatherstack::WeatherstackProvider,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "trip-weather", version, about = "Historical-weather trip predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the Weatherstack API key.
    Configure,

    /// Predict trip weather from multi-year historical observations.
    Predict {
        /// Destination, e.g. "Paris" or "New York".
        location: String,

        /// Trip start date (YYYY-MM-DD).
        #[arg(long)]
        start: String,

        /// Trip end date (YYYY-MM-DD); if absent, a single-day trip.
        #[arg(long)]
        end: Option<String>,

        /// Earliest historical year to sample; overrides the configured value.
        #[arg(long)]
        from_year: Option<i32>,

        /// Print the prediction as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Predict { location, start, end, from_year, json } => {
                let start = parse_date(&start)?;
                let end = end.as_deref().map(parse_date).transpose()?;

                let mut config = Config::load()?;
                if let Some(year) = from_year {
                    config.first_year = year;
                }

                let provider = WeatherstackProvider::new(config.require_api_key()?.to_owned());
                let window = config.window(Utc::now().year());
                let predictor = WeatherPredictor::new(provider, window);

                let prediction = predictor.predict_trip_weather(&location, start, end).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&prediction)?);
                } else {
                    print_summary(&location, &prediction);
                }

                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Weatherstack API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = Some(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

fn print_summary(location: &str, prediction: &TripWeatherPrediction) {
    println!("Prediction for {location}, {} to {}", prediction.trip_start, prediction.trip_end);
    println!("  Temperature: {:.1}°C to {:.1}°C", prediction.predicted_min_temp, prediction.predicted_max_temp);
    println!("  UV index:    {:.1}", prediction.predicted_uv_index);
    println!("  Conditions:  {}", prediction.predicted_description);
    println!("  Confidence:  {:.2}", prediction.confidence_score);
    println!(
        "  Based on {} historical year(s) across {} trip day(s)",
        prediction.years_analyzed.len(),
        prediction.days_analyzed
    );
}
