//! Non-interactive subcommands. These print plain text and exit.

use crate::config::Config;
use crate::error::SkycastError;
use crate::logic::{WeatherReport, WeatherService};
use crate::ui::text;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub fn init() -> Result<()> {
    let (_, path) = Config::setup_interactive().context("Setup did not complete")?;
    tracing::info!(path = %path.display(), "Configuration written");
    Ok(())
}

pub async fn check(service: &WeatherService, config_path: Option<&PathBuf>) -> Result<()> {
    let config = service.config();
    println!(
        "Config:         {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "default locations / environment".to_string())
    );
    println!("Units:          {}", config.openweathermap.units.as_query());
    println!("Default city:   {}", config.default_city);
    println!("Startup city:   {}", service.initial_city());

    let status = service.check_connection().await;
    println!("OpenWeatherMap: {}", ok_or_failed(status.openweathermap));
    println!("Database:       {}", ok_or_failed(status.database));

    if !(status.openweathermap && status.database) {
        bail!("One or more checks failed");
    }
    Ok(())
}

fn ok_or_failed(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "FAILED"
    }
}

pub async fn today(service: &WeatherService, city: Option<&str>) -> Result<()> {
    let report = fetch(service, city).await?;
    let current = report
        .current
        .ok_or_else(|| unavailable("current conditions"))?;
    let config = service.config();
    print!(
        "{}",
        text::current_text(&current, config.openweathermap.units, config.day_boundary)
    );
    Ok(())
}

pub async fn forecast(service: &WeatherService, city: Option<&str>) -> Result<()> {
    let report = fetch(service, city).await?;
    let forecast = report.forecast.ok_or_else(|| unavailable("forecast"))?;
    print!(
        "{}",
        text::forecast_text(&forecast, service.config().openweathermap.units)
    );
    Ok(())
}

/// A city given on the command line counts as a search; otherwise use the startup city
async fn fetch(service: &WeatherService, city: Option<&str>) -> Result<WeatherReport> {
    let result = match city {
        Some(input) => service.search(input).await,
        None => service.load(&service.initial_city()).await,
    };
    result.map_err(with_user_message)
}

fn unavailable(part: &str) -> anyhow::Error {
    with_user_message(SkycastError::DataSourceUnavailable(format!(
        "{} request failed",
        part
    )))
}

fn with_user_message(err: SkycastError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}
