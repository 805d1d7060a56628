//! Plain-text rendering shared by the TUI widgets and the `today` / `forecast` commands.

use crate::logic::calculations::round_half_up;
use crate::models::{Backdrop, CurrentConditions, DailySummary, DayBoundary, Units, WeatherForecast};
use std::fmt::Write;

/// Whole-number display; NaN is shown as-is rather than hidden
pub fn whole(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.0}", round_half_up(value))
    }
}

/// "65°"
pub fn degrees(value: f64) -> String {
    format!("{}°", whole(value))
}

/// "65°F"
pub fn temperature(value: f64, units: Units) -> String {
    format!("{}{}", whole(value), units.temperature_label())
}

pub fn speed(value: f64, units: Units) -> String {
    format!("{} {}", whole(value), units.speed_label())
}

pub fn percent(value: f64) -> String {
    format!("{}%", whole(value))
}

/// "6 mi" or "10 km"
pub fn visibility(current: &CurrentConditions, units: Units) -> String {
    let value = match units {
        Units::Imperial => current.visibility_miles().map(|v| format!("{} mi", whole(v))),
        Units::Metric => current.visibility_km().map(|v| format!("{} km", whole(v))),
    };
    value.unwrap_or_else(|| "-".to_string())
}

/// Humidity and wind line shown for the selected forecast card
pub fn day_details(day: &DailySummary, units: Units) -> String {
    format!(
        "💧 {} | 💨 {}",
        percent(day.humidity_avg),
        speed(day.wind_speed_avg, units)
    )
}

/// Long date for the today view, e.g. "Monday, October 20, 2025"
pub fn long_date(current: &CurrentConditions, boundary: DayBoundary) -> String {
    boundary
        .date_of(current.fetched_at, current.utc_offset_seconds)
        .format("%A, %B %-d, %Y")
        .to_string()
}

pub fn current_text(current: &CurrentConditions, units: Units, boundary: DayBoundary) -> String {
    let backdrop = current.backdrop();
    let mut out = String::new();

    let _ = writeln!(out, "{}", current.display_name());
    let _ = writeln!(out, "{}", long_date(current, boundary));
    let _ = writeln!(
        out,
        "{} {}  {}",
        backdrop.symbol(),
        temperature(current.temperature, units),
        current.description
    );
    let _ = writeln!(
        out,
        "Feels like {} · Humidity {} · Wind {} · Visibility {}",
        temperature(current.feels_like, units),
        percent(current.humidity),
        speed(current.wind_speed, units),
        visibility(current, units)
    );
    let _ = writeln!(
        out,
        "Sunrise {} · Sunset {}",
        current.sunrise_label(boundary),
        current.sunset_label(boundary)
    );
    let _ = writeln!(out, "Icon {}", current.icon_url());

    out
}

pub fn forecast_text(forecast: &WeatherForecast, units: Units) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}-Day Forecast: {}", forecast.daily.len(), forecast.display_name());

    for day in &forecast.daily {
        let backdrop = Backdrop::from_condition(&day.condition, &day.icon);
        let _ = writeln!(
            out,
            "{} {:<6} {} {:<12} {:>5} / {:<5} {}  {}",
            day.weekday_label(),
            day.date_label(),
            backdrop.symbol(),
            day.condition,
            degrees(day.temp_high),
            degrees(day.temp_low),
            day_details(day, units),
            day.icon_url()
        );
    }

    out
}
