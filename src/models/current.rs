use crate::logic::calculations::round_half_up;
use crate::models::{Backdrop, DayBoundary, IconCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const METRES_PER_MILE: f64 = 1609.34;

/// Current conditions from the OpenWeatherMap `/weather` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub fetched_at: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility_m: Option<f64>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub condition: String,
    pub description: String,
    pub icon: IconCode,
    pub utc_offset_seconds: i32,
}

impl CurrentConditions {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }

    pub fn visibility_miles(&self) -> Option<f64> {
        self.visibility_m.map(|m| round_half_up(m / METRES_PER_MILE))
    }

    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m.map(|m| round_half_up(m / 1000.0))
    }

    pub fn sunrise_label(&self, boundary: DayBoundary) -> String {
        boundary.clock_label(self.sunrise, self.utc_offset_seconds)
    }

    pub fn sunset_label(&self, boundary: DayBoundary) -> String {
        boundary.clock_label(self.sunset, self.utc_offset_seconds)
    }

    /// Large icon for the hero panel
    pub fn icon_url(&self) -> String {
        self.icon.url(4)
    }

    pub fn backdrop(&self) -> Backdrop {
        Backdrop::from_condition(&self.condition, &self.icon)
    }
}
