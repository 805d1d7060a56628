use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Weather forecast for one city from the OpenWeatherMap 5-day/3-hour API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub fetched_at: DateTime<Utc>,
    pub location: ForecastLocation,
    pub samples: Vec<ForecastSample>, // 3-hour intervals
    pub daily: Vec<DailySummary>,     // At most 5 days
}

impl WeatherForecast {
    /// The earliest sample, used to pick the backdrop for the forecast view
    pub fn first_sample(&self) -> Option<&ForecastSample> {
        self.samples.first()
    }

    pub fn display_name(&self) -> String {
        self.location.display_name()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_seconds: i32,
}

impl ForecastLocation {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

/// A single 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64, // 0-100, NaN when the API omitted it
    pub wind_speed: f64,
    pub condition: String, // e.g. "Clear", "Rain"
    pub description: String,
    pub icon: IconCode,
}

/// One calendar day of aggregated samples.
///
/// Numeric fields are whole numbers after rounding. They stay `f64` so a
/// malformed sample shows up as NaN instead of a plausible-looking zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_high: f64,
    pub temp_low: f64,
    pub condition: String,
    pub description: String,
    pub icon: IconCode,
    pub humidity_avg: f64,
    pub wind_speed_avg: f64,
}

impl DailySummary {
    /// Short weekday label, e.g. "Mon"
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// Short date label, e.g. "Oct 19"
    pub fn date_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    /// Card-sized icon image
    pub fn icon_url(&self) -> String {
        self.icon.url(2)
    }

    pub fn is_clear(&self) -> bool {
        self.condition == "Clear"
    }
}

/// OpenWeatherMap icon code such as "01d" or "10n".
///
/// The trailing letter marks the day ('d') or night ('n') variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconCode(String);

impl IconCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn is_day(&self) -> bool {
        self.0.ends_with('d')
    }

    pub fn is_night(&self) -> bool {
        self.0.ends_with('n')
    }

    /// The day variant of this icon; codes without a night marker are returned as-is
    pub fn to_day_variant(&self) -> Self {
        match self.0.strip_suffix('n') {
            Some(stem) => Self(format!("{}d", stem)),
            None => self.clone(),
        }
    }

    /// Image URL for the icon at the given scale (2 for cards, 4 for the hero icon)
    pub fn url(&self, scale: u8) -> String {
        format!("{}/{}@{}x.png", ICON_BASE_URL, self.0, scale)
    }
}

impl std::fmt::Display for IconCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_on(date: NaiveDate, condition: &str) -> DailySummary {
        DailySummary {
            date,
            temp_high: 65.0,
            temp_low: 50.0,
            condition: condition.to_string(),
            description: "clear sky".to_string(),
            icon: IconCode::new("01d"),
            humidity_avg: 50.0,
            wind_speed_avg: 3.0,
        }
    }

    #[test]
    fn icon_day_night_markers() {
        assert!(IconCode::new("01d").is_day());
        assert!(!IconCode::new("01d").is_night());
        assert!(IconCode::new("10n").is_night());
        assert!(!IconCode::new("10n").is_day());
        assert!(!IconCode::new("").is_day());
        assert!(!IconCode::new("").is_night());
    }

    #[test]
    fn icon_day_variant_rewrites_only_trailing_marker() {
        assert_eq!(IconCode::new("01n").to_day_variant(), IconCode::new("01d"));
        assert_eq!(IconCode::new("04d").to_day_variant(), IconCode::new("04d"));
        assert_eq!(IconCode::new("").to_day_variant(), IconCode::new(""));
    }

    #[test]
    fn icon_url_template() {
        assert_eq!(
            IconCode::new("10d").url(2),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
        assert_eq!(
            IconCode::new("01n").url(4),
            "https://openweathermap.org/img/wn/01n@4x.png"
        );
    }

    #[test]
    fn daily_summary_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = summary_on(date, "Clear");
        assert_eq!(summary.weekday_label(), "Mon");
        assert_eq!(summary.date_label(), "Oct 19");
        assert!(summary.is_clear());

        let date = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();
        let summary = summary_on(date, "Rain");
        assert_eq!(summary.date_label(), "Nov 5");
        assert!(!summary.is_clear());
    }

    #[test]
    fn location_display_name() {
        let mut location = ForecastLocation {
            city: "Salt Lake City".into(),
            country: "US".into(),
            latitude: 40.76,
            longitude: -111.89,
            utc_offset_seconds: -21600,
        };
        assert_eq!(location.display_name(), "Salt Lake City, US");
        location.country.clear();
        assert_eq!(location.display_name(), "Salt Lake City");
    }
}
