use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SkycastError};
use crate::logic::aggregation::aggregate_for_boundary;
use crate::models::{
    CurrentConditions, DayBoundary, ForecastLocation, ForecastSample, IconCode, WeatherForecast,
};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    day_boundary: DayBoundary,
}

// OpenWeatherMap API response structures.
// Measurements never fail the parse: missing or null is None, anything
// non-numeric is NaN, so one bad reading only spoils its own day.
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default)]
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: OwmWind,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    #[serde(default, deserialize_with = "lenient_number")]
    temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    humidity: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
struct OwmWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    #[serde(default, deserialize_with = "lenient_number")]
    speed: Option<f64>,
}

/// Read a measurement the way JavaScript coerces it to a number:
/// numeric strings and booleans convert, everything else is NaN.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => Some(f64::NAN),
    })
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    coord: OwmCoord,
    #[serde(default)]
    timezone: i32, // shift in seconds from UTC
}

#[derive(Debug, Default, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: OwmWind,
    visibility: Option<f64>, // metres
    sys: OwmSys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            day_boundary: DayBoundary::default(),
        }
    }

    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }

    /// Fetch 5-day/3-hour forecast for a city and summarise it by day
    pub async fn fetch_forecast(&self, city: &str) -> Result<WeatherForecast> {
        let response: OwmForecastResponse = self.get_json("forecast", city).await?;
        tracing::info!(
            city = %response.city.name,
            samples = response.list.len(),
            "Fetched forecast"
        );
        Ok(self.convert_forecast(response))
    }

    /// Fetch current conditions for a city
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions> {
        let response: OwmCurrentResponse = self.get_json("weather", city).await?;
        tracing::info!(city = %response.name, "Fetched current conditions");
        Ok(convert_current(response))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, city: &str) -> Result<bool> {
        let response = self
            .request("weather", city)
            .send()
            .await
            .map_err(|e| SkycastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    fn request(&self, endpoint: &str, city: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        self.client.get(url).query(&[
            ("q", city),
            ("appid", self.config.api_key.as_str()),
            ("units", self.config.units.as_query()),
        ])
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T> {
        tracing::debug!(endpoint, city, "Requesting OpenWeatherMap");

        let response =
            self.request(endpoint, city).send().await.map_err(|e| {
                SkycastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(city, "OpenWeatherMap does not know this city");
            return Err(SkycastError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "OpenWeatherMap request failed");
            return Err(SkycastError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            SkycastError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }

    fn convert_forecast(&self, response: OwmForecastResponse) -> WeatherForecast {
        let location = ForecastLocation {
            city: response.city.name,
            country: response.city.country,
            latitude: response.city.coord.lat,
            longitude: response.city.coord.lon,
            utc_offset_seconds: response.city.timezone,
        };

        let samples: Vec<ForecastSample> = response
            .list
            .iter()
            .filter_map(convert_forecast_item)
            .collect();

        let daily =
            aggregate_for_boundary(&samples, self.day_boundary, location.utc_offset_seconds);

        WeatherForecast {
            fetched_at: Utc::now(),
            location,
            samples,
            daily,
        }
    }
}

fn convert_forecast_item(item: &OwmForecastItem) -> Option<ForecastSample> {
    let Some(timestamp) = DateTime::from_timestamp(item.dt, 0) else {
        tracing::warn!(dt = item.dt, "Skipping forecast item with invalid timestamp");
        return None;
    };

    let weather = item.weather.first().cloned().unwrap_or_default();

    Some(ForecastSample {
        timestamp,
        temperature: item.main.temp.unwrap_or(f64::NAN),
        humidity: item.main.humidity.unwrap_or(f64::NAN),
        wind_speed: item.wind.speed.unwrap_or(f64::NAN),
        condition: weather.main,
        description: weather.description,
        icon: IconCode::new(weather.icon),
    })
}

fn convert_current(response: OwmCurrentResponse) -> CurrentConditions {
    let weather = response.weather.first().cloned().unwrap_or_default();
    let sunrise = DateTime::from_timestamp(response.sys.sunrise, 0).unwrap_or_default();
    let sunset = DateTime::from_timestamp(response.sys.sunset, 0).unwrap_or_default();

    CurrentConditions {
        fetched_at: Utc::now(),
        city: response.name,
        country: response.sys.country,
        temperature: response.main.temp.unwrap_or(f64::NAN),
        feels_like: response.main.feels_like.unwrap_or(f64::NAN),
        humidity: response.main.humidity.unwrap_or(f64::NAN),
        wind_speed: response.wind.speed.unwrap_or(f64::NAN),
        visibility_m: response.visibility,
        sunrise,
        sunset,
        condition: weather.main,
        description: weather.description,
        icon: IconCode::new(weather.icon),
        utc_offset_seconds: response.timezone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Units;
    use chrono::NaiveDate;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    // 2025-10-20 00:00:00 UTC
    const DAY_ONE: i64 = 1_760_918_400;

    fn test_client(server: &MockServer) -> OpenWeatherMapClient {
        let config = OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            units: Units::Imperial,
            base_url: server.uri(),
        };
        OpenWeatherMapClient::new(config).with_day_boundary(DayBoundary::Utc)
    }

    fn forecast_item(dt: i64, temp: f64, icon: &str, main: &str) -> serde_json::Value {
        serde_json::json!({
            "dt": dt,
            "main": { "temp": temp, "feels_like": temp, "humidity": 50 },
            "weather": [{ "id": 800, "main": main, "description": main.to_lowercase(), "icon": icon }],
            "wind": { "speed": 4.0 },
            "clouds": { "all": 0 },
            "pop": 0
        })
    }

    fn forecast_body(items: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({
            "cod": "200",
            "cnt": items.len(),
            "list": items,
            "city": {
                "name": "Salt Lake City",
                "country": "US",
                "coord": { "lat": 40.7608, "lon": -111.891 },
                "timezone": -21600
            }
        })
    }

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Salt Lake City",
            "main": { "temp": 58.6, "feels_like": 56.2, "humidity": 41 },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
            "wind": { "speed": 6.9 },
            "visibility": 10000,
            "sys": { "country": "US", "sunrise": 1760965500, "sunset": 1761005700 },
            "timezone": -21600
        })
    }

    #[tokio::test]
    async fn fetch_forecast_aggregates_days() {
        let server = MockServer::start().await;
        let items = vec![
            forecast_item(DAY_ONE + 3 * 3600, 50.0, "01n", "Clear"),
            forecast_item(DAY_ONE + 15 * 3600, 65.0, "01d", "Clear"),
            forecast_item(DAY_ONE + 27 * 3600, 58.0, "10d", "Rain"),
        ];
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Salt Lake City"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(items)))
            .mount(&server)
            .await;

        let forecast = test_client(&server)
            .fetch_forecast("Salt Lake City")
            .await
            .unwrap();

        assert_eq!(forecast.location.display_name(), "Salt Lake City, US");
        assert_eq!(forecast.location.utc_offset_seconds, -21600);
        assert_eq!(forecast.samples.len(), 3);
        assert_eq!(forecast.daily.len(), 2);
        assert_eq!(
            forecast.daily[0].date,
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
        );
        assert_eq!(forecast.daily[0].temp_high, 65.0);
        assert_eq!(forecast.daily[0].temp_low, 50.0);
        assert_eq!(forecast.daily[0].icon, IconCode::new("01d"));
        assert_eq!(forecast.daily[1].condition, "Rain");
    }

    #[tokio::test]
    async fn missing_numbers_become_nan() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "list": [{ "dt": DAY_ONE, "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }] }],
            "city": { "name": "Nowhere" }
        });
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let forecast = test_client(&server).fetch_forecast("Nowhere").await.unwrap();
        assert_eq!(forecast.daily.len(), 1);
        assert!(forecast.daily[0].temp_high.is_nan());
        assert!(forecast.daily[0].humidity_avg.is_nan());
        assert!(forecast.daily[0].wind_speed_avg.is_nan());
    }

    #[tokio::test]
    async fn non_numeric_reading_spoils_only_its_day() {
        let server = MockServer::start().await;
        let mut bad = forecast_item(DAY_ONE + 12 * 3600, 0.0, "01d", "Clear");
        bad["main"]["temp"] = serde_json::json!("warm");
        let mut quoted = forecast_item(DAY_ONE + 36 * 3600, 0.0, "01d", "Clear");
        quoted["main"]["temp"] = serde_json::json!("61.5");
        let items = vec![
            bad,
            forecast_item(DAY_ONE + 15 * 3600, 65.0, "01d", "Clear"),
            forecast_item(DAY_ONE + 27 * 3600, 58.0, "10d", "Rain"),
            quoted,
        ];
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(items)))
            .mount(&server)
            .await;

        let forecast = test_client(&server)
            .fetch_forecast("Salt Lake City")
            .await
            .unwrap();

        assert_eq!(forecast.daily.len(), 2);
        assert!(forecast.daily[0].temp_high.is_nan());
        assert!(forecast.daily[0].temp_low.is_nan());
        assert_eq!(forecast.daily[0].humidity_avg, 50.0);
        assert_eq!(forecast.daily[1].temp_high, 62.0);
        assert_eq!(forecast.daily[1].temp_low, 58.0);
    }

    #[test]
    fn lenient_numbers_follow_js_coercion() {
        let main: OwmMain = serde_json::from_value(serde_json::json!({
            "temp": "warm",
            "feels_like": null,
            "humidity": "40"
        }))
        .unwrap();
        assert!(main.temp.unwrap().is_nan());
        assert_eq!(main.feels_like, None);
        assert_eq!(main.humidity, Some(40.0));

        let wind: OwmWind = serde_json::from_value(serde_json::json!({ "speed": [1] })).unwrap();
        assert!(wind.speed.unwrap().is_nan());
    }

    #[tokio::test]
    async fn not_found_maps_to_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let result = test_client(&server).fetch_forecast("Atlantis").await;
        assert!(
            matches!(result, Err(SkycastError::CityNotFound(ref c)) if c == "Atlantis"),
            "Expected CityNotFound, got: {:?}",
            result.map(|f| f.daily.len())
        );
    }

    #[tokio::test]
    async fn server_error_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let result = test_client(&server).fetch_current("Salt Lake City").await;
        match result {
            Err(SkycastError::DataSourceUnavailable(msg)) => assert!(msg.contains("401")),
            other => panic!("Expected DataSourceUnavailable, got: {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = test_client(&server).fetch_forecast("Salt Lake City").await;
        assert!(matches!(
            result,
            Err(SkycastError::DataSourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn fetch_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Salt Lake City"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let current = test_client(&server)
            .fetch_current("Salt Lake City")
            .await
            .unwrap();

        assert_eq!(current.display_name(), "Salt Lake City, US");
        assert!((current.temperature - 58.6).abs() < 0.001);
        assert_eq!(current.humidity, 41.0);
        assert_eq!(current.visibility_miles(), Some(6.0));
        assert_eq!(current.condition, "Clear");
        assert_eq!(current.icon, IconCode::new("01d"));
        assert_eq!(current.sunrise_label(DayBoundary::City), "7:05 AM");
    }

    #[tokio::test]
    async fn test_connection_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let ok = test_client(&server)
            .test_connection("Salt Lake City")
            .await
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn forecast_item_without_weather_has_empty_icon() {
        let item: OwmForecastItem = serde_json::from_value(serde_json::json!({
            "dt": DAY_ONE,
            "main": { "temp": 40.0, "humidity": 80 },
            "wind": { "speed": 1.5 }
        }))
        .unwrap();

        let sample = convert_forecast_item(&item).unwrap();
        assert_eq!(sample.temperature, 40.0);
        assert_eq!(sample.condition, "");
        assert!(!sample.icon.is_day());
        assert!(!sample.icon.is_night());
    }
}
