use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::db::Database;
use crate::error::{Result, SkycastError};
use crate::models::{CurrentConditions, WeatherForecast};

/// Everything one search produces: today's conditions and the daily forecast.
///
/// The two come from separate endpoints; a report holds at least one of them.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<WeatherForecast>,
}

impl WeatherReport {
    /// City name as reported by whichever endpoint answered
    pub fn city(&self) -> Option<&str> {
        self.current
            .as_ref()
            .map(|c| c.city.as_str())
            .or_else(|| self.forecast.as_ref().map(|f| f.location.city.as_str()))
    }

    pub fn display_name(&self) -> String {
        match (&self.current, &self.forecast) {
            (_, Some(forecast)) => forecast.display_name(),
            (Some(current), None) => current.display_name(),
            (None, None) => String::new(),
        }
    }

    /// Which half failed to load, if any
    pub fn missing_part(&self) -> Option<&'static str> {
        match (&self.current, &self.forecast) {
            (None, _) => Some("current conditions"),
            (_, None) => Some("forecast"),
            _ => None,
        }
    }
}

pub struct WeatherService {
    config: Config,
    db: Database,
    client: OpenWeatherMapClient,
}

impl WeatherService {
    pub fn new(config: Config, db: Database) -> Self {
        let client = OpenWeatherMapClient::new(config.openweathermap.clone())
            .with_day_boundary(config.day_boundary);
        tracing::info!(
            units = config.openweathermap.units.as_query(),
            day_boundary = ?config.day_boundary,
            "OpenWeatherMap client configured"
        );

        Self { config, db, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// City to show on startup: the last search, else the configured default
    pub fn initial_city(&self) -> String {
        match self.db.get_last_city() {
            Ok(Some(city)) => city,
            Ok(None) => self.config.default_city.clone(),
            Err(e) => {
                tracing::warn!("Failed to read last city: {}", e);
                self.config.default_city.clone()
            }
        }
    }

    /// Trim user input, rejecting blank searches
    pub fn validate_city(input: &str) -> Result<String> {
        let city = input.trim();
        if city.is_empty() {
            return Err(SkycastError::InvalidInput(
                "Please enter a city name".to_string(),
            ));
        }
        Ok(city.to_string())
    }

    /// Handle a submitted search: remember the city, then fetch its weather.
    ///
    /// The city is stored before the fetch so a failed lookup still becomes
    /// the next startup city.
    pub async fn search(&self, input: &str) -> Result<WeatherReport> {
        let city = Self::validate_city(input)?;

        if let Err(e) = self.db.set_last_city(&city) {
            tracing::warn!("Failed to save last city: {}", e);
        }

        self.load(&city).await
    }

    /// Fetch current conditions and forecast without touching the stored preference.
    ///
    /// Both endpoints are queried together. One failing leaves its half of the
    /// report empty; only when both fail is the forecast error returned.
    pub async fn load(&self, city: &str) -> Result<WeatherReport> {
        let (current, forecast) = tokio::join!(
            self.client.fetch_current(city),
            self.client.fetch_forecast(city)
        );

        let report = match (current, forecast) {
            (Err(current_err), Err(forecast_err)) => {
                tracing::debug!("Current conditions also failed: {}", current_err);
                return Err(forecast_err);
            }
            (current, forecast) => WeatherReport {
                current: current
                    .map_err(|e| tracing::warn!(city, "Current conditions unavailable: {}", e))
                    .ok(),
                forecast: forecast
                    .map_err(|e| tracing::warn!(city, "Forecast unavailable: {}", e))
                    .ok(),
            },
        };

        tracing::debug!(
            city = %report.display_name(),
            days = report.forecast.as_ref().map(|f| f.daily.len()).unwrap_or(0),
            "Weather report ready"
        );

        Ok(report)
    }

    pub async fn check_connection(&self) -> ConnectionStatus {
        let city = self.initial_city();
        let openweathermap = match self.client.test_connection(&city).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("OpenWeatherMap connection check failed: {}", e);
                false
            }
        };

        ConnectionStatus {
            openweathermap,
            database: self.db.is_healthy(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: bool,
    pub database: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenWeatherMapConfig;
    use crate::models::{DayBoundary, Units};
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config(base_url: &str) -> Config {
        Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: "test_key".into(),
                units: Units::Imperial,
                base_url: base_url.into(),
            },
            default_city: "Salt Lake City".into(),
            day_boundary: DayBoundary::Utc,
        }
    }

    async fn mount_city(server: &MockServer, city: &str) {
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": city,
                "main": { "temp": 70.2, "feels_like": 69.0, "humidity": 30 },
                "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "wind": { "speed": 5.0 },
                "visibility": 10000,
                "sys": { "country": "US", "sunrise": 1760965500, "sunset": 1761005700 },
                "timezone": -21600
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {
                        "dt": 1760961600,
                        "main": { "temp": 66.0, "humidity": 30 },
                        "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }],
                        "wind": { "speed": 5.0 }
                    }
                ],
                "city": { "name": city, "country": "US", "coord": { "lat": 0.0, "lon": 0.0 }, "timezone": -21600 }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn validate_city_trims() {
        assert_eq!(
            WeatherService::validate_city("  Denver \n").unwrap(),
            "Denver"
        );
    }

    #[test]
    fn validate_city_rejects_blank() {
        let err = WeatherService::validate_city("   ").unwrap_err();
        assert_eq!(err.user_message(), "Please enter a city name");
    }

    #[test]
    fn initial_city_prefers_last_search() {
        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config("http://127.0.0.1:9"), db.clone());
        assert_eq!(service.initial_city(), "Salt Lake City");

        db.set_last_city("Boise").unwrap();
        assert_eq!(service.initial_city(), "Boise");
    }

    #[tokio::test]
    async fn search_fetches_and_remembers_city() {
        let server = MockServer::start().await;
        mount_city(&server, "Denver").await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db.clone());

        let report = service.search(" Denver ").await.unwrap();
        assert_eq!(report.city(), Some("Denver"));
        assert!(report.missing_part().is_none());
        let forecast = report.forecast.unwrap();
        assert_eq!(forecast.daily.len(), 1);
        assert_eq!(forecast.daily[0].temp_high, 66.0);
        assert_eq!(db.get_last_city().unwrap().as_deref(), Some("Denver"));
    }

    #[tokio::test]
    async fn blank_search_does_not_touch_preference() {
        let db = Database::open_in_memory().unwrap();
        db.set_last_city("Boise").unwrap();
        let service = WeatherService::new(test_config("http://127.0.0.1:9"), db.clone());

        let result = service.search("  ").await;
        assert!(matches!(result, Err(SkycastError::InvalidInput(_))));
        assert_eq!(db.get_last_city().unwrap().as_deref(), Some("Boise"));
    }

    #[tokio::test]
    async fn failed_lookup_still_remembers_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db.clone());

        let result = service.search("Atlantis").await;
        assert!(matches!(result, Err(SkycastError::CityNotFound(_))));
        assert_eq!(db.get_last_city().unwrap().as_deref(), Some("Atlantis"));
    }

    #[tokio::test]
    async fn load_does_not_touch_preference() {
        let server = MockServer::start().await;
        mount_city(&server, "Salt Lake City").await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db.clone());

        let report = service.load("Salt Lake City").await.unwrap();
        assert_eq!(report.display_name(), "Salt Lake City, US");
        assert_eq!(db.get_last_city().unwrap(), None);
    }

    #[tokio::test]
    async fn current_outage_keeps_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [{
                    "dt": 1760961600,
                    "main": { "temp": 66.0, "humidity": 30 },
                    "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
                    "wind": { "speed": 5.0 }
                }],
                "city": { "name": "Denver", "country": "US", "timezone": -21600 }
            })))
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db);

        let report = service.load("Denver").await.unwrap();
        assert!(report.current.is_none());
        assert_eq!(report.missing_part(), Some("current conditions"));
        assert_eq!(report.city(), Some("Denver"));
        assert_eq!(report.forecast.unwrap().daily[0].condition, "Rain");
    }

    #[tokio::test]
    async fn forecast_outage_keeps_current() {
        let server = MockServer::start().await;
        mount_city(&server, "Denver").await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .with_priority(1)
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db);

        let report = service.load("Denver").await.unwrap();
        assert!(report.forecast.is_none());
        assert_eq!(report.missing_part(), Some("forecast"));
        assert_eq!(report.display_name(), "Denver, US");
    }

    #[tokio::test]
    async fn check_connection_reports_api_and_database() {
        let server = MockServer::start().await;
        mount_city(&server, "Salt Lake City").await;

        let db = Database::open_in_memory().unwrap();
        let service = WeatherService::new(test_config(&server.uri()), db);

        let status = service.check_connection().await;
        assert!(status.openweathermap);
        assert!(status.database);
    }
}
