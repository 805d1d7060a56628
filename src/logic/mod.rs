pub mod aggregation;
pub mod calculations;
pub mod weather_service;

pub use weather_service::{WeatherReport, WeatherService};
