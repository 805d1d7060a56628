pub mod forecast_card;
pub mod gauge;
pub mod input;

pub use forecast_card::ForecastCard;
pub use gauge::{humidity_gauge, temperature_gauge, wind_gauge};
pub use input::InputWidget;
