use crate::models::IconCode;

/// Background theme chosen from the prevailing weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    #[default]
    ClearDay,
    ClearNight,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

impl Backdrop {
    /// Pick a backdrop from an OpenWeatherMap condition ("Clear", "Rain", ...) and its icon.
    /// Unknown conditions are treated like "Clear".
    pub fn from_condition(condition: &str, icon: &IconCode) -> Self {
        let night = icon.is_night();
        match condition {
            "Clouds" => Backdrop::Clouds,
            "Rain" | "Drizzle" => Backdrop::Rain,
            "Thunderstorm" => Backdrop::Thunderstorm,
            "Snow" => Backdrop::Snow,
            "Mist" | "Fog" | "Haze" => Backdrop::Mist,
            _ if night => Backdrop::ClearNight,
            _ => Backdrop::ClearDay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backdrop::ClearDay => "clear-day",
            Backdrop::ClearNight => "clear-night",
            Backdrop::Clouds => "clouds",
            Backdrop::Rain => "rain",
            Backdrop::Thunderstorm => "thunderstorm",
            Backdrop::Snow => "snow",
            Backdrop::Mist => "mist",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Backdrop::ClearDay => "☀",
            Backdrop::ClearNight => "☾",
            Backdrop::Clouds => "☁",
            Backdrop::Rain => "🌧",
            Backdrop::Thunderstorm => "⛈",
            Backdrop::Snow => "❄",
            Backdrop::Mist => "🌫",
        }
    }
}

impl std::fmt::Display for Backdrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
