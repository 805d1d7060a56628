use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Which clock decides where one forecast day ends and the next begins.
///
/// `City` uses the UTC offset OpenWeatherMap reports for the searched city,
/// `Local` uses this machine's timezone, `Utc` ignores both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    #[default]
    City,
    Local,
    Utc,
}

impl DayBoundary {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "city" => Some(DayBoundary::City),
            "local" | "device" => Some(DayBoundary::Local),
            "utc" => Some(DayBoundary::Utc),
            _ => None,
        }
    }

    /// Calendar date of `timestamp` under this boundary
    pub fn date_of(&self, timestamp: DateTime<Utc>, utc_offset_seconds: i32) -> NaiveDate {
        match self {
            DayBoundary::City => timestamp
                .with_timezone(&city_offset(utc_offset_seconds))
                .date_naive(),
            DayBoundary::Local => timestamp.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => timestamp.date_naive(),
        }
    }

    /// 12-hour clock label such as "6:42 AM"
    pub fn clock_label(&self, timestamp: DateTime<Utc>, utc_offset_seconds: i32) -> String {
        match self {
            DayBoundary::City => format_clock(timestamp, &city_offset(utc_offset_seconds)),
            DayBoundary::Local => format_clock(timestamp, &Local),
            DayBoundary::Utc => format_clock(timestamp, &Utc),
        }
    }
}

/// Fixed offset for an OpenWeatherMap `timezone` value; out-of-range values fall back to UTC
pub fn city_offset(utc_offset_seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| {
        tracing::warn!(
            offset = utc_offset_seconds,
            "City UTC offset out of range, using UTC"
        );
        Utc.fix()
    })
}

fn format_clock<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%-I:%M %p").to_string()
}
