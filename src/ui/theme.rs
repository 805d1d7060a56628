use crate::models::{Backdrop, Units};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::LightCyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Temperature colors
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Colour for a temperature in the configured units
    pub fn temp_color(temp: f64, units: Units) -> Color {
        let temp_f = match units {
            Units::Imperial => temp,
            Units::Metric => temp * 9.0 / 5.0 + 32.0,
        };
        if temp_f.is_nan() {
            Self::DIM
        } else if temp_f < 40.0 {
            Self::TEMP_COLD
        } else if temp_f < 60.0 {
            Self::TEMP_COOL
        } else if temp_f < 80.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    /// Accent colour standing in for the page background of each weather type
    pub fn backdrop_color(backdrop: Backdrop) -> Color {
        match backdrop {
            Backdrop::ClearDay => Color::LightYellow,
            Backdrop::ClearNight => Color::Blue,
            Backdrop::Clouds => Color::Gray,
            Backdrop::Rain => Color::LightBlue,
            Backdrop::Thunderstorm => Color::Magenta,
            Backdrop::Snow => Color::White,
            Backdrop::Mist => Color::DarkGray,
        }
    }

    pub fn backdrop_border(backdrop: Backdrop) -> Style {
        Style::default().fg(Self::backdrop_color(backdrop))
    }

    /// Cards for clear days stand out from the rest
    pub fn clear_day_card() -> Style {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
