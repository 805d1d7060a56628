pub mod forecast;
pub mod today;

pub use forecast::ForecastScreen;
pub use today::TodayScreen;

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Status line state shared by both screens
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusLine<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let span = if let Some(err) = self.error {
            Span::styled(err, Theme::error())
        } else if self.loading {
            Span::styled(self.message.unwrap_or("Loading..."), Theme::warning())
        } else if let Some(msg) = self.message {
            Span::styled(msg, Theme::success())
        } else {
            return;
        };
        Paragraph::new(span).render(area, buf);
    }
}

pub(crate) fn render_nav(area: Rect, buf: &mut Buffer) {
    let nav = Line::from(vec![
        Span::styled("[1]", Theme::nav_key()),
        Span::styled("Today ", Theme::nav_label()),
        Span::styled("[2]", Theme::nav_key()),
        Span::styled("Forecast ", Theme::nav_label()),
        Span::styled("[/]", Theme::nav_key()),
        Span::styled("Search ", Theme::nav_label()),
        Span::styled("[←→]", Theme::nav_key()),
        Span::styled("Select day ", Theme::nav_label()),
        Span::styled("[r]", Theme::nav_key()),
        Span::styled("Refresh ", Theme::nav_label()),
        Span::styled("[q]", Theme::nav_key()),
        Span::styled("Quit", Theme::nav_label()),
    ]);

    Paragraph::new(nav).render(area, buf);
}
