use crate::models::{Backdrop, DailySummary, Units};
use crate::ui::{text, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// One day of the 5-day forecast. The selected card also shows humidity and wind.
pub struct ForecastCard<'a> {
    day: &'a DailySummary,
    units: Units,
    selected: bool,
}

impl<'a> ForecastCard<'a> {
    pub fn new(day: &'a DailySummary, units: Units) -> Self {
        Self {
            day,
            units,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let day = self.day;
        let backdrop = Backdrop::from_condition(&day.condition, &day.icon);

        let mut lines = vec![
            Line::from(Span::styled(day.date_label(), Theme::dim())),
            Line::from(Span::styled(
                backdrop.symbol(),
                Style::default().fg(Theme::backdrop_color(backdrop)),
            )),
            Line::from(vec![
                Span::styled(
                    text::degrees(day.temp_high),
                    Style::default().fg(Theme::temp_color(day.temp_high, self.units)),
                ),
                Span::raw(" "),
                Span::styled(
                    text::degrees(day.temp_low),
                    Style::default().fg(Theme::temp_color(day.temp_low, self.units)),
                ),
            ]),
            Line::from(Span::styled(day.condition.as_str(), Theme::normal())),
        ];

        if self.selected {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                text::day_details(day, self.units),
                Theme::highlight(),
            )));
            lines.push(Line::from(Span::styled(day.description.as_str(), Theme::dim())));
            lines.push(Line::from(Span::styled(day.icon_url(), Theme::dim())));
        }

        lines
    }
}

impl Widget for ForecastCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Theme::border_focused()
        } else if self.day.is_clear() {
            Theme::clear_day_card()
        } else {
            Theme::border()
        };

        let title_style = if self.day.is_clear() {
            Theme::clear_day_card()
        } else {
            Theme::header()
        };

        let block = Block::default()
            .title(Span::styled(self.day.weekday_label(), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
