use super::{render_nav, StatusLine};
use crate::app::SearchState;
use crate::models::{Backdrop, CurrentConditions, DayBoundary, Units};
use crate::ui::components::{humidity_gauge, temperature_gauge, wind_gauge, InputWidget};
use crate::ui::{text, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct TodayScreen<'a> {
    pub current: Option<&'a CurrentConditions>,
    pub units: Units,
    pub day_boundary: DayBoundary,
    pub search: &'a SearchState,
    pub status: StatusLine<'a>,
}

impl<'a> TodayScreen<'a> {
    pub fn new(
        current: Option<&'a CurrentConditions>,
        units: Units,
        day_boundary: DayBoundary,
        search: &'a SearchState,
    ) -> Self {
        Self {
            current,
            units,
            day_boundary,
            search,
            status: StatusLine::default(),
        }
    }

    pub fn with_status(mut self, status: StatusLine<'a>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for TodayScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(12),   // Conditions
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        InputWidget::new("City", &self.search.buffer)
            .placeholder("Enter a city name")
            .focused(self.search.editing)
            .cursor(self.search.cursor)
            .render(chunks[0], buf);

        self.render_conditions(chunks[1], buf);
        self.status.render(chunks[2], buf);
        render_nav(chunks[3], buf);
    }
}

impl TodayScreen<'_> {
    fn render_conditions(&self, area: Rect, buf: &mut Buffer) {
        let backdrop = self
            .current
            .map(CurrentConditions::backdrop)
            .unwrap_or_default();

        let block = Block::default()
            .title(Span::styled("Today's Weather", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::backdrop_border(backdrop));

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(current) = self.current else {
            Paragraph::new(Span::styled("No weather loaded yet", Theme::dim()))
                .render(inner, buf);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Headline
                Constraint::Length(5), // Gauges
                Constraint::Min(3),    // Details
            ])
            .split(inner);

        self.render_headline(current, backdrop, chunks[0], buf);
        self.render_gauges(current, chunks[1], buf);
        self.render_details(current, chunks[2], buf);
    }

    fn render_headline(
        &self,
        current: &CurrentConditions,
        backdrop: Backdrop,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let lines = vec![
            Line::from(Span::styled(current.display_name(), Theme::title())),
            Line::from(Span::styled(
                text::long_date(current, self.day_boundary),
                Theme::dim(),
            )),
            Line::from(vec![
                Span::styled(
                    format!("{} ", backdrop.symbol()),
                    Style::default().fg(Theme::backdrop_color(backdrop)),
                ),
                Span::styled(
                    text::temperature(current.temperature, self.units),
                    Style::default()
                        .fg(Theme::temp_color(current.temperature, self.units))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(current.description.as_str(), Theme::normal()),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_gauges(&self, current: &CurrentConditions, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        temperature_gauge("Temperature", Some(current.temperature), self.units)
            .render(gauge_chunks[0], buf);
        temperature_gauge("Feels Like", Some(current.feels_like), self.units)
            .render(gauge_chunks[1], buf);
        humidity_gauge("Humidity", Some(current.humidity)).render(gauge_chunks[2], buf);
        wind_gauge("Wind", Some(current.wind_speed), self.units).render(gauge_chunks[3], buf);
    }

    fn render_details(&self, current: &CurrentConditions, area: Rect, buf: &mut Buffer) {
        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), Theme::dim()),
                Span::styled(value, Theme::normal()),
            ])
        };

        let lines = vec![
            row("Visibility", text::visibility(current, self.units)),
            row("Sunrise", current.sunrise_label(self.day_boundary)),
            row("Sunset", current.sunset_label(self.day_boundary)),
            row("Icon", current.icon_url()),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}
