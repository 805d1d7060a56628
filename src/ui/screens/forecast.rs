use super::{render_nav, StatusLine};
use crate::app::SearchState;
use crate::models::{Backdrop, Units, WeatherForecast};
use crate::ui::components::{ForecastCard, InputWidget};
use crate::ui::{text, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ForecastScreen<'a> {
    pub forecast: Option<&'a WeatherForecast>,
    pub units: Units,
    pub selected_index: usize,
    pub search: &'a SearchState,
    pub status: StatusLine<'a>,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(
        forecast: Option<&'a WeatherForecast>,
        units: Units,
        selected_index: usize,
        search: &'a SearchState,
    ) -> Self {
        Self {
            forecast,
            units,
            selected_index,
            search,
            status: StatusLine::default(),
        }
    }

    pub fn with_status(mut self, status: StatusLine<'a>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(12),   // Cards
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        InputWidget::new("City", &self.search.buffer)
            .placeholder("Enter a city name")
            .focused(self.search.editing)
            .cursor(self.search.cursor)
            .render(chunks[0], buf);

        self.render_cards(chunks[1], buf);
        self.status.render(chunks[2], buf);
        render_nav(chunks[3], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        // The first 3-hour sample sets the mood for the whole view
        let backdrop = self
            .forecast
            .and_then(WeatherForecast::first_sample)
            .map(|s| Backdrop::from_condition(&s.condition, &s.icon))
            .unwrap_or_default();

        let title = match self.forecast {
            Some(f) => format!("{}-Day Forecast: {}", f.daily.len(), f.display_name()),
            None => "Forecast".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::backdrop_border(backdrop));

        let inner = block.inner(area);
        block.render(area, buf);

        let days = match self.forecast {
            Some(f) if !f.daily.is_empty() => &f.daily,
            Some(_) => {
                Paragraph::new(Span::styled("No forecast data returned", Theme::dim()))
                    .render(inner, buf);
                return;
            }
            None => {
                Paragraph::new(Span::styled("No weather loaded yet", Theme::dim()))
                    .render(inner, buf);
                return;
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(1)])
            .split(inner);

        let constraints: Vec<Constraint> = days
            .iter()
            .map(|_| Constraint::Ratio(1, days.len() as u32))
            .collect();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[0]);

        for (i, (day, column)) in days.iter().zip(columns.iter()).enumerate() {
            ForecastCard::new(day, self.units)
                .selected(i == self.selected_index)
                .render(*column, buf);
        }

        if let Some(day) = days.get(self.selected_index) {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} {}  ", day.weekday_label(), day.date_label()),
                    Theme::highlight(),
                ),
                Span::styled(text::day_details(day, self.units), Theme::normal()),
                Span::styled(format!("  {}", day.icon_url()), Theme::dim()),
            ]);
            Paragraph::new(line).render(rows[1], buf);
        }
    }
}
