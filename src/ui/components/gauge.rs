use crate::models::Units;
use crate::ui::{text, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
}

impl<'a> GaugeWidget<'a> {
    /// NaN values render as "N/A"
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value: value.filter(|v| !v.is_nan()),
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str = format!("{}{}", text::whole(value), self.unit);

                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
                Paragraph::new(value_line).render(inner, buf);

                // Render bar if space allows
                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (bar_area.width as f64 * ratio) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>, units: Units) -> GaugeWidget<'_> {
    let gauge = GaugeWidget::new(title, value, units.temperature_label());
    match units {
        Units::Imperial => gauge.range(0.0, 120.0).thresholds(vec![
            (f64::MIN, Theme::TEMP_COLD),
            (40.0, Theme::TEMP_COOL),
            (60.0, Theme::TEMP_WARM),
            (80.0, Theme::TEMP_HOT),
        ]),
        Units::Metric => gauge.range(-18.0, 49.0).thresholds(vec![
            (f64::MIN, Theme::TEMP_COLD),
            (4.4, Theme::TEMP_COOL),
            (15.6, Theme::TEMP_WARM),
            (26.7, Theme::TEMP_HOT),
        ]),
    }
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (70.0, Theme::WARNING),
            (90.0, Theme::ERROR),
        ])
}

pub fn wind_gauge(title: &str, value: Option<f64>, units: Units) -> GaugeWidget<'_> {
    let (max, breezy, strong) = match units {
        Units::Imperial => (40.0, 15.0, 25.0),
        Units::Metric => (18.0, 6.7, 11.2),
    };
    GaugeWidget::new(title, value, units.speed_label())
        .range(0.0, max)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (breezy, Theme::WARNING),
            (strong, Theme::ERROR),
        ])
}
