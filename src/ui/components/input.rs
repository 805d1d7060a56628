use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    cursor_position: usize, // in chars
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            cursor_position: value.chars().count(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn cursor(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }

    fn display_line(&self) -> Line<'a> {
        if !self.focused {
            return if self.value.is_empty() {
                Line::from(Span::styled(self.placeholder, Theme::dim()))
            } else {
                Line::from(self.value)
            };
        }

        // Split on a char boundary so non-ASCII city names don't panic
        let split = self
            .value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len());
        let (before, after) = self.value.split_at(split);
        let mut rest = after.chars();
        let cursor_char = rest.next().unwrap_or(' ');

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char.to_string(), Theme::selected()),
            Span::raw(rest.as_str()),
        ])
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.display_line()).render(inner, buf);
    }
}
