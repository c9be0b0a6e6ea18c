//! # StatusBar Component
//!
//! Bottom row. Stateless: the text comes from `core::status_bar`, already
//! cut to width; this component only paints each column in its colours.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::config::{Segment, Theme};
use crate::core::status_bar::StatusBar;
use crate::tui::component::Component;

pub struct StatusBarView<'a> {
    pub bar: &'a StatusBar,
    pub theme: &'a Theme,
}

fn style(segment: Segment) -> Style {
    Style::default().fg(segment.fg).bg(segment.bg)
}

impl Component for StatusBarView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = self.bar.columns();
        let line = Line::from(vec![
            Span::styled(
                columns.selected_file,
                style(self.theme.status_selected_file).add_modifier(Modifier::BOLD),
            ),
            Span::styled(columns.status, style(self.theme.status_bar)),
            Span::styled(columns.totals, style(self.theme.status_totals)),
            Span::styled(
                columns.logo,
                style(self.theme.status_logo).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(line, area);
    }
}
