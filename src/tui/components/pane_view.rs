//! # PaneView Component
//!
//! Draws a core [`Pane`] as a bordered block: the border colour follows
//! `is_active`, the inner area shows exactly `Pane::visible_lines()`.
//!
//! The frame geometry matches the overhead the core subtracts in
//! `Pane::resize` (one border cell and one padding cell per side, one
//! border row top and bottom). A borderless pane still reserves the cells
//! and draws them blank, so its content area is the same size.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::border;
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::pane::Pane;
use crate::tui::component::Component;

pub struct PaneView<'a> {
    pub pane: &'a Pane,
    pub title: Option<String>,
    pub active_border: Color,
    pub inactive_border: Color,
    pub rounded: bool,
    pub borderless: bool,
}

impl PaneView<'_> {
    fn block(&self) -> Block<'static> {
        let color = if self.pane.is_active() {
            self.active_border
        } else {
            self.inactive_border
        };
        let mut block = Block::bordered()
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(color));
        block = if self.borderless {
            block.border_set(border::EMPTY)
        } else if self.rounded {
            block.border_type(BorderType::Rounded)
        } else {
            block.border_type(BorderType::Plain)
        };
        if let Some(title) = &self.title {
            block = block.title(format!(" {title} "));
        }
        block
    }
}

impl Component for PaneView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = Text::from(self.pane.visible_lines().to_vec());
        frame.render_widget(Paragraph::new(text).block(self.block()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::text::Line;

    fn render_to_rows(view: &mut PaneView<'_>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn numbered_pane(lines: usize, width: u16, height: u16) -> Pane {
        let mut pane = Pane::new(true);
        pane.resize(width, height);
        pane.set_content(Text::from(
            (0..lines)
                .map(|i| Line::from(format!("line {i}")))
                .collect::<Vec<_>>(),
        ));
        pane
    }

    fn view(pane: &Pane) -> PaneView<'_> {
        PaneView {
            pane,
            title: None,
            active_border: Color::Red,
            inactive_border: Color::White,
            rounded: false,
            borderless: false,
        }
    }

    #[test]
    fn test_draws_only_visible_window() {
        let mut pane = numbered_pane(20, 20, 6);
        pane.scroll_down(5);
        let rows = render_to_rows(&mut view(&pane), 20, 6);
        assert!(rows[0].starts_with('┌'));
        assert!(rows[1].starts_with("│ line 5"));
        assert!(rows[4].starts_with("│ line 8"));
        assert!(!rows.iter().any(|r| r.contains("line 9")));
    }

    #[test]
    fn test_rounded_and_titled() {
        let pane = numbered_pane(1, 20, 4);
        let mut v = view(&pane);
        v.rounded = true;
        v.title = Some("/work".to_string());
        let rows = render_to_rows(&mut v, 20, 4);
        assert!(rows[0].starts_with('╭'));
        assert!(rows[0].contains("/work"));
    }

    #[test]
    fn test_borderless_keeps_geometry() {
        let pane = numbered_pane(3, 20, 5);
        let mut v = view(&pane);
        v.borderless = true;
        let rows = render_to_rows(&mut v, 20, 5);
        assert!(rows[0].trim().is_empty());
        assert!(rows[1].starts_with("  line 0"));
    }

    #[test]
    fn test_border_colour_follows_activity() {
        let mut pane = numbered_pane(1, 10, 3);
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal.draw(|f| view(&pane).render(f, f.area())).unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 0)].fg, Color::Red);

        pane.set_active(false);
        terminal.draw(|f| view(&pane).render(f, f.area())).unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 0)].fg, Color::White);
    }
}
