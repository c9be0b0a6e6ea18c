//! # Pane
//!
//! A bordered, scrollable viewport. The pane owns its content and scroll
//! offset; every input is clamped, nothing is ever rejected.
//!
//! ```text
//! ┌──────────────┐  ─┐
//! │ line y_offset│   │
//! │ ...          │   │ height (inner)
//! │ line bottom  │   │
//! └──────────────┘  ─┘
//! ```

use ratatui::text::{Line, Text};

/// Border (1 + 1) plus horizontal padding (1 + 1).
pub const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top and bottom border.
pub const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pane {
    content: Text<'static>,
    /// First visible content line.
    y_offset: usize,
    /// Inner (content) size; outer size minus the frame.
    width: u16,
    height: u16,
    is_active: bool,
}

impl Pane {
    pub fn new(is_active: bool) -> Self {
        Self {
            is_active,
            ..Self::default()
        }
    }

    /// Recompute the inner size from the outer `width × height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.height = height.saturating_sub(VERTICAL_OVERHEAD);
        self.clamp_offset();
    }

    pub fn set_content(&mut self, content: Text<'static>) {
        self.content = content;
        self.clamp_offset();
    }

    pub fn line_count(&self) -> usize {
        self.content.lines.len()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn max_offset(&self) -> usize {
        self.line_count().saturating_sub(usize::from(self.height))
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_add(n).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    /// Index of the last visible line (equal to the top when the pane has no rows).
    pub fn bottom_line(&self) -> usize {
        self.y_offset + usize::from(self.height).saturating_sub(1)
    }

    /// Scroll by the minimum amount that puts `line` on screen.
    pub fn follow(&mut self, line: usize) {
        if self.height == 0 {
            return;
        }
        if line < self.y_offset {
            self.scroll_up(self.y_offset - line);
        } else if line > self.bottom_line() {
            self.scroll_down(line - self.bottom_line());
        }
    }

    /// Leave the viewport alone and pull `line` into it instead.
    pub fn clamp_into_view(&self, line: usize) -> usize {
        line.clamp(self.y_offset, self.bottom_line())
    }

    pub fn visible_lines(&self) -> &[Line<'static>] {
        let start = self.y_offset.min(self.content.lines.len());
        let end = (start + usize::from(self.height)).min(self.content.lines.len());
        &self.content.lines[start..end]
    }

    fn clamp_offset(&mut self) {
        self.y_offset = self.y_offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Text<'static> {
        Text::from((0..n).map(|i| Line::from(i.to_string())).collect::<Vec<_>>())
    }

    fn pane_with(lines: usize, outer_height: u16) -> Pane {
        let mut pane = Pane::new(true);
        pane.resize(40, outer_height);
        pane.set_content(numbered(lines));
        pane
    }

    #[test]
    fn test_resize_subtracts_frame() {
        let mut pane = Pane::new(false);
        pane.resize(40, 20);
        assert_eq!(pane.width(), 36);
        assert_eq!(pane.height(), 18);

        pane.resize(3, 1);
        assert_eq!(pane.width(), 0);
        assert_eq!(pane.height(), 0);
    }

    #[test]
    fn test_scroll_clamps_to_range() {
        let mut pane = pane_with(20, 12); // 10 visible rows
        assert_eq!(pane.max_offset(), 10);

        pane.scroll_down(3);
        assert_eq!(pane.y_offset(), 3);
        pane.scroll_down(100);
        assert_eq!(pane.y_offset(), 10);
        pane.scroll_up(4);
        assert_eq!(pane.y_offset(), 6);
        pane.scroll_up(100);
        assert_eq!(pane.y_offset(), 0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut pane = pane_with(3, 12);
        pane.scroll_down(5);
        assert_eq!(pane.y_offset(), 0);
        pane.goto_bottom();
        assert_eq!(pane.y_offset(), 0);
    }

    #[test]
    fn test_set_content_clamps_offset() {
        let mut pane = pane_with(50, 12);
        pane.goto_bottom();
        assert_eq!(pane.y_offset(), 40);
        pane.set_content(numbered(15));
        assert_eq!(pane.y_offset(), 5);
    }

    #[test]
    fn test_follow_is_edge_triggered() {
        let mut pane = pane_with(50, 12); // rows 0..=9 visible

        pane.follow(5);
        assert_eq!(pane.y_offset(), 0, "visible line must not scroll");

        pane.follow(12);
        assert_eq!(pane.y_offset(), 3, "scroll down by exactly the excess");
        assert_eq!(pane.bottom_line(), 12);

        pane.follow(1);
        assert_eq!(pane.y_offset(), 1, "scroll up by exactly the deficit");
    }

    #[test]
    fn test_clamp_into_view() {
        let mut pane = pane_with(50, 12);
        pane.scroll_down(10); // rows 10..=19
        assert_eq!(pane.clamp_into_view(2), 10);
        assert_eq!(pane.clamp_into_view(15), 15);
        assert_eq!(pane.clamp_into_view(30), 19);
    }

    #[test]
    fn test_visible_lines_window() {
        let mut pane = pane_with(50, 5); // 3 rows
        pane.scroll_down(4);
        let visible: Vec<String> = pane
            .visible_lines()
            .iter()
            .map(|l| l.spans[0].content.to_string())
            .collect();
        assert_eq!(visible, vec!["4", "5", "6"]);
    }
}
