//! Directory listing → styled lines for the primary pane.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::config::Theme;
use crate::fs::DirectoryEntry;

pub const EMPTY_DIRECTORY: &str = "(empty directory)";

/// One line per entry; directories get a trailing `/`, the selected line is
/// drawn bold in the selection colour.
pub fn render(entries: &[DirectoryEntry], cursor: usize, theme: &Theme) -> Text<'static> {
    if entries.is_empty() {
        return Text::from(Line::from(Span::styled(
            EMPTY_DIRECTORY,
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )));
    }

    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (label, color) = if entry.is_dir {
                (format!("{}/", entry.name), theme.directory)
            } else {
                (entry.name.clone(), theme.file)
            };
            let style = if i == cursor {
                Style::default()
                    .fg(theme.selected)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Line::from(Span::styled(label, style))
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    #[test]
    fn test_one_line_per_entry_with_dir_suffix() {
        let entries = vec![entry("a.txt", false), entry("b", true)];
        let text = render(&entries, 0, &Theme::default());
        let labels: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans[0].content.to_string())
            .collect();
        assert_eq!(labels, vec!["a.txt", "b/"]);
    }

    #[test]
    fn test_selected_line_is_highlighted() {
        let theme = Theme::default();
        let entries = vec![entry("a.txt", false), entry("b", true)];
        let text = render(&entries, 1, &theme);
        assert_eq!(text.lines[1].spans[0].style.fg, Some(theme.selected));
        assert!(text.lines[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text.lines[0].spans[0].style.fg, Some(theme.file));
    }

    #[test]
    fn test_empty_listing_placeholder() {
        let text = render(&[], 0, &Theme::default());
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].spans[0].content, EMPTY_DIRECTORY);
    }
}
