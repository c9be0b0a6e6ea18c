//! Width-wrapping for styled text.
//!
//! textwrap decides where lines break on the flattened string; the styles
//! are then mapped back onto the pieces cell by cell.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

/// Wrap every line of `text` that is wider than `width` cells.
pub fn wrap_text(text: Text<'static>, width: u16) -> Text<'static> {
    let width = usize::from(width);
    if width == 0 {
        return text;
    }
    let lines = text
        .lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect::<Vec<_>>();
    Text::from(lines)
}

pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let cells: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();
    let plain: String = cells.iter().map(|(c, _)| *c).collect();

    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let mut out = Vec::new();
    let mut pos = 0;
    for piece in textwrap::wrap(&plain, options) {
        let piece_chars: Vec<char> = piece.chars().collect();
        let Some(&first) = piece_chars.first() else {
            out.push(Line::default());
            continue;
        };
        // Whitespace eaten at the break point is not part of any piece.
        while pos < cells.len() && cells[pos].0 != first && cells[pos].0.is_whitespace() {
            pos += 1;
        }
        let end = (pos + piece_chars.len()).min(cells.len());
        out.push(styled_line(&cells[pos..end]));
        pos = end;
    }
    out
}

/// Rebuild spans from cells, merging runs that share a style.
fn styled_line(cells: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style: Option<Style> = None;
    for &(c, style) in cells {
        if current_style.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut current), current_style.unwrap_or_default()));
        }
        current_style = Some(style);
        current.push(c);
    }
    if let Some(style) = current_style {
        spans.push(Span::styled(current, style));
    }
    Line::from(spans)
}
