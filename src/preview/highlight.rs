//! Syntax highlighting with syntect.
//!
//! The syntax and theme sets are loaded once, on first use, and shared by
//! the file previewer and the markdown code-fence renderer.

use std::path::Path;
use std::sync::LazyLock;

use log::warn;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);
static PLAIN_THEME: LazyLock<Theme> = LazyLock::new(Theme::default);

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Look up a bundled theme, falling back to [`DEFAULT_THEME`].
pub fn theme(name: &str) -> &'static Theme {
    if let Some(theme) = THEME_SET.themes.get(name) {
        return theme;
    }
    warn!("Unknown syntax theme '{name}', using {DEFAULT_THEME}");
    THEME_SET
        .themes
        .get(DEFAULT_THEME)
        .unwrap_or_else(|| LazyLock::force(&PLAIN_THEME))
}

/// Highlight one line (with its trailing newline) into owned spans.
/// A line syntect cannot parse comes back unstyled.
pub fn highlight_line(hl: &mut HighlightLines<'static>, line: &str) -> Vec<Span<'static>> {
    match hl.highlight_line(line, &SYNTAX_SET) {
        Ok(ranges) => ranges
            .into_iter()
            .filter_map(|(style, frag)| {
                let content = frag.trim_end_matches(['\n', '\r']).replace('\t', "    ");
                if content.is_empty() {
                    return None;
                }
                let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                Some(Span::styled(content, Style::default().fg(fg)))
            })
            .collect(),
        Err(e) => {
            warn!("Highlighting failed: {e}");
            vec![Span::raw(line.trim_end_matches(['\n', '\r']).replace('\t', "    "))]
        }
    }
}

/// Highlight a whole file, picking the syntax from its extension.
/// Returns `None` when no bundled syntax matches.
pub fn highlight_file(path: &Path, source: &str, theme_name: &str) -> Option<Text<'static>> {
    let ext = path.extension()?.to_str()?;
    let syntax = SYNTAX_SET.find_syntax_by_extension(ext)?;
    let mut hl = HighlightLines::new(syntax, theme(theme_name));
    let lines = LinesWithEndings::from(source)
        .map(|line| Line::from(highlight_line(&mut hl, line)))
        .collect::<Vec<_>>();
    Some(Text::from(lines))
}
