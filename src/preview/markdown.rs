//! Markdown → ratatui `Text` renderer.
//!
//! Walks `pulldown_cmark` events and keeps two stacks: inline styles
//! (emphasis, links, heading text) and enclosing blocks (quotes, lists,
//! code). Every emitted row is prefixed according to the block stack.
//! Fenced code with a known language is highlighted through
//! [`super::highlight`]. The result is wrapped to the pane width, so a
//! resize needs a fresh render from source.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::util::LinesWithEndings;

use super::highlight::{self, SYNTAX_SET};
use super::wrap::wrap_text;

const RULE_MAX: u16 = 80;
const FRAME: Color = Color::DarkGray;
const LINK: Color = Color::Cyan;

/// Render markdown `source` for a pane `width` cells wide.
pub fn render(source: &str, width: u16, fg: Color, code_theme: &str) -> Text<'static> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::new(fg, code_theme, width);
    for event in Parser::new_ext(source, options) {
        renderer.event(event);
    }
    wrap_text(Text::from(renderer.rows), width)
}

enum Block {
    Quote,
    /// `None` for bullets, otherwise the number of the next item.
    List(Option<u64>),
    Code(Option<HighlightLines<'static>>),
}

struct Renderer<'t> {
    rows: Vec<Line<'static>>,
    fg: Color,
    code_theme: &'t str,
    rule_width: u16,
    inline: Vec<Style>,
    blocks: Vec<Block>,
    link: Option<String>,
    /// A block just ended; the next one starts after an empty row.
    gap: bool,
}

impl<'t> Renderer<'t> {
    fn new(fg: Color, code_theme: &'t str, width: u16) -> Self {
        Self {
            rows: Vec::new(),
            fg,
            code_theme,
            rule_width: width.clamp(1, RULE_MAX),
            inline: Vec::new(),
            blocks: Vec::new(),
            link: None,
            gap: false,
        }
    }

    fn current_style(&self) -> Style {
        match self.inline.last() {
            Some(style) => *style,
            None => Style::default().fg(self.fg),
        }
    }

    fn with_style(&mut self, overlay: Style) {
        let style = self.current_style().patch(overlay);
        self.inline.push(style);
    }

    fn prefix(&self) -> Vec<Span<'static>> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Quote => Some(Span::styled("▌ ", Style::default().fg(FRAME))),
                Block::Code(_) => Some(Span::styled("│ ", Style::default().fg(FRAME))),
                Block::List(_) => None,
            })
            .collect()
    }

    fn row(&mut self, spans: Vec<Span<'static>>) {
        let mut line = self.prefix();
        line.extend(spans);
        self.rows.push(Line::from(line));
    }

    /// A row with no block prefix, used for code fences and rules.
    fn bare_row(&mut self, spans: Vec<Span<'static>>) {
        self.rows.push(Line::from(spans));
    }

    fn append(&mut self, span: Span<'static>) {
        match self.rows.last_mut() {
            Some(line) => line.push_span(span),
            None => self.row(vec![span]),
        }
    }

    fn begin_block(&mut self) {
        if self.gap {
            self.row(Vec::new());
            self.gap = false;
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text.replace('\t', "    ")),
            Event::Code(code) => self.append(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(FRAME),
            )),
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.row(Vec::new()),
            Event::Rule => {
                self.begin_block();
                let rule = "─".repeat(usize::from(self.rule_width));
                self.bare_row(vec![Span::styled(rule, Style::default().fg(FRAME))]);
                self.gap = true;
            }
            Event::TaskListMarker(done) => {
                self.append(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.begin_block();
                self.row(Vec::new());
            }
            Tag::Heading { level, .. } => {
                self.begin_block();
                let style = heading_style(self.fg, level);
                let marker = format!("{} ", "#".repeat(level as usize));
                self.row(vec![Span::styled(marker, style)]);
                self.inline.push(style);
            }
            Tag::BlockQuote(_) => {
                self.begin_block();
                self.blocks.push(Block::Quote);
                self.with_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => self.start_code(kind),
            Tag::List(first) => {
                if !self.blocks.iter().any(|b| matches!(b, Block::List(_))) {
                    self.begin_block();
                }
                self.blocks.push(Block::List(first));
            }
            Tag::Item => self.start_item(),
            Tag::Emphasis => self.with_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.with_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.with_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.with_style(link_style());
            }
            Tag::Image { .. } => {
                self.append(Span::styled("[image: ", Style::default().fg(FRAME)));
                self.with_style(Style::default().fg(FRAME));
            }
            _ => {}
        }
    }

    fn start_code(&mut self, kind: CodeBlockKind<'_>) {
        if !self.rows.is_empty() {
            self.row(Vec::new());
        }
        self.gap = false;

        let language = match &kind {
            CodeBlockKind::Fenced(lang) => lang.trim().to_string(),
            CodeBlockKind::Indented => String::new(),
        };
        let frame = Style::default().fg(FRAME);
        let mut top = vec![Span::styled("╭──", frame)];
        if !language.is_empty() {
            top.push(Span::styled(format!(" {language} "), frame.add_modifier(Modifier::BOLD)));
            top.push(Span::styled("──", frame));
        }
        self.bare_row(top);

        let highlighter = if language.is_empty() {
            None
        } else {
            SYNTAX_SET
                .find_syntax_by_token(&language)
                .map(|syntax| HighlightLines::new(syntax, highlight::theme(self.code_theme)))
        };
        self.blocks.push(Block::Code(highlighter));
    }

    fn start_item(&mut self) {
        let depth = self
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::List(_)))
            .count()
            .saturating_sub(1);
        let marker = match self.blocks.last_mut() {
            Some(Block::List(Some(n))) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            _ => "• ".to_string(),
        };
        let indent = "  ".repeat(depth);
        self.row(vec![Span::styled(
            format!("{indent}{marker}"),
            Style::default().fg(FRAME),
        )]);
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) | TagEnd::BlockQuote(_) => {
                if matches!(tag, TagEnd::BlockQuote(_)) {
                    self.blocks.pop();
                }
                self.inline.pop();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.blocks.pop();
                self.bare_row(vec![Span::styled("╰──", Style::default().fg(FRAME))]);
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.blocks.pop();
                self.gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.link.take() {
                    self.append(Span::raw(" ("));
                    self.append(Span::styled(url, link_style()));
                    self.append(Span::raw(")"));
                }
            }
            TagEnd::Image => {
                self.inline.pop();
                self.append(Span::styled("]", Style::default().fg(FRAME)));
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let code_rows: Option<Vec<Vec<Span<'static>>>> = match self.blocks.last_mut() {
            Some(Block::Code(Some(hl))) => Some(
                LinesWithEndings::from(text)
                    .map(|line| highlight::highlight_line(hl, line))
                    .collect(),
            ),
            Some(Block::Code(None)) => Some(
                text.lines()
                    .map(|line| vec![Span::styled(line.to_owned(), Style::default().fg(Color::White))])
                    .collect(),
            ),
            _ => None,
        };

        match code_rows {
            Some(rows) => rows.into_iter().for_each(|spans| self.row(spans)),
            None => {
                let style = self.current_style();
                self.append(Span::styled(text.to_owned(), style));
            }
        }
    }
}

fn link_style() -> Style {
    Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED)
}

fn heading_style(fg: Color, level: HeadingLevel) -> Style {
    let emphasis = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    Style::default().fg(fg).add_modifier(emphasis)
}
