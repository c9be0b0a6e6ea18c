//! # File Preview
//!
//! Turns raw file bytes into the styled text shown in the secondary pane.
//! Everything here is CPU-bound and blocking; the executor runs it on the
//! blocking pool.
//!
//! | Kind      | Detected by                         | Renderer            |
//! |-----------|-------------------------------------|---------------------|
//! | Markdown  | `.md`, `.markdown`                  | [`markdown`]        |
//! | Image     | `.png`, `.jpg`, `.gif`, ...         | [`image`]           |
//! | Code      | any extension syntect knows         | [`highlight`]       |
//! | Plain     | valid UTF-8 otherwise               | tabs → spaces       |
//! | Binary    | not UTF-8                           | placeholder         |
//!
//! Failures never propagate: a broken image or unreadable file becomes a
//! one-line placeholder.

pub mod highlight;
pub mod image;
pub mod markdown;
pub mod wrap;

use std::path::Path;

use log::warn;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Markdown,
    Image,
    Text,
}

impl PreviewKind {
    pub fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if MARKDOWN_EXTENSIONS.contains(&ext.as_str()) {
            PreviewKind::Markdown
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            PreviewKind::Image
        } else {
            PreviewKind::Text
        }
    }
}

/// Rendering parameters that come from the pane geometry and the config.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u16,
    pub height: u16,
    pub syntax_theme: String,
    pub markdown_fg: Color,
}

/// A rendered file plus, for markdown, the source needed to re-render it
/// at a different width.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub text: Text<'static>,
    pub markdown_source: Option<String>,
}

impl Preview {
    fn plain(text: Text<'static>) -> Self {
        Self {
            text,
            markdown_source: None,
        }
    }
}

/// Build the preview for `path` from its raw bytes.
pub fn build(path: &Path, bytes: &[u8], opts: &RenderOptions) -> Preview {
    match PreviewKind::of(path) {
        PreviewKind::Image => match ::image::load_from_memory(bytes) {
            Ok(img) => Preview::plain(image::render(&img, opts.width, opts.height)),
            Err(e) => {
                warn!("Could not decode image {}: {}", path.display(), e);
                Preview::plain(placeholder(&format!("unable to decode image: {e}")))
            }
        },
        PreviewKind::Markdown => match std::str::from_utf8(bytes) {
            Ok(source) => Preview {
                text: render_markdown(source, opts),
                markdown_source: Some(source.to_string()),
            },
            Err(_) => Preview::plain(binary_placeholder(bytes.len())),
        },
        PreviewKind::Text => match std::str::from_utf8(bytes) {
            Ok(source) => Preview::plain(
                highlight::highlight_file(path, source, &opts.syntax_theme)
                    .unwrap_or_else(|| plain_text(source)),
            ),
            Err(_) => Preview::plain(binary_placeholder(bytes.len())),
        },
    }
}

pub fn render_markdown(source: &str, opts: &RenderOptions) -> Text<'static> {
    markdown::render(source, opts.width, opts.markdown_fg, &opts.syntax_theme)
}

/// Unhighlighted text with tabs expanded (ratatui draws `\t` as zero-width).
pub fn plain_text(source: &str) -> Text<'static> {
    let lines = source
        .lines()
        .map(|l| Line::from(l.replace('\t', "    ")))
        .collect::<Vec<_>>();
    Text::from(lines)
}

/// Dimmed one-liner shown in place of content that could not be rendered.
pub fn placeholder(message: &str) -> Text<'static> {
    Text::from(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
}

fn binary_placeholder(len: usize) -> Text<'static> {
    placeholder(&format!("binary file, {len} bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> RenderOptions {
        RenderOptions {
            width: 40,
            height: 10,
            syntax_theme: highlight::DEFAULT_THEME.to_string(),
            markdown_fg: Color::White,
        }
    }

    fn flatten(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_kind_by_extension() {
        assert_eq!(PreviewKind::of(Path::new("README.md")), PreviewKind::Markdown);
        assert_eq!(PreviewKind::of(Path::new("photo.JPG")), PreviewKind::Image);
        assert_eq!(PreviewKind::of(Path::new("main.rs")), PreviewKind::Text);
        assert_eq!(PreviewKind::of(Path::new("LICENSE")), PreviewKind::Text);
    }

    #[test]
    fn test_markdown_keeps_source() {
        let preview = build(Path::new("notes.md"), b"# Title\n\nbody", &opts());
        assert_eq!(preview.markdown_source.as_deref(), Some("# Title\n\nbody"));
        assert!(flatten(&preview.text).contains("Title"));
    }

    #[test]
    fn test_plain_text_expands_tabs() {
        let preview = build(Path::new("notes.zzz"), b"a\tb\nc", &opts());
        assert_eq!(preview.markdown_source, None);
        assert_eq!(flatten(&preview.text), "a    b\nc");
    }

    #[test]
    fn test_binary_gets_placeholder() {
        let preview = build(Path::new("blob.bin"), &[0xff, 0xfe, 0x00, 0x80], &opts());
        assert_eq!(flatten(&preview.text), "binary file, 4 bytes");
    }

    #[test]
    fn test_broken_image_gets_placeholder() {
        let preview = build(Path::new("broken.png"), b"not a png", &opts());
        assert!(flatten(&preview.text).starts_with("unable to decode image"));
        assert_eq!(preview.markdown_source, None);
    }
}
