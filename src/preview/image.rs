//! Images as coloured half-block glyphs.
//!
//! Each terminal cell shows two vertically stacked pixels: `▀` with the
//! upper pixel as foreground and the lower pixel as background.

use image::DynamicImage;
use image::imageops::FilterType;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

/// Scale `img` to fit `width × height` cells (keeping aspect ratio) and
/// centre it horizontally.
pub fn render(img: &DynamicImage, width: u16, height: u16) -> Text<'static> {
    let cols = u32::from(width.max(1));
    let pixel_rows = u32::from(height.max(1)) * 2;

    let scaled = img.resize(cols, pixel_rows, FilterType::Triangle).to_rgb8();
    let (w, h) = scaled.dimensions();
    let pad = " ".repeat(((cols.saturating_sub(w)) / 2) as usize);

    let mut lines = Vec::with_capacity(h.div_ceil(2) as usize);
    for y in (0..h).step_by(2) {
        let mut spans = Vec::with_capacity(w as usize + 1);
        if !pad.is_empty() {
            spans.push(Span::raw(pad.clone()));
        }
        for x in 0..w {
            let top = rgb(scaled.get_pixel(x, y));
            let style = if y + 1 < h {
                Style::default().fg(top).bg(rgb(scaled.get_pixel(x, y + 1)))
            } else {
                Style::default().fg(top)
            };
            spans.push(Span::styled("▀", style));
        }
        lines.push(Line::from(spans));
    }
    Text::from(lines)
}

fn rgb(p: &image::Rgb<u8>) -> Color {
    Color::Rgb(p[0], p[1], p[2])
}
