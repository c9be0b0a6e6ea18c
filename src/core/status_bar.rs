//! # Status Bar
//!
//! Pure formatter for the bottom row:
//!
//! ```text
//! ┌───────────────┬──────────────────────────────┬───────┬──────┐
//! │ selected file │ status / command input       │  2/17 │  FM  │
//! └───────────────┴──────────────────────────────┴───────┴──────┘
//! ```
//!
//! Every call to [`StatusBar::columns`] recomputes the layout from the
//! stored fields, so nothing derived can go stale. Colours are applied by
//! the TUI component that draws these columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LOGO: &str = "FM";

/// Braille dot spinner shown beside the logo while background work runs.
pub const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    pub width: u16,
    pub selected_file: String,
    pub status: String,
    pub totals: String,
    pub logo: String,
}

/// The four columns, each already padded or truncated to its cell width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumns {
    pub selected_file: String,
    pub status: String,
    pub totals: String,
    pub logo: String,
}

impl StatusBar {
    pub fn set_size(&mut self, width: u16) {
        self.width = width;
    }

    pub fn set_content(&mut self, selected_file: String, status: String, totals: String, logo: String) {
        self.selected_file = selected_file;
        self.status = status;
        self.totals = totals;
        self.logo = logo;
    }

    pub fn columns(&self) -> StatusColumns {
        let total = usize::from(self.width);
        let totals_w = (self.totals.width() + 2).min(total);
        let logo_w = (self.logo.width() + 2).min(total - totals_w);
        let selected_w = (total / 4).min(total - totals_w - logo_w);
        let status_w = total - totals_w - logo_w - selected_w;

        StatusColumns {
            selected_file: fit(&format!(" {}", self.selected_file), selected_w),
            status: fit(&format!(" {}", self.status), status_w),
            totals: fit(&center(&self.totals, totals_w), totals_w),
            logo: fit(&center(&self.logo, logo_w), logo_w),
        }
    }
}

/// The logo column: plain, or prefixed with the spinner frame when busy.
pub fn logo(busy_frame: Option<usize>) -> String {
    match busy_frame {
        Some(frame) => format!("{} {LOGO}", SPINNER[frame % SPINNER.len()]),
        None => LOGO.to_string(),
    }
}

/// `"{n}/{total}"` with a 1-based position; `0/0` for an empty listing.
pub fn totals(cursor: usize, len: usize) -> String {
    if len == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", cursor + 1, len)
    }
}

fn center(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}{}", " ".repeat(pad / 2), s, " ".repeat(pad - pad / 2))
}

/// Pad with spaces or truncate with `…` so the result is exactly `width` cells.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}
