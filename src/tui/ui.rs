use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use unicode_width::UnicodeWidthStr;

use crate::core::command::PROMPT;
use crate::core::state::{App, STATUS_BAR_HEIGHT};
use crate::tui::component::Component;
use crate::tui::components::{PaneView, StatusBarView};

/// Two panes side by side over a one-row status bar. The split matches
/// `App::layout`, so the panes draw exactly the geometry the core scrolled.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};
    let [main_area, status_area] =
        Layout::vertical([Min(0), Length(STATUS_BAR_HEIGHT)]).areas(frame.area());
    let [primary_area, secondary_area] =
        Layout::horizontal([Length(main_area.width / 2), Min(0)]).areas(main_area);

    PaneView {
        pane: &app.primary,
        title: Some(app.cwd.display().to_string()),
        active_border: app.theme.active_border,
        inactive_border: app.theme.inactive_border,
        rounded: app.rounded_panes,
        borderless: app.borderless,
    }
    .render(frame, primary_area);

    PaneView {
        pane: &app.secondary,
        title: None,
        active_border: app.theme.active_border,
        inactive_border: app.theme.inactive_border,
        rounded: app.rounded_panes,
        borderless: app.borderless,
    }
    .render(frame, secondary_area);

    StatusBarView {
        bar: &app.status_bar,
        theme: &app.theme,
    }
    .render(frame, status_area);

    if app.input.is_focused() {
        frame.set_cursor_position(input_cursor(app, status_area));
    }
}

/// Terminal cell of the text cursor inside the status column.
fn input_cursor(app: &App, area: Rect) -> Position {
    let columns = app.status_bar.columns();
    let typed = &app.input.value()[..app.input.cursor()];
    let x = usize::from(area.x)
        + columns.selected_file.width()
        + 1 // leading space of the status column
        + PROMPT.width()
        + typed.width();
    let max_x = area.right().saturating_sub(1);
    Position::new(u16::try_from(x).unwrap_or(max_x).min(max_x), area.y)
}
