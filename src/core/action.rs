//! # Actions
//!
//! Everything that can happen in fm becomes an `Action`.
//! User presses `j`? That's `Action::Key(Key::Char('j'))`.
//! A listing finishes? That's `Action::DirectoryLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, then
//! returns the new state plus the `Effect`s to run. No I/O here; the
//! executor performs effects and feeds their results back in as actions.
//!
//! ```text
//! State + Action  →  update()  →  (New State, [Effect])
//!                                          │
//!        Action ◀── executor ◀─────────────┘
//! ```
//!
//! Async results can arrive late and out of order. Listings carry
//! `listing_generation`, previews carry `preview_generation`; a result
//! whose generation is not the latest issued is dropped.
//!
//! A resize re-requests whatever the preview depends on: markdown is
//! re-rendered from source, an image (or a markdown file still loading) is
//! read again at the new size. Plain text does not depend on the pane size,
//! so its read is left alone and its result still lands.

use std::path::PathBuf;

use log::{debug, info, warn};
use ratatui::text::Text;

use crate::core::command::Command;
use crate::core::state::{
    App, COMMAND_PLACEHOLDER, HELP_TEXT, KeySequence, Mode, PaneId, PendingAction,
};
use crate::fs::{DirectoryEntry, FsError, Mutation};
use crate::preview::{Preview, PreviewKind};

/// Lines moved per mouse wheel notch.
pub const WHEEL_STEP: usize = 3;

/// Keys the controller understands, already stripped of terminal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    WheelUp,
    WheelDown,
}

#[derive(Debug)]
pub enum Action {
    Resize {
        width: u16,
        height: u16,
    },
    Key(Key),
    Mouse(MouseKind),
    DirectoryLoaded {
        path: PathBuf,
        result: Result<Vec<DirectoryEntry>, FsError>,
        generation: u64,
    },
    FileContentLoaded {
        path: PathBuf,
        preview: Preview,
        generation: u64,
    },
    RenderCompleted {
        text: Text<'static>,
        generation: u64,
    },
    MutationCompleted(Result<(), FsError>),
    /// Periodic wake-up from the event loop; advances the spinner.
    Tick,
}

/// Deferred work for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListDirectory {
        path: PathBuf,
        show_hidden: bool,
        generation: u64,
    },
    ReadFile {
        path: PathBuf,
        width: u16,
        height: u16,
        generation: u64,
    },
    RenderMarkdown {
        source: String,
        width: u16,
        generation: u64,
    },
    Mutate(Mutation),
    Quit,
}

pub fn update(mut app: App, action: Action) -> (App, Vec<Effect>) {
    let effects = match action {
        Action::Resize { width, height } => resize(&mut app, width, height),
        Action::Key(key) => handle_key(&mut app, key),
        Action::Mouse(kind) => {
            handle_mouse(&mut app, kind);
            Vec::new()
        }
        Action::DirectoryLoaded {
            path,
            result,
            generation,
        } => {
            directory_loaded(&mut app, path, result, generation);
            Vec::new()
        }
        Action::FileContentLoaded {
            path,
            preview,
            generation,
        } => {
            if generation == app.preview_generation {
                debug!("Preview loaded for {}", path.display());
                app.preview_pending = false;
                app.secondary.set_content(preview.text);
                app.active_preview_source = preview.markdown_source;
            } else {
                debug!(
                    "Discarding stale preview of {} (generation {generation}, latest {})",
                    path.display(),
                    app.preview_generation
                );
            }
            Vec::new()
        }
        Action::RenderCompleted { text, generation } => {
            if generation == app.preview_generation {
                app.preview_pending = false;
                app.secondary.set_content(text);
            } else {
                debug!(
                    "Discarding stale render (generation {generation}, latest {})",
                    app.preview_generation
                );
            }
            Vec::new()
        }
        Action::MutationCompleted(result) => {
            app.mutation_pending = false;
            if let Err(e) = result {
                warn!("Mutation failed: {}", e);
                app.last_error = Some(e.to_string());
            }
            app.leave_input_mode();
            let cwd = app.cwd.clone();
            vec![app.list_directory(cwd)]
        }
        Action::Tick => {
            if app.is_busy() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            Vec::new()
        }
    };
    app.refresh_status_bar();
    (app, effects)
}

fn resize(app: &mut App, width: u16, height: u16) -> Vec<Effect> {
    app.screen_width = width;
    app.screen_height = height;
    app.layout();

    if app.ready {
        let last = app.entries.len().saturating_sub(1);
        app.cursor = app.primary.clamp_into_view(app.cursor).min(last);
    } else {
        info!("First resize {width}x{height}, ready");
        app.ready = true;
    }
    app.refresh_directory_pane();

    if let Some(source) = app.active_preview_source.clone() {
        return vec![app.render_markdown(source)];
    }
    match app.preview_path.clone() {
        Some(path) if PreviewKind::of(&path) != PreviewKind::Text => vec![app.read_file(path)],
        _ => Vec::new(),
    }
}

fn handle_mouse(app: &mut App, kind: MouseKind) {
    if app.show_command_bar() {
        return;
    }
    match kind {
        MouseKind::WheelUp => move_up(app, WHEEL_STEP),
        MouseKind::WheelDown => move_down(app, WHEEL_STEP),
    }
}

fn handle_key(app: &mut App, key: Key) -> Vec<Effect> {
    if key == Key::CtrlC {
        return vec![Effect::Quit];
    }
    match app.mode {
        Mode::Navigation => navigation_key(app, key),
        Mode::Command | Mode::Confirming(_) => input_key(app, key),
    }
}

fn navigation_key(app: &mut App, key: Key) -> Vec<Effect> {
    if key == Key::Char('g') {
        match app.key_sequence {
            KeySequence::SawG => {
                app.key_sequence = KeySequence::Idle;
                goto_top(app);
            }
            KeySequence::Idle => app.key_sequence = KeySequence::SawG,
        }
        return Vec::new();
    }
    app.key_sequence = KeySequence::Idle;

    match key {
        Key::Char('q') => return vec![Effect::Quit],
        Key::Char('j') | Key::Down => move_down(app, 1),
        Key::Char('k') | Key::Up => move_up(app, 1),
        Key::Char('G') => goto_bottom(app),
        Key::Tab => {
            let next = match app.active_pane {
                PaneId::Primary => PaneId::Secondary,
                PaneId::Secondary => PaneId::Primary,
            };
            app.set_active_pane(next);
        }
        Key::Char('l') | Key::Right | Key::Enter => return open_selected(app),
        Key::Char('h') | Key::Left => {
            if app.active_pane == PaneId::Primary
                && let Some(parent) = app.cwd.parent().map(PathBuf::from)
            {
                app.previous_directory = Some(app.cwd.clone());
                return navigate(app, parent);
            }
        }
        Key::Char('.') => {
            if app.active_pane == PaneId::Primary {
                app.show_hidden = !app.show_hidden;
                let cwd = app.cwd.clone();
                return vec![app.list_directory(cwd)];
            }
        }
        Key::Char('~') => {
            if let Some(home) = app.home_dir.clone() {
                return navigate(app, home);
            }
        }
        Key::Char('-') => {
            if let Some(previous) = app.previous_directory.clone() {
                return navigate(app, previous);
            }
        }
        Key::Char('i') => return show_help(app),
        Key::Char(':') => app.enter_input_mode(Mode::Command, COMMAND_PLACEHOLDER),
        Key::Char('r') => prompt(app, PendingAction::Rename),
        Key::Char('m') => prompt(app, PendingAction::Move),
        Key::Char('d') => prompt(app, PendingAction::Delete),
        Key::Esc => return escape(app),
        _ => {}
    }
    Vec::new()
}

fn input_key(app: &mut App, key: Key) -> Vec<Effect> {
    match key {
        Key::Esc => return escape(app),
        Key::Enter => return submit(app),
        Key::Char(c) => app.input.insert(c),
        Key::Backspace => app.input.backspace(),
        Key::Delete => app.input.delete(),
        Key::Left => app.input.move_left(),
        Key::Right => app.input.move_right(),
        Key::Home => app.input.move_home(),
        Key::End => app.input.move_end(),
        Key::Up | Key::Down | Key::Tab | Key::CtrlC => {}
    }
    Vec::new()
}

/// Close any input, show the help again and hand focus back to the listing.
fn escape(app: &mut App) -> Vec<Effect> {
    app.leave_input_mode();
    app.key_sequence = KeySequence::Idle;
    app.set_active_pane(PaneId::Primary);
    show_help(app)
}

fn show_help(app: &mut App) -> Vec<Effect> {
    app.secondary.goto_top();
    app.preview_path = None;
    app.active_preview_source = Some(HELP_TEXT.to_string());
    vec![app.render_markdown(HELP_TEXT.to_string())]
}

fn prompt(app: &mut App, pending: PendingAction) {
    if app.entries.is_empty() {
        return;
    }
    app.enter_input_mode(Mode::Confirming(pending), pending.placeholder());
}

/// User-initiated directory change; clears any error left by the last one.
fn navigate(app: &mut App, path: PathBuf) -> Vec<Effect> {
    app.last_error = None;
    vec![app.list_directory(path)]
}

fn open_selected(app: &mut App) -> Vec<Effect> {
    if app.active_pane != PaneId::Primary {
        return Vec::new();
    }
    let Some(entry) = app.selected().cloned() else {
        return Vec::new();
    };
    if entry.is_dir {
        navigate(app, entry.path)
    } else {
        app.secondary.goto_top();
        app.active_preview_source = None;
        app.preview_path = Some(entry.path.clone());
        vec![app.read_file(entry.path)]
    }
}

// ============================================================================
// Cursor and scrolling
// ============================================================================

/// Redraw the listing for the new cursor and drag the viewport along.
fn select(app: &mut App) {
    app.refresh_directory_pane();
    app.primary.follow(app.cursor);
}

fn move_up(app: &mut App, n: usize) {
    match app.active_pane {
        PaneId::Primary => {
            app.cursor = app.cursor.saturating_sub(n);
            select(app);
        }
        PaneId::Secondary => app.secondary.scroll_up(n),
    }
}

fn move_down(app: &mut App, n: usize) {
    match app.active_pane {
        PaneId::Primary => {
            let last = app.entries.len().saturating_sub(1);
            app.cursor = app.cursor.saturating_add(n).min(last);
            select(app);
        }
        PaneId::Secondary => app.secondary.scroll_down(n),
    }
}

fn goto_top(app: &mut App) {
    match app.active_pane {
        PaneId::Primary => {
            app.cursor = 0;
            select(app);
        }
        PaneId::Secondary => app.secondary.goto_top(),
    }
}

fn goto_bottom(app: &mut App) {
    match app.active_pane {
        PaneId::Primary => {
            app.cursor = app.entries.len().saturating_sub(1);
            select(app);
        }
        PaneId::Secondary => app.secondary.goto_bottom(),
    }
}

// ============================================================================
// Async results
// ============================================================================

fn directory_loaded(
    app: &mut App,
    path: PathBuf,
    result: Result<Vec<DirectoryEntry>, FsError>,
    generation: u64,
) {
    if generation != app.listing_generation {
        debug!(
            "Discarding stale listing of {} (generation {generation}, latest {})",
            path.display(),
            app.listing_generation
        );
        return;
    }
    app.listing_pending = false;
    app.entries = match result {
        Ok(entries) => {
            debug!("Listed {} ({} entries)", path.display(), entries.len());
            entries
        }
        Err(e) => {
            warn!("Listing {} failed: {}", path.display(), e);
            app.last_error = Some(e.to_string());
            Vec::new()
        }
    };
    app.cwd = path;
    app.cursor = 0;
    app.leave_input_mode();
    app.primary.goto_top();
    app.refresh_directory_pane();
}

// ============================================================================
// Command dispatch
// ============================================================================

fn submit(app: &mut App) -> Vec<Effect> {
    if app.mutation_pending {
        debug!("Ignoring submit while a mutation is in flight");
        return Vec::new();
    }
    let line = app.input.value().to_string();
    match app.mode {
        Mode::Command => dispatch_command(app, &line),
        Mode::Confirming(pending) => dispatch_prompt(app, pending, line.trim()),
        Mode::Navigation => Vec::new(),
    }
}

fn dispatch_command(app: &mut App, line: &str) -> Vec<Effect> {
    let mutation = match Command::parse(line) {
        Command::Empty => return Vec::new(),
        Command::MakeDirectory(arg) => {
            named(app, "mkdir", &arg).map(Mutation::CreateDirectory)
        }
        Command::Touch(arg) => named(app, "touch", &arg).map(Mutation::CreateFile),
        Command::Rename(arg) => rename(app, "mv", &arg),
        Command::Copy(arg) => move_or_copy(app, "cp", &arg, false),
        Command::Delete => delete(app, "rm"),
        Command::Unknown(name) => Err(format!("unknown command: {name}")),
    };
    issue(app, mutation)
}

fn dispatch_prompt(app: &mut App, pending: PendingAction, answer: &str) -> Vec<Effect> {
    let mutation = match pending {
        PendingAction::Rename => rename(app, "rename", answer),
        PendingAction::Move => move_or_copy(app, "move", answer, true),
        PendingAction::Delete if answer == "y" => delete(app, "delete"),
        PendingAction::Delete => {
            app.leave_input_mode();
            return Vec::new();
        }
    };
    issue(app, mutation)
}

/// Hand a valid mutation to the executor, or report why it was refused.
/// The input stays open until `MutationCompleted` arrives.
fn issue(app: &mut App, mutation: Result<Mutation, String>) -> Vec<Effect> {
    match mutation {
        Ok(mutation) => {
            info!("Dispatching {}: {:?}", mutation.label(), mutation);
            app.last_error = None;
            app.mutation_pending = true;
            vec![Effect::Mutate(mutation)]
        }
        Err(message) => {
            info!("Command refused: {}", message);
            app.leave_input_mode();
            app.last_error = Some(message);
            Vec::new()
        }
    }
}

fn named(app: &App, command: &str, arg: &str) -> Result<PathBuf, String> {
    if arg.is_empty() {
        Err(format!("{command}: missing name"))
    } else {
        Ok(app.resolve_path(arg))
    }
}

fn selection(app: &App, command: &str) -> Result<DirectoryEntry, String> {
    app.selected()
        .cloned()
        .ok_or_else(|| format!("{command}: nothing selected"))
}

fn rename(app: &App, command: &str, arg: &str) -> Result<Mutation, String> {
    let entry = selection(app, command)?;
    let to = named(app, command, arg)?;
    Ok(Mutation::Rename {
        from: entry.path,
        to,
    })
}

fn move_or_copy(app: &App, command: &str, arg: &str, is_move: bool) -> Result<Mutation, String> {
    let entry = selection(app, command)?;
    let to = named(app, command, arg)?;
    Ok(Mutation::MoveOrCopy {
        from: entry.path,
        to,
        is_move,
    })
}

fn delete(app: &App, command: &str) -> Result<Mutation, String> {
    let entry = selection(app, command)?;
    Ok(Mutation::Delete {
        path: entry.path,
        is_dir: entry.is_dir,
    })
}
