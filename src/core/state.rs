//! # Application State
//!
//! Everything the controller knows, in one value. This module contains
//! domain logic only; drawing lives in the `tui` module.
//!
//! ```text
//! App
//! ├── primary: Pane                  // directory listing
//! ├── secondary: Pane                // file preview / help
//! ├── status_bar: StatusBar          // bottom row
//! ├── input: CommandInput            // `:` command bar
//! ├── active_pane: PaneId            // exactly one active
//! ├── mode: Mode                     // navigation / command / prompt
//! ├── key_sequence: KeySequence      // pending `g` of `gg`
//! ├── cwd / previous_directory       // where the listing came from
//! ├── entries + cursor               // listing and selection
//! ├── active_preview_source          // markdown to re-render on resize
//! ├── preview_path                   // file shown (or loading) in the preview
//! ├── last_error: Option<String>     // shown in the status bar
//! ├── listing_generation / preview_generation
//! └── *_pending + spinner_frame      // in-flight work, drawn as a spinner
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The helpers here keep the derived pieces (pane content, status bar,
//! input focus) in step with the fields they are derived from.

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::action::Effect;
use crate::core::command::CommandInput;
use crate::core::config::{ResolvedConfig, Theme};
use crate::core::listing;
use crate::core::pane::Pane;
use crate::core::status_bar::{self, StatusBar};
use crate::fs::DirectoryEntry;

/// Rows reserved below the panes.
pub const STATUS_BAR_HEIGHT: u16 = 1;

pub const COMMAND_PLACEHOLDER: &str = "enter command";

pub const HELP_TEXT: &str = r#"# fm

A terminal file manager.

## Navigation

| Key | Action |
|---|---|
| `j` / `↓` | move down |
| `k` / `↑` | move up |
| `gg` / `G` | jump to top / bottom |
| `l` / `→` / `enter` | open directory or preview file |
| `h` / `←` | parent directory |
| `~` / `-` | home / previous directory |
| `.` | toggle hidden files |
| `tab` | switch pane |
| `i` | show this help |
| `q` | quit |

## Commands

Press `:` and type one of:

- `mkdir <name>`
- `touch <name>`
- `mv <name>` or `rename <name>`
- `cp <destination>`
- `rm` or `delete`

`r` renames, `m` moves and `d` deletes the selected entry directly.
`esc` closes the command bar and shows this help again.
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Primary,
    Secondary,
}

/// A single-key prompt waiting for its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Rename,
    Move,
    Delete,
}

impl PendingAction {
    pub fn placeholder(self) -> &'static str {
        match self {
            PendingAction::Rename => "newfilename.ex",
            PendingAction::Move => "/usr/share/",
            PendingAction::Delete => "[y/n]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigation,
    /// The `:` command bar is open.
    Command,
    Confirming(PendingAction),
}

/// Progress through a two-key sequence. Only `gg` exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySequence {
    #[default]
    Idle,
    SawG,
}

#[derive(Debug, Clone)]
pub struct App {
    pub primary: Pane,
    pub secondary: Pane,
    pub status_bar: StatusBar,
    pub input: CommandInput,
    pub active_pane: PaneId,
    pub mode: Mode,
    /// False until the first resize has laid out the panes.
    pub ready: bool,
    pub screen_width: u16,
    pub screen_height: u16,
    pub cwd: PathBuf,
    pub previous_directory: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
    /// Markdown currently shown in the preview, kept so a resize can re-wrap it.
    pub active_preview_source: Option<String>,
    /// File the preview pane shows or is loading; `None` while help is shown.
    pub preview_path: Option<PathBuf>,
    pub key_sequence: KeySequence,
    pub entries: Vec<DirectoryEntry>,
    pub cursor: usize,
    pub show_hidden: bool,
    pub last_error: Option<String>,
    pub theme: Theme,
    pub rounded_panes: bool,
    pub borderless: bool,
    pub listing_generation: u64,
    pub preview_generation: u64,
    pub listing_pending: bool,
    pub preview_pending: bool,
    /// A submitted mutation has not reported back yet; further submits are ignored.
    pub mutation_pending: bool,
    pub spinner_frame: usize,
}

impl App {
    pub fn new(cwd: PathBuf, home_dir: Option<PathBuf>) -> Self {
        Self {
            primary: Pane::new(true),
            secondary: Pane::new(false),
            status_bar: StatusBar::default(),
            input: CommandInput::default(),
            active_pane: PaneId::Primary,
            mode: Mode::Navigation,
            ready: false,
            screen_width: 0,
            screen_height: 0,
            cwd,
            previous_directory: None,
            home_dir,
            active_preview_source: Some(HELP_TEXT.to_string()),
            preview_path: None,
            key_sequence: KeySequence::Idle,
            entries: Vec::new(),
            cursor: 0,
            show_hidden: false,
            last_error: None,
            theme: Theme::default(),
            rounded_panes: false,
            borderless: false,
            listing_generation: 0,
            preview_generation: 0,
            listing_pending: false,
            preview_pending: false,
            mutation_pending: false,
            spinner_frame: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig, home_dir: Option<PathBuf>) -> Self {
        Self {
            show_hidden: config.show_hidden,
            theme: config.theme.clone(),
            rounded_panes: config.rounded_panes,
            borderless: config.borderless,
            ..Self::new(config.start_dir.clone(), home_dir)
        }
    }

    /// Startup effects: the first listing of the start directory.
    pub fn init(&mut self) -> Vec<Effect> {
        let cwd = self.cwd.clone();
        vec![self.list_directory(cwd)]
    }

    pub fn show_command_bar(&self) -> bool {
        self.mode != Mode::Navigation
    }

    pub fn is_busy(&self) -> bool {
        self.listing_pending || self.preview_pending || self.mutation_pending
    }

    pub fn selected(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn set_active_pane(&mut self, id: PaneId) {
        self.active_pane = id;
        self.primary.set_active(id == PaneId::Primary);
        self.secondary.set_active(id == PaneId::Secondary);
    }

    /// Open the command bar (or a prompt) with a focused, empty input.
    pub fn enter_input_mode(&mut self, mode: Mode, placeholder: &str) {
        self.mode = mode;
        self.key_sequence = KeySequence::Idle;
        self.input.reset();
        self.input.focus(placeholder);
    }

    pub fn leave_input_mode(&mut self) {
        self.mode = Mode::Navigation;
        self.input.reset();
        self.input.blur();
    }

    /// Split the screen: primary gets half, secondary the rest, one status row.
    pub fn layout(&mut self) {
        let pane_height = self.screen_height.saturating_sub(STATUS_BAR_HEIGHT);
        let primary_width = self.screen_width / 2;
        self.primary.resize(primary_width, pane_height);
        self.secondary
            .resize(self.screen_width - primary_width, pane_height);
        self.status_bar.set_size(self.screen_width);
    }

    pub fn refresh_directory_pane(&mut self) {
        let text = listing::render(&self.entries, self.cursor, &self.theme);
        self.primary.set_content(text);
    }

    pub fn refresh_status_bar(&mut self) {
        let selected = self
            .selected()
            .map(|e| e.name.clone())
            .unwrap_or_default();
        let status = if self.show_command_bar() {
            self.input.view()
        } else if let Some(err) = &self.last_error {
            err.clone()
        } else {
            self.selected().map(|e| e.summary()).unwrap_or_default()
        };
        let totals = status_bar::totals(self.cursor, self.entries.len());
        let logo = status_bar::logo(self.is_busy().then_some(self.spinner_frame));
        self.status_bar.set_content(selected, status, totals, logo);
    }

    pub fn list_directory(&mut self, path: PathBuf) -> Effect {
        self.listing_generation += 1;
        self.listing_pending = true;
        debug!(
            "Listing {} (generation {})",
            path.display(),
            self.listing_generation
        );
        Effect::ListDirectory {
            path,
            show_hidden: self.show_hidden,
            generation: self.listing_generation,
        }
    }

    pub fn read_file(&mut self, path: PathBuf) -> Effect {
        self.preview_generation += 1;
        self.preview_pending = true;
        Effect::ReadFile {
            path,
            width: self.secondary.width(),
            height: self.secondary.height(),
            generation: self.preview_generation,
        }
    }

    pub fn render_markdown(&mut self, source: String) -> Effect {
        self.preview_generation += 1;
        self.preview_pending = true;
        Effect::RenderMarkdown {
            source,
            width: self.secondary.width(),
            generation: self.preview_generation,
        }
    }

    /// Resolve a command-bar argument against the listed directory.
    pub fn resolve_path(&self, arg: &str) -> PathBuf {
        let arg = Path::new(arg);
        if arg.is_absolute() {
            arg.to_path_buf()
        } else {
            self.cwd.join(arg)
        }
    }
}
