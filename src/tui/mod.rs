//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates crossterm events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//!   ┌──────────── draw (only when something changed)
//!   │
//!   ├── terminal events (first blocks ≤100ms, then drain) ─┐
//!   │     (a timeout while work is pending sends a Tick)   │
//!   │                                                      ├─▶ update() ─▶ effects ─▶ Executor
//!   └── executor results (mpsc, drained without blocking) ─┘
//! ```
//!
//! `App` is owned by this loop and replaced by every `update()`. The
//! executor never sees it; its results come back through the channel.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::runtime::Handle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::executor::{Executor, PreviewStyle};
use crate::fs::LocalFileSystem;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Run `action` through `update()` and hand the resulting effects to the
/// executor. Returns the new state and whether a quit was requested.
fn dispatch(app: App, action: Action, executor: &Executor) -> (App, bool) {
    let (app, effects) = update(app, action);
    let mut quit = false;
    for effect in effects {
        if effect == Effect::Quit {
            quit = true;
        } else {
            executor.spawn(effect);
        }
    }
    (app, quit)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config, dirs::home_dir());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let executor = Executor::new(
        Arc::new(LocalFileSystem),
        tx,
        Handle::current(),
        PreviewStyle {
            syntax_theme: config.syntax_theme.clone(),
            text_fg: config.theme.file,
        },
    );

    for effect in app.init() {
        executor.spawn(effect);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, app, &executor, &rx);

    ratatui::restore();
    if let Err(e) = &result {
        warn!("Event loop ended with error: {}", e);
    }
    info!("fm shutting down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: App,
    executor: &Executor,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let size = terminal.size()?;
    let (mut app, mut should_quit) = dispatch(
        app,
        Action::Resize {
            width: size.width,
            height: size.height,
        },
        executor,
    );
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_none() && app.is_busy() {
            needs_redraw = true;
            (app, should_quit) = dispatch(app, Action::Tick, executor);
        }
        for action in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let (next, quit) = dispatch(app, action, executor);
            app = next;
            if quit {
                return Ok(());
            }
        }

        // Handle results from the executor
        for action in rx.try_iter() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let (next, quit) = dispatch(app, action, executor);
            app = next;
            should_quit |= quit;
        }
    }
    Ok(())
}
