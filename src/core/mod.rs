//! # Core Application Logic
//!
//! fm's controller. It knows nothing about any specific UI technology and
//! performs no I/O: disk and rendering work is described as `Effect`s and
//! handed to the executor.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Executor  │
//!           │  Adapter   │              │  (tokio)   │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: `Action`, `Effect` and the `update()` transition function
//! - [`pane`]: Scrollable viewport model
//! - [`status_bar`]: Bottom-row formatter
//! - [`command`]: Command-bar parser and text field
//! - [`listing`]: Directory entries → styled lines
//! - [`config`]: `~/.fm/config.toml` loading and resolution

pub mod action;
pub mod command;
pub mod config;
pub mod listing;
pub mod pane;
pub mod state;
pub mod status_bar;
