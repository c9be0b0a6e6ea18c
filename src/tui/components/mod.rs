//! # TUI Components
//!
//! Stateless, props-based widgets. Each borrows what it draws from the
//! core `App` for the duration of one frame:
//!
//! - `PaneView`: a bordered, scrolled `core::pane::Pane`
//! - `StatusBarView`: the coloured bottom row
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── pane_view.rs    (directory listing and preview panes)
//! └── status_bar.rs   (bottom row)
//! ```

mod pane_view;
mod status_bar;

pub use pane_view::PaneView;
pub use status_bar::StatusBarView;
