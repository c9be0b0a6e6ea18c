use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the props pattern:
/// - They receive data via struct fields, borrowed from the core `App`.
/// - They render to a `Frame` within a given `Rect`.
/// - They never change core state; only `update()` does that.
///
/// `render` takes `&mut self` so a component may cache layout work
/// between the measuring and drawing halves of a render pass.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
