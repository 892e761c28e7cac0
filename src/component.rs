//! Component system - trait and lifecycle for UI elements

use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components are retained structures with immediate-mode rendering:
/// the tree and its state persist between frames, while `render()` issues
/// fresh drawing commands each pass from the current state and theme tokens.
pub trait Component: EventHandler {
    /// Render the component into the given rectangle
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()>;

    /// Minimum size needed for this component (optional)
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Called once when the component is attached to a host
    fn on_mount(&mut self) {}

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true
    }

    /// Component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}
