//! Checkbox component with checked, unchecked and indeterminate states

use crate::component::Component;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;

/// Change callback, invoked with the new checked state
pub type OnChange = Box<dyn FnMut(bool)>;

/// Checkbox component
pub struct Checkbox {
    /// Label displayed after the box
    label: String,
    checked: bool,
    /// Indeterminate overrides the checked glyph until the next toggle
    indeterminate: bool,
    disabled: bool,
    focused: bool,
    dirty: bool,
    on_change: Option<OnChange>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Checkbox {
            label: label.into(),
            checked: false,
            indeterminate: false,
            disabled: false,
            focused: false,
            dirty: true,
            on_change: None,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(bool) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.indeterminate = false;
            self.dirty = true;
        }
    }

    /// Toggle; indeterminate resolves to checked
    pub fn toggle(&mut self) {
        if self.disabled {
            return;
        }
        self.checked = self.indeterminate || !self.checked;
        self.indeterminate = false;
        self.dirty = true;
        let checked = self.checked;
        if let Some(callback) = &mut self.on_change {
            callback(checked);
        }
    }

    fn glyph(&self) -> &'static str {
        if self.indeterminate {
            "[-]"
        } else if self.checked {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

impl EventHandler for Checkbox {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::Key(Key::Char(' ')) | Event::Key(Key::Enter) => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for Checkbox {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        if bounds.width == 0 || bounds.height == 0 {
            self.dirty = false;
            return Ok(());
        }

        let box_style = if self.disabled {
            theme.outline_variant_style()
        } else if self.focused {
            theme.focus_style()
        } else if self.checked || self.indeterminate {
            theme.primary_style()
        } else {
            theme.on_surface_variant_style()
        };
        renderer.write_styled(bounds.x, bounds.y, &box_style, self.glyph())?;

        let label_style = if self.disabled {
            theme.outline_variant_style()
        } else {
            theme.on_surface_style()
        };
        let max_label = bounds.width.saturating_sub(4) as usize;
        let label: String = self.label.chars().take(max_label).collect();
        if !label.is_empty() {
            renderer.write_styled(bounds.x + 4, bounds.y, &label_style, &label)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.label.chars().count() as u16 + 4, 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Checkbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_toggle_flips_state_and_notifies() {
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut checkbox = Checkbox::new("Accept").on_change(move |checked| {
            sink.borrow_mut().push(checked);
        });

        assert!(checkbox.handle_event(&Event::Key(Key::Char(' '))));
        assert!(checkbox.is_checked());
        assert!(checkbox.handle_event(&Event::Key(Key::Enter)));
        assert!(!checkbox.is_checked());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_indeterminate_resolves_to_checked() {
        let mut checkbox = Checkbox::new("Some").with_indeterminate(true);
        assert_eq!(checkbox.glyph(), "[-]");
        checkbox.toggle();
        assert!(checkbox.is_checked());
        assert_eq!(checkbox.glyph(), "[x]");
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut checkbox = Checkbox::new("Locked").with_disabled(true);
        assert!(!checkbox.handle_event(&Event::Key(Key::Char(' '))));
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_render_shows_glyph_and_label() {
        let mut checkbox = Checkbox::new("Accept").with_checked(true);
        let mut renderer = Renderer::headless();
        let theme = Theme::default();
        checkbox
            .render(&mut renderer, Rect::new(0, 0, 20, 1), &theme)
            .unwrap();
        let output = renderer.buffer_contents().unwrap();
        assert!(output.contains("[x]"));
        assert!(output.contains("Accept"));
        assert!(!checkbox.is_dirty());
    }
}
