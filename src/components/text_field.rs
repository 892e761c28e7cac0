//! Single-line text field with label, placeholder and error text

use crate::component::Component;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;

/// Submission callback type
pub type OnSubmit = Box<dyn FnMut(&str)>;
/// Change callback type
pub type OnChange = Box<dyn FnMut(&str)>;

/// Text field component
pub struct TextField {
    /// Label displayed before the field
    label: String,
    /// Input buffer
    buffer: String,
    /// Cursor position (byte offset)
    cursor: usize,
    /// Shown while the buffer is empty
    placeholder: String,
    /// Error message; a non-empty value switches the field to error styling
    error: String,
    focused: bool,
    dirty: bool,
    on_submit: Option<OnSubmit>,
    on_change: Option<OnChange>,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        TextField {
            label: label.into(),
            buffer: String::new(),
            cursor: 0,
            placeholder: String::new(),
            error: String::new(),
            focused: false,
            dirty: true,
            on_submit: None,
            on_change: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.buffer = value.into();
        self.cursor = self.buffer.len();
        self
    }

    /// Set submission callback (enter key)
    pub fn on_submit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Set change callback, invoked after every edit
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.len();
        self.dirty = true;
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Set or clear the error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
        self.dirty = true;
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.dirty = true;
        self.notify_change();
    }

    fn notify_change(&mut self) {
        if let Some(callback) = &mut self.on_change {
            callback(&self.buffer);
        }
    }

    fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.dirty = true;
        self.notify_change();
    }

    fn delete_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.buffer.remove(prev);
        self.cursor = prev;
        self.dirty = true;
        self.notify_change();
    }

    fn delete_at(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
            self.dirty = true;
            self.notify_change();
        }
    }

    fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.buffer[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.dirty = true;
        }
    }

    fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = self.buffer[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.buffer.len());
            self.dirty = true;
        }
    }

    fn submit(&mut self) {
        if let Some(callback) = &mut self.on_submit {
            callback(&self.buffer);
        }
    }
}

impl EventHandler for TextField {
    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match key {
            Key::Char(c) => {
                self.insert_char(*c);
                true
            }
            Key::Backspace => {
                self.delete_before();
                true
            }
            Key::Delete => {
                self.delete_at();
                true
            }
            Key::Left => {
                self.move_left();
                true
            }
            Key::Right => {
                self.move_right();
                true
            }
            Key::Home => {
                self.cursor = 0;
                self.dirty = true;
                true
            }
            Key::End => {
                self.cursor = self.buffer.len();
                self.dirty = true;
                true
            }
            Key::Ctrl('u') => {
                self.clear();
                true
            }
            Key::Enter => {
                self.submit();
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

impl Component for TextField {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        if bounds.width == 0 || bounds.height == 0 {
            self.dirty = false;
            return Ok(());
        }

        let mut x = bounds.x;
        if !self.label.is_empty() {
            let label_style = if self.has_error() {
                theme.error_style()
            } else if self.focused {
                theme.primary_style()
            } else {
                theme.on_surface_variant_style()
            };
            let label = format!("{}: ", self.label);
            renderer.write_styled(x, bounds.y, &label_style, &label)?;
            x += label.chars().count() as u16;
        }

        let field_width = bounds.right().saturating_sub(x) as usize;
        if field_width > 0 {
            if self.buffer.is_empty() && !self.placeholder.is_empty() {
                let placeholder: String = self.placeholder.chars().take(field_width).collect();
                renderer.write_styled(x, bounds.y, &theme.outline_variant_style(), &placeholder)?;
            } else {
                let text: String = self.buffer.chars().take(field_width).collect();
                renderer.write_styled(x, bounds.y, &theme.on_surface_style(), &text)?;
                if self.focused {
                    let cursor_col = x + self.buffer[..self.cursor].chars().count() as u16;
                    if cursor_col < bounds.right() {
                        let under = self.buffer[self.cursor..].chars().next().unwrap_or(' ');
                        renderer.write_styled(cursor_col, bounds.y, "\x1b[7m", &under.to_string())?;
                    }
                }
            }
        }

        // supporting error text on the row below, when there is one
        if self.has_error() && bounds.height > 1 {
            let error: String = self.error.chars().take(bounds.width as usize).collect();
            renderer.write_styled(bounds.x, bounds.y + 1, &theme.error_style(), &error)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as u16 + 2
        };
        let rows = if self.has_error() { 2 } else { 1 };
        (label_width + 16, rows)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "TextField"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_event(&Event::Key(Key::Char(c)));
        }
    }

    #[test]
    fn test_editing_keeps_utf8_boundaries() {
        let mut field = TextField::new("Name");
        type_str(&mut field, "héllo");
        assert_eq!(field.value(), "héllo");

        field.handle_event(&Event::Key(Key::Backspace));
        assert_eq!(field.value(), "héll");
        field.handle_event(&Event::Key(Key::Home));
        field.handle_event(&Event::Key(Key::Right));
        field.handle_event(&Event::Key(Key::Delete));
        assert_eq!(field.value(), "hll");
    }

    #[test]
    fn test_submit_passes_current_value() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let submitted: Rc<RefCell<String>> = Rc::new(RefCell::new(String::new()));
        let sink = submitted.clone();
        let mut field = TextField::new("Query").on_submit(move |v| {
            *sink.borrow_mut() = v.to_string();
        });
        type_str(&mut field, "find me");
        field.handle_event(&Event::Key(Key::Enter));
        assert_eq!(&*submitted.borrow(), "find me");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = TextField::new("Q").with_value("stale");
        field.handle_event(&Event::Key(Key::Ctrl('u')));
        assert!(field.is_empty());
    }

    #[test]
    fn test_error_expands_min_size() {
        let mut field = TextField::new("Email");
        assert_eq!(field.min_size().1, 1);
        field.set_error("Required");
        assert!(field.has_error());
        assert_eq!(field.min_size().1, 2);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let mut field = TextField::new("Search").with_placeholder("type here");
        let mut renderer = Renderer::headless();
        let theme = Theme::default();
        field
            .render(&mut renderer, Rect::new(0, 0, 30, 1), &theme)
            .unwrap();
        assert!(renderer.buffer_contents().unwrap().contains("type here"));
    }
}
