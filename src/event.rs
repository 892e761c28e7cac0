//! Event system - keyboard, mouse, and terminal events

use anyhow::Result;
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    BackTab,
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Null,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(u16, u16),
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(Key),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    /// Focus gained
    FocusGained,
    /// Focus lost
    FocusLost,
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Event polling and conversion from crossterm events
pub struct EventPoller {
    _raw: bool,
}

impl EventPoller {
    /// Create a new event poller, entering raw mode
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        // Mouse capture is best-effort; not every terminal supports it
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

        Ok(EventPoller { _raw: true })
    }

    /// Poll for next event with timeout
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            let event = crossterm::event::read()?;
            Ok(convert_crossterm_event(event))
        } else {
            Ok(None)
        }
    }

    /// Block and wait for the next recognized event
    pub fn read(&self) -> Result<Event> {
        loop {
            if let Some(event) = convert_crossterm_event(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }
}

impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Convert a crossterm event to our Event type
fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CEvent, KeyEvent, MouseEventKind};

    match event {
        CEvent::Key(KeyEvent {
            code, modifiers, ..
        }) => Some(Event::Key(convert_key(code, modifiers))),
        CEvent::Mouse(me) => {
            let (col, row) = (me.column, me.row);
            let mouse_event = match me.kind {
                MouseEventKind::Down(btn) => {
                    let button = match btn {
                        crossterm::event::MouseButton::Left => MouseButton::Left,
                        crossterm::event::MouseButton::Right => MouseButton::Right,
                        crossterm::event::MouseButton::Middle => MouseButton::Middle,
                    };
                    MouseEvent::Press(button, col, row)
                }
                MouseEventKind::Up(_) => MouseEvent::Release(col, row),
                MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                _ => return None,
            };
            Some(Event::Mouse(mouse_event))
        }
        CEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        CEvent::FocusGained => Some(Event::FocusGained),
        CEvent::FocusLost => Some(Event::FocusLost),
        _ => None,
    }
}

/// Convert a crossterm key code to our Key type
fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
    use crossterm::event::{KeyCode, KeyModifiers};

    if mods.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = code {
            return Key::Ctrl(c);
        }
    }

    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversion() {
        use crossterm::event::{KeyCode, KeyModifiers};

        assert_eq!(
            convert_key(KeyCode::Char('a'), KeyModifiers::NONE),
            Key::Char('a')
        );
        assert_eq!(
            convert_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Key::Ctrl('c')
        );
        assert_eq!(convert_key(KeyCode::Esc, KeyModifiers::NONE), Key::Esc);
    }

    #[test]
    fn test_event_types() {
        let e = Event::Key(Key::Enter);
        match e {
            Event::Key(Key::Enter) => {}
            other => panic!("expected Key(Enter), got {:?}", other),
        }
    }
}
