//! Focus management - tab-order navigation and autofocus discovery

/// Unique identifier for a focusable element
pub type FocusId = String;

/// Metadata about a focusable element
#[derive(Debug, Clone)]
pub struct Focusable {
    pub id: FocusId,
    /// Whether this element receives initial focus when its host opens
    pub autofocus: bool,
}

impl Focusable {
    pub fn new(id: impl Into<FocusId>) -> Self {
        Focusable {
            id: id.into(),
            autofocus: false,
        }
    }

    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }
}

/// Tracks which element has focus and navigates between registered elements
///
/// Registration order is tab order. Tab wraps at the boundaries.
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    focused: Option<FocusId>,
    order: Vec<Focusable>,
}

impl FocusManager {
    pub fn new() -> Self {
        FocusManager::default()
    }

    /// Register an element at the end of the tab order
    pub fn register(&mut self, info: Focusable) {
        if let Some(existing) = self.order.iter_mut().find(|f| f.id == info.id) {
            *existing = info;
        } else {
            self.order.push(info);
        }
    }

    /// Remove an element, clearing focus if it was focused
    pub fn unregister(&mut self, id: &str) {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        self.order.retain(|f| f.id != id);
    }

    /// Focus a specific element by id
    pub fn focus(&mut self, id: &str) -> bool {
        if self.order.iter().any(|f| f.id == id) {
            self.focused = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Clear focus entirely
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Move focus forward in tab order, wrapping
    pub fn focus_next(&mut self) -> bool {
        self.shift(1)
    }

    /// Move focus backward in tab order, wrapping
    pub fn focus_prev(&mut self) -> bool {
        self.shift(-1)
    }

    fn shift(&mut self, delta: isize) -> bool {
        if self.order.is_empty() {
            return false;
        }
        let len = self.order.len() as isize;
        let current = self
            .focused
            .as_deref()
            .and_then(|id| self.order.iter().position(|f| f.id == id));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(len) as usize,
            None if delta > 0 => 0,
            None => self.order.len() - 1,
        };
        self.focused = Some(self.order[next].id.clone());
        true
    }

    /// The currently focused element id
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Check if a specific element has focus
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused.as_deref() == Some(id)
    }

    /// Number of registered elements
    pub fn count(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(ids: &[&str]) -> FocusManager {
        let mut fm = FocusManager::new();
        for id in ids {
            fm.register(Focusable::new(*id));
        }
        fm
    }

    #[test]
    fn test_basic_focus() {
        let mut fm = manager(&["a", "b", "c"]);
        assert_eq!(fm.focused(), None);

        fm.focus("b");
        assert!(fm.is_focused("b"));
        assert!(!fm.is_focused("a"));
    }

    #[test]
    fn test_focus_next_wraps() {
        let mut fm = manager(&["a", "b", "c"]);
        fm.focus("a");

        fm.focus_next();
        assert!(fm.is_focused("b"));
        fm.focus_next();
        assert!(fm.is_focused("c"));
        fm.focus_next();
        assert!(fm.is_focused("a"));

        fm.focus_prev();
        assert!(fm.is_focused("c"));
    }

    #[test]
    fn test_next_from_blank_starts_at_edges() {
        let mut fm = manager(&["a", "b"]);
        fm.focus_next();
        assert!(fm.is_focused("a"));

        fm.blur();
        fm.focus_prev();
        assert!(fm.is_focused("b"));
    }

    #[test]
    fn test_unregister_clears_focus() {
        let mut fm = manager(&["a", "b"]);
        fm.focus("b");
        fm.unregister("b");
        assert_eq!(fm.focused(), None);
        assert_eq!(fm.count(), 1);
    }

    #[test]
    fn test_reregister_updates_info() {
        let mut fm = FocusManager::new();
        fm.register(Focusable::new("a"));
        fm.register(Focusable::new("a").with_autofocus(true));
        assert_eq!(fm.count(), 1);
    }
}
