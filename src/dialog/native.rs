//! Native modal primitive
//!
//! The dialog component delegates actual modal presentation to a primitive
//! with its own open/closed bookkeeping. Crucially, the primitive confirms
//! closure asynchronously: `close()` only *starts* dismissal, and the
//! primitive still reports itself open until the host observes the dismissal
//! on a later pass. The dialog's close transition must wait for that
//! confirmation before notifying listeners.

/// Platform-level modal container abstraction
pub trait NativeModal {
    /// Present the primitive modally
    fn show_modal(&mut self);

    /// Begin dismissal, recording a return value
    ///
    /// Dismissal completes asynchronously; `is_open` keeps reporting true
    /// until the pending dismissal is taken.
    fn close(&mut self, return_value: &str);

    /// Whether the primitive considers itself open (including mid-dismissal)
    fn is_open(&self) -> bool;

    /// Take the pending dismissal notification, if one has fired
    ///
    /// Returns the recorded return value and flips the primitive to closed.
    fn take_dismissal(&mut self) -> Option<String>;
}

/// Default in-library modal primitive: a single overlay layer
///
/// `close()` queues the dismissal; the host drains it on its next pass,
/// which is what makes the confirmation asynchronous relative to the caller.
#[derive(Debug, Default)]
pub struct ModalLayer {
    open: bool,
    closing: bool,
    pending_dismissal: Option<String>,
    return_value: String,
}

impl ModalLayer {
    pub fn new() -> Self {
        ModalLayer::default()
    }

    /// Return value recorded by the last completed dismissal
    pub fn return_value(&self) -> &str {
        &self.return_value
    }
}

impl NativeModal for ModalLayer {
    fn show_modal(&mut self) {
        self.open = true;
        self.closing = false;
        self.pending_dismissal = None;
    }

    fn close(&mut self, return_value: &str) {
        // A second close while dismissal is pending is ignored; there is at
        // most one dismissal in flight.
        if self.open && !self.closing {
            self.closing = true;
            self.pending_dismissal = Some(return_value.to_string());
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn take_dismissal(&mut self) -> Option<String> {
        let value = self.pending_dismissal.take()?;
        self.open = false;
        self.closing = false;
        self.return_value = value.clone();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismissal_is_deferred() {
        let mut layer = ModalLayer::new();
        layer.show_modal();
        assert!(layer.is_open());

        layer.close("ok");
        // Still open until the dismissal is observed
        assert!(layer.is_open());

        assert_eq!(layer.take_dismissal(), Some("ok".to_string()));
        assert!(!layer.is_open());
        assert_eq!(layer.return_value(), "ok");
    }

    #[test]
    fn test_single_dismissal_in_flight() {
        let mut layer = ModalLayer::new();
        layer.show_modal();
        layer.close("first");
        layer.close("second");

        assert_eq!(layer.take_dismissal(), Some("first".to_string()));
        assert_eq!(layer.take_dismissal(), None);
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let mut layer = ModalLayer::new();
        layer.close("x");
        assert_eq!(layer.take_dismissal(), None);
        assert!(!layer.is_open());
    }

    #[test]
    fn test_reopen_clears_stale_dismissal() {
        let mut layer = ModalLayer::new();
        layer.show_modal();
        layer.close("stale");
        layer.show_modal();
        assert!(layer.is_open());
        assert_eq!(layer.take_dismissal(), None);
    }
}
