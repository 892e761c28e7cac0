//! Scroll-divider evaluation for the dialog content region
//!
//! Dividers between header/content and content/footer appear only while the
//! content is scrolled away from the respective edge. The evaluation is a
//! pure function of the current scroll metrics; callers re-run it on render,
//! on (throttled) scroll, and on content-size change.

use std::time::{Duration, Instant};

/// Tolerance when deciding the content sits at the bottom edge, in cells
pub const SCROLL_EDGE_TOLERANCE: u16 = 2;

/// Scroll position and extents of the content region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top
    pub scroll_top: u16,
    /// Total content height
    pub scroll_height: u16,
    /// Visible viewport height
    pub client_height: u16,
}

impl ScrollMetrics {
    /// Largest valid scroll offset
    pub fn max_scroll_top(&self) -> u16 {
        self.scroll_height.saturating_sub(self.client_height)
    }
}

/// Divider visibility derived from scroll metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerState {
    pub is_scrollable: bool,
    pub is_at_top: bool,
    pub is_at_bottom: bool,
}

impl DividerState {
    /// Evaluate divider visibility from the given metrics
    ///
    /// Unmeasured or unscrollable content reports both edges reached, so no
    /// dividers show.
    pub fn evaluate(metrics: &ScrollMetrics) -> Self {
        let is_scrollable =
            metrics.client_height > 0 && metrics.scroll_height > metrics.client_height;
        if !is_scrollable {
            return DividerState {
                is_scrollable: false,
                is_at_top: true,
                is_at_bottom: true,
            };
        }
        DividerState {
            is_scrollable: true,
            is_at_top: metrics.scroll_top == 0,
            is_at_bottom: metrics.scroll_top + metrics.client_height + SCROLL_EDGE_TOLERANCE
                >= metrics.scroll_height,
        }
    }

    /// Divider between header and content
    pub fn show_top_divider(&self) -> bool {
        !self.is_at_top
    }

    /// Divider between content and footer
    pub fn show_bottom_divider(&self) -> bool {
        !self.is_at_bottom
    }
}

impl Default for DividerState {
    fn default() -> Self {
        DividerState::evaluate(&ScrollMetrics::default())
    }
}

/// Rate limiter for scroll-driven divider recomputation
#[derive(Debug, Clone)]
pub struct ScrollThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl ScrollThrottle {
    pub fn new(interval: Duration) -> Self {
        ScrollThrottle {
            interval,
            last: None,
        }
    }

    /// Whether an update at `now` is allowed; records it if so
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(prev) if now.duration_since(prev) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        ScrollThrottle::new(Duration::from_millis(50))
    }
}
