//! Fullscreen breakpoint binding
//!
//! A breakpoint expression over terminal cells decides when a fullscreen
//! dialog actually goes fullscreen, e.g. `"(max-width: 80), (max-height: 24)"`.
//! Comma-separated conditions are OR'ed. The binding owns its parsed query
//! and is torn down and rebuilt whenever the fullscreen flag or the
//! expression changes.

use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    MaxWidth(u16),
    MinWidth(u16),
    MaxHeight(u16),
    MinHeight(u16),
}

impl Condition {
    fn matches(&self, cols: u16, rows: u16) -> bool {
        match *self {
            Condition::MaxWidth(n) => cols <= n,
            Condition::MinWidth(n) => cols >= n,
            Condition::MaxHeight(n) => rows <= n,
            Condition::MinHeight(n) => rows >= n,
        }
    }
}

/// A parsed breakpoint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    conditions: Vec<Condition>,
}

impl Breakpoint {
    /// Parse an expression like `"(max-width: 80), (max-height: 24)"`
    pub fn parse(expr: &str) -> Result<Self> {
        let mut conditions = Vec::new();
        for part in expr.split(',') {
            let part = part.trim();
            let inner = part
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .unwrap_or(part);
            let (feature, value) = match inner.split_once(':') {
                Some(pair) => pair,
                None => bail!("breakpoint condition missing ':': {part:?}"),
            };
            let value: u16 = value.trim().parse()?;
            let condition = match feature.trim() {
                "max-width" => Condition::MaxWidth(value),
                "min-width" => Condition::MinWidth(value),
                "max-height" => Condition::MaxHeight(value),
                "min-height" => Condition::MinHeight(value),
                other => bail!("unknown breakpoint feature {other:?}"),
            };
            conditions.push(condition);
        }
        if conditions.is_empty() {
            bail!("empty breakpoint expression");
        }
        Ok(Breakpoint { conditions })
    }

    /// True if any condition matches the viewport
    pub fn matches(&self, cols: u16, rows: u16) -> bool {
        self.conditions.iter().any(|c| c.matches(cols, rows))
    }
}

/// Live binding between a breakpoint expression and the fullscreen state
///
/// Holds the parsed query only while fullscreen is enabled; `rebind` drops
/// any existing query first so a disabled or changed binding never lingers.
#[derive(Debug, Clone)]
pub struct FullscreenBinder {
    enabled: bool,
    expression: String,
    query: Option<Breakpoint>,
    viewport: (u16, u16),
}

impl FullscreenBinder {
    pub fn new(expression: &str, viewport: (u16, u16)) -> Self {
        FullscreenBinder {
            enabled: false,
            expression: expression.to_string(),
            query: None,
            viewport,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Enable or disable the binding, returning the new match state
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        self.rebind()
    }

    /// Swap the breakpoint expression, returning the new match state
    pub fn set_expression(&mut self, expression: &str) -> bool {
        self.expression = expression.to_string();
        self.rebind()
    }

    /// Record a viewport change, returning the new match state
    pub fn on_resize(&mut self, cols: u16, rows: u16) -> bool {
        self.viewport = (cols, rows);
        self.matches()
    }

    fn rebind(&mut self) -> bool {
        self.query = None;
        if self.enabled {
            // An unparsable expression simply never matches
            self.query = Breakpoint::parse(&self.expression).ok();
        }
        self.matches()
    }

    /// Current match state; false whenever the binding is disabled
    pub fn matches(&self) -> bool {
        match &self.query {
            Some(q) => q.matches(self.viewport.0, self.viewport.1),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_condition() {
        let bp = Breakpoint::parse("(max-width: 80)").unwrap();
        assert!(bp.matches(80, 50));
        assert!(bp.matches(40, 50));
        assert!(!bp.matches(81, 50));
    }

    #[test]
    fn test_parse_or_conditions() {
        let bp = Breakpoint::parse("(max-width: 80), (max-height: 24)").unwrap();
        assert!(bp.matches(100, 20)); // height matches
        assert!(bp.matches(60, 50)); // width matches
        assert!(!bp.matches(100, 50));
    }

    #[test]
    fn test_parse_min_conditions() {
        let bp = Breakpoint::parse("(min-width: 120)").unwrap();
        assert!(bp.matches(120, 10));
        assert!(!bp.matches(119, 10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Breakpoint::parse("").is_err());
        assert!(Breakpoint::parse("(max-width 80)").is_err());
        assert!(Breakpoint::parse("(max-depth: 80)").is_err());
        assert!(Breakpoint::parse("(max-width: lots)").is_err());
    }

    #[test]
    fn test_binder_lifecycle() {
        let mut binder = FullscreenBinder::new("(max-width: 80)", (60, 24));
        assert!(!binder.matches());

        assert!(binder.set_enabled(true));
        assert!(binder.matches());

        // Viewport grows past the breakpoint
        assert!(!binder.on_resize(100, 24));

        // Disabling tears the query down
        assert!(!binder.set_enabled(false));
        assert!(binder.query.is_none());
    }

    #[test]
    fn test_binder_expression_swap() {
        let mut binder = FullscreenBinder::new("(max-width: 40)", (60, 24));
        binder.set_enabled(true);
        assert!(!binder.matches());

        assert!(binder.set_expression("(max-width: 80)"));
    }
}
