//! Modal dialog with a full open/close lifecycle
//!
//! The dialog owns all transition state and coordinates three collaborators:
//! the declarative render pass (the host draws the dialog from current state
//! and acknowledges the commit with [`Dialog::render_committed`]), a
//! [`NativeModal`] primitive with its own asynchronous dismissal, and a
//! lifecycle event callback for embedding applications.
//!
//! Events obey a strict ordering contract per completed transition:
//! `Opening` then `Opened`, `Closing` then `Closed`. Close-side events carry
//! the action that caused the close; open-side events carry `"none"`.
//!
//! Driving the lifecycle from a host loop:
//!
//! ```ignore
//! dialog.show();
//! loop {
//!     if dialog.is_dirty() {
//!         dialog.render(&mut renderer, bounds, &theme)?;
//!         renderer.flush()?;
//!         dialog.render_committed();
//!     }
//!     if let Some(wait) = dialog.pending_wait() {
//!         // sleep or schedule, then:
//!         dialog.transition_elapsed();
//!     }
//!     dialog.pump_native();
//!     // feed input events via dialog.handle_event(..)
//! }
//! ```

pub mod fullscreen;
pub mod native;
pub mod scroll;
mod transition;

pub use fullscreen::{Breakpoint, FullscreenBinder};
pub use native::{ModalLayer, NativeModal};
pub use scroll::{DividerState, ScrollMetrics, ScrollThrottle};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::component::Component;
use crate::event::{Event, EventHandler, Key, MouseEvent};
use crate::focus::{FocusManager, Focusable};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::{MotionTokens, Theme};

use transition::{dispatch, Suspend, TransitionSequence};

/// Action carried by open-side lifecycle events
pub const ACTION_NONE: &str = "none";
/// Default action for closes that do not specify one
pub const ACTION_CLOSE: &str = "close";
/// Default attribute consulted to discover a slot's close action
pub const ACTION_ATTRIBUTE: &str = "dialog-action";
/// Default breakpoint at which a fullscreen dialog fills the terminal
pub const FULLSCREEN_BREAKPOINT: &str = "(max-width: 80), (max-height: 24)";

/// Lifecycle stages reported to embedders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Opening,
    Opened,
    Closing,
    Closed,
    Cancel,
}

/// A lifecycle notification with the action that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub stage: LifecycleStage,
    pub action: String,
}

impl LifecycleEvent {
    pub fn new(stage: LifecycleStage, action: &str) -> Self {
        LifecycleEvent {
            stage,
            action: action.to_string(),
        }
    }
}

/// Callback receiving lifecycle events; the host redispatches as it sees fit
pub type LifecycleCallback = Box<dyn FnMut(&LifecycleEvent)>;

pub(crate) type SharedSink = Rc<RefCell<Option<LifecycleCallback>>>;

/// Transition state shared between the dialog and its in-flight sequence
pub(crate) struct DialogState {
    /// Target state; source of truth for what is being transitioned toward
    pub open: bool,
    /// Transient flags, mutually exclusive, both false at rest
    pub opening: bool,
    pub closing: bool,
    /// True once the open transition's preconditions (render + focus) hold
    pub showing_open: bool,
    /// Derived from the fullscreen breakpoint binding
    pub showing_fullscreen: bool,
    /// Action tag of the in-flight close; None when no close is pending
    pub current_action: Option<String>,
    pub default_action: String,
    /// First autofocus slot, footer region searched before content
    pub autofocus_target: Option<String>,
    pub focus: FocusManager,
    pub scroll: ScrollMetrics,
    pub dividers: DividerState,
    pub motion: MotionTokens,
}

impl DialogState {
    pub fn new(default_action: &str) -> Self {
        DialogState {
            open: false,
            opening: false,
            closing: false,
            showing_open: false,
            showing_fullscreen: false,
            current_action: None,
            default_action: default_action.to_string(),
            autofocus_target: None,
            focus: FocusManager::new(),
            scroll: ScrollMetrics::default(),
            dividers: DividerState::default(),
            motion: MotionTokens::default(),
        }
    }
}

/// A named child of the dialog's content or footer region
pub struct DialogSlot {
    id: String,
    widget: Box<dyn Component>,
    autofocus: bool,
    attributes: HashMap<String, String>,
}

impl DialogSlot {
    pub fn new(id: impl Into<String>, widget: Box<dyn Component>) -> Self {
        DialogSlot {
            id: id.into(),
            widget,
            autofocus: false,
            attributes: HashMap::new(),
        }
    }

    /// Receive initial focus when the dialog opens
    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    /// Attach an attribute, e.g. the dialog's action attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Modal dialog component
pub struct Dialog {
    state: Rc<RefCell<DialogState>>,
    native: Rc<RefCell<dyn NativeModal>>,
    sink: SharedSink,
    /// Single-slot: a newer transition replaces whatever was in flight
    sequence: Option<TransitionSequence>,
    headline: String,
    content: Vec<DialogSlot>,
    footer: Vec<DialogSlot>,
    binder: FullscreenBinder,
    throttle: ScrollThrottle,
    size: Option<(u16, u16)>,
    surface_bounds: Option<Rect>,
    action_attribute: String,
    scrim_click_action: String,
    escape_key_action: String,
    mounted: bool,
    dirty: bool,
}

impl Dialog {
    pub fn new() -> Self {
        Dialog {
            state: Rc::new(RefCell::new(DialogState::new(ACTION_CLOSE))),
            native: Rc::new(RefCell::new(ModalLayer::new())),
            sink: Rc::new(RefCell::new(None)),
            sequence: None,
            headline: String::new(),
            content: Vec::new(),
            footer: Vec::new(),
            binder: FullscreenBinder::new(FULLSCREEN_BREAKPOINT, (80, 24)),
            throttle: ScrollThrottle::default(),
            size: None,
            surface_bounds: None,
            action_attribute: ACTION_ATTRIBUTE.to_string(),
            scrim_click_action: ACTION_CLOSE.to_string(),
            escape_key_action: ACTION_CLOSE.to_string(),
            mounted: false,
            dirty: true,
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Start in the open state; applied silently at mount
    pub fn with_open(self, open: bool) -> Self {
        self.state.borrow_mut().open = open;
        self
    }

    /// Replace the native modal primitive (the default is [`ModalLayer`])
    pub fn with_native(mut self, native: Rc<RefCell<dyn NativeModal>>) -> Self {
        self.native = native;
        self
    }

    pub fn with_content_slot(mut self, slot: DialogSlot) -> Self {
        self.register_slot(&slot);
        self.content.push(slot);
        self.refresh_autofocus();
        self
    }

    pub fn with_footer_slot(mut self, slot: DialogSlot) -> Self {
        self.register_slot(&slot);
        self.footer.push(slot);
        self.refresh_autofocus();
        self
    }

    pub fn with_default_action(self, action: impl Into<String>) -> Self {
        self.state.borrow_mut().default_action = action.into();
        self
    }

    pub fn with_action_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.action_attribute = attribute.into();
        self
    }

    /// Action dispatched on scrim clicks; empty disables scrim dismissal
    pub fn with_scrim_click_action(mut self, action: impl Into<String>) -> Self {
        self.scrim_click_action = action.into();
        self
    }

    /// Action dispatched on escape; empty disables cancellation entirely
    pub fn with_escape_key_action(mut self, action: impl Into<String>) -> Self {
        self.escape_key_action = action.into();
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        let matches = self.binder.set_enabled(fullscreen);
        self.state.borrow_mut().showing_fullscreen = matches;
        self
    }

    pub fn with_fullscreen_breakpoint(mut self, expression: &str) -> Self {
        let matches = self.binder.set_expression(expression);
        self.state.borrow_mut().showing_fullscreen = matches;
        self
    }

    /// Register the lifecycle event callback
    pub fn on_lifecycle<F>(&mut self, callback: F)
    where
        F: FnMut(&LifecycleEvent) + 'static,
    {
        *self.sink.borrow_mut() = Some(Box::new(callback));
    }

    fn register_slot(&mut self, slot: &DialogSlot) {
        self.state
            .borrow_mut()
            .focus
            .register(Focusable::new(slot.id.clone()).with_autofocus(slot.autofocus));
    }

    fn refresh_autofocus(&mut self) {
        let target = self
            .footer
            .iter()
            .chain(self.content.iter())
            .find(|s| s.autofocus)
            .map(|s| s.id.clone());
        self.state.borrow_mut().autofocus_target = target;
    }

    /// Apply the initial state without notifying listeners
    ///
    /// The first state application is silent: a dialog constructed open must
    /// not announce an open transition that never happened.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let open = self.state.borrow().open;
        if open {
            {
                let mut st = self.state.borrow_mut();
                st.scroll.scroll_top = 0;
                st.dividers = DividerState::evaluate(&st.scroll);
                st.showing_open = true;
            }
            self.native.borrow_mut().show_modal();
            let target = self.state.borrow().autofocus_target.clone();
            if let Some(id) = target {
                self.state.borrow_mut().focus.focus(&id);
            }
        }
        let matches = self.binder.matches();
        self.state.borrow_mut().showing_fullscreen = matches;
        self.dirty = true;
    }

    /// Open the dialog; a no-op while already open
    pub fn show(&mut self) {
        self.set_open(true);
    }

    /// Close the dialog, recording the action; empty resolves to the default
    pub fn close(&mut self, action: &str) {
        if !self.state.borrow().open {
            return;
        }
        {
            let mut st = self.state.borrow_mut();
            let action = if action.is_empty() {
                st.default_action.clone()
            } else {
                action.to_string()
            };
            st.current_action = Some(action);
        }
        self.set_open(false);
    }

    /// Reactive open property; the machine keys off changes, so assigning
    /// the current value triggers nothing
    pub fn set_open(&mut self, open: bool) {
        let was_open = self.state.borrow().open;
        if was_open == open {
            return;
        }
        self.state.borrow_mut().open = open;
        if !self.mounted {
            return;
        }
        {
            let mut st = self.state.borrow_mut();
            st.opening = open;
            st.closing = was_open && !open;
        }
        self.dirty = true;
        self.sequence = Some(TransitionSequence::spawn(
            self.state.clone(),
            self.native.clone(),
            self.sink.clone(),
        ));
        self.resume_sequence();
    }

    fn waiting(&self) -> Option<Suspend> {
        self.sequence.as_ref().and_then(|s| s.waiting()).copied()
    }

    fn resume_sequence(&mut self) {
        if let Some(seq) = &mut self.sequence {
            if !seq.resume() {
                self.sequence = None;
            }
        }
    }

    /// Acknowledge that a render pass has committed
    pub fn render_committed(&mut self) {
        if matches!(self.waiting(), Some(Suspend::Render)) {
            self.resume_sequence();
        }
    }

    /// Remaining transition wait, if the lifecycle is suspended on a timer
    pub fn pending_wait(&self) -> Option<Duration> {
        match self.waiting() {
            Some(Suspend::Timer(d)) => Some(d),
            _ => None,
        }
    }

    /// Resume after the host waited out [`Dialog::pending_wait`]
    pub fn transition_elapsed(&mut self) {
        if matches!(self.waiting(), Some(Suspend::Timer(_))) {
            self.resume_sequence();
        }
    }

    /// Deliver the native primitive's dismissal confirmation
    ///
    /// Also handles spontaneous dismissals: the primitive closing under us
    /// forces the closed state without a transition.
    pub fn native_closed(&mut self) {
        {
            let mut st = self.state.borrow_mut();
            st.open = false;
            st.opening = false;
            st.closing = false;
            st.showing_open = false;
        }
        if matches!(self.waiting(), Some(Suspend::Dismissal)) {
            self.resume_sequence();
        }
        self.dirty = true;
    }

    /// Drain a pending dismissal from the native primitive, if any
    pub fn pump_native(&mut self) {
        let dismissed = self.native.borrow_mut().take_dismissal();
        if dismissed.is_some() {
            self.native_closed();
        }
    }

    /// Cancellation gesture bridge (escape)
    ///
    /// An empty escape action disables cancellation: the gesture is
    /// swallowed and no state changes.
    fn cancel_gesture(&mut self) -> bool {
        if !self.state.borrow().open {
            return false;
        }
        if self.escape_key_action.is_empty() {
            return true;
        }
        let action = self.escape_key_action.clone();
        dispatch(
            &self.sink,
            LifecycleEvent::new(LifecycleStage::Cancel, &action),
        );
        self.close(&action);
        true
    }

    /// Close via the scrim; a no-op when the scrim action is empty
    pub fn scrim_clicked(&mut self) {
        if self.scrim_click_action.is_empty() {
            return;
        }
        let action = self.scrim_click_action.clone();
        self.close(&action);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        let matches = self.binder.set_enabled(fullscreen);
        self.state.borrow_mut().showing_fullscreen = matches;
        self.dirty = true;
    }

    pub fn set_fullscreen_breakpoint(&mut self, expression: &str) {
        let matches = self.binder.set_expression(expression);
        self.state.borrow_mut().showing_fullscreen = matches;
        self.dirty = true;
    }

    /// Override motion tokens without a render pass (otherwise they are
    /// refreshed from the theme on every render)
    pub fn set_motion(&mut self, motion: MotionTokens) {
        self.state.borrow_mut().motion = motion;
    }

    /// Scroll the content region, rate-limiting divider recomputation
    pub fn scroll_by(&mut self, delta: i16) {
        {
            let mut st = self.state.borrow_mut();
            let max = st.scroll.max_scroll_top();
            let top = if delta < 0 {
                st.scroll.scroll_top.saturating_sub(delta.unsigned_abs())
            } else {
                st.scroll.scroll_top.saturating_add(delta as u16).min(max)
            };
            if top == st.scroll.scroll_top {
                return;
            }
            st.scroll.scroll_top = top;
        }
        if self.throttle.allow(Instant::now()) {
            let mut st = self.state.borrow_mut();
            st.dividers = DividerState::evaluate(&st.scroll);
        }
        self.dirty = true;
    }

    /// Content size changed; recompute dividers immediately
    pub fn set_content_metrics(&mut self, mut metrics: ScrollMetrics) {
        metrics.scroll_top = metrics.scroll_top.min(metrics.max_scroll_top());
        let mut st = self.state.borrow_mut();
        st.scroll = metrics;
        st.dividers = DividerState::evaluate(&st.scroll);
        drop(st);
        self.dirty = true;
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn is_opening(&self) -> bool {
        self.state.borrow().opening
    }

    pub fn is_closing(&self) -> bool {
        self.state.borrow().closing
    }

    pub fn is_showing_open(&self) -> bool {
        self.state.borrow().showing_open
    }

    pub fn is_showing_fullscreen(&self) -> bool {
        self.state.borrow().showing_fullscreen
    }

    pub fn current_action(&self) -> Option<String> {
        self.state.borrow().current_action.clone()
    }

    pub fn dividers(&self) -> DividerState {
        self.state.borrow().dividers
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.state.borrow().scroll
    }

    pub fn focused_slot(&self) -> Option<String> {
        self.state.borrow().focus.focused().map(str::to_string)
    }

    fn slot_mut(&mut self, id: &str) -> Option<&mut DialogSlot> {
        self.footer
            .iter_mut()
            .chain(self.content.iter_mut())
            .find(|s| s.id == id)
    }

    /// Close action attached to the focused slot, read via the configured
    /// action attribute
    fn focused_action(&self) -> Option<String> {
        let focused = self.state.borrow().focus.focused()?.to_string();
        self.footer
            .iter()
            .chain(self.content.iter())
            .find(|s| s.id == focused)?
            .attribute(&self.action_attribute)
            .map(str::to_string)
    }

    fn forward_to_focused(&mut self, event: &Event) -> bool {
        let focused = self.state.borrow().focus.focused().map(str::to_string);
        let Some(id) = focused else { return false };
        let Some(slot) = self.slot_mut(&id) else {
            return false;
        };
        let consumed = slot.widget.handle_event(event);
        if consumed {
            self.dirty = true;
        }
        consumed
    }

    fn natural_size(&self) -> (u16, u16) {
        let content_width = self
            .content
            .iter()
            .map(|s| s.widget.min_size().0)
            .max()
            .unwrap_or(0);
        let footer_width: u16 = self
            .footer
            .iter()
            .map(|s| s.widget.min_size().0 + 2)
            .sum();
        let width = (self.headline.chars().count() as u16 + 4)
            .max(content_width + 4)
            .max(footer_width + 2)
            .max(20);

        let content_height: u16 = self
            .content
            .iter()
            .map(|s| s.widget.min_size().1.max(1))
            .sum();
        let chrome = 2 // borders
            + u16::from(!self.headline.is_empty()) * 2 // headline + divider row
            + u16::from(!self.footer.is_empty()) * 2; // divider row + footer
        (width, content_height.max(1) + chrome)
    }

    fn draw_surface(&mut self, renderer: &mut Renderer, surface: Rect, theme: &Theme) -> Result<()> {
        let chars = theme.border_chars();
        let outline = theme.outline_style();
        let surface_bg = theme.elevated_surface_style(2);

        // chrome
        renderer.set_style(&surface_bg)?;
        for row in surface.y..surface.bottom() {
            renderer.fill_row(surface.x, row, surface.width, ' ')?;
        }
        renderer.set_style(&outline)?;
        renderer.move_cursor(surface.x, surface.y)?;
        renderer.write_text(&chars.top_left.to_string())?;
        renderer.fill_row(surface.x + 1, surface.y, surface.width.saturating_sub(2), chars.horizontal)?;
        renderer.move_cursor(surface.right().saturating_sub(1), surface.y)?;
        renderer.write_text(&chars.top_right.to_string())?;
        for row in surface.y + 1..surface.bottom().saturating_sub(1) {
            renderer.move_cursor(surface.x, row)?;
            renderer.write_text(&chars.vertical.to_string())?;
            renderer.move_cursor(surface.right().saturating_sub(1), row)?;
            renderer.write_text(&chars.vertical.to_string())?;
        }
        let bottom = surface.bottom().saturating_sub(1);
        renderer.move_cursor(surface.x, bottom)?;
        renderer.write_text(&chars.bottom_left.to_string())?;
        renderer.fill_row(surface.x + 1, bottom, surface.width.saturating_sub(2), chars.horizontal)?;
        renderer.move_cursor(surface.right().saturating_sub(1), bottom)?;
        renderer.write_text(&chars.bottom_right.to_string())?;
        renderer.reset_style()?;

        let inner = surface.inner(1);
        if inner.width == 0 || inner.height == 0 {
            return Ok(());
        }

        let mut cursor_y = inner.y;

        // headline region
        if !self.headline.is_empty() && cursor_y < inner.bottom() {
            renderer.write_styled(inner.x + 1, cursor_y, &theme.on_surface_style(), &self.headline)?;
            cursor_y += 1;
            // header/content divider, shown only while scrolled from top
            if cursor_y < inner.bottom() {
                let dividers = self.state.borrow().dividers;
                if dividers.show_top_divider() {
                    renderer.set_style(&theme.outline_variant_style())?;
                    renderer.fill_row(inner.x, cursor_y, inner.width, chars.horizontal)?;
                    renderer.reset_style()?;
                }
                cursor_y += 1;
            }
        }

        let footer_rows = if self.footer.is_empty() { 0 } else { 2 };
        let content_bottom = inner.bottom().saturating_sub(footer_rows);
        let content_region = Rect::new(
            inner.x,
            cursor_y,
            inner.width,
            content_bottom.saturating_sub(cursor_y),
        );

        // measure content and refresh metrics on every render
        let scroll_height: u16 = self
            .content
            .iter()
            .map(|s| s.widget.min_size().1.max(1))
            .sum();
        {
            let mut st = self.state.borrow_mut();
            st.scroll.scroll_height = scroll_height;
            st.scroll.client_height = content_region.height;
            st.scroll.scroll_top = st.scroll.scroll_top.min(st.scroll.max_scroll_top());
            st.dividers = DividerState::evaluate(&st.scroll);
        }

        // content slots, offset by scroll position
        let scroll_top = self.state.borrow().scroll.scroll_top;
        let mut offset: u16 = 0;
        for slot in &mut self.content {
            let height = slot.widget.min_size().1.max(1);
            let top = offset;
            offset += height;
            if top + height <= scroll_top || top >= scroll_top + content_region.height {
                continue;
            }
            let y = content_region.y + top.saturating_sub(scroll_top);
            let visible = height.min(content_region.bottom().saturating_sub(y));
            let slot_bounds = Rect::new(content_region.x + 1, y, content_region.width.saturating_sub(2), visible);
            slot.widget.render(renderer, slot_bounds, theme)?;
        }

        // footer region
        if !self.footer.is_empty() && content_region.height > 0 {
            let divider_y = content_bottom;
            let dividers = self.state.borrow().dividers;
            if dividers.show_bottom_divider() && divider_y < inner.bottom() {
                renderer.set_style(&theme.outline_variant_style())?;
                renderer.fill_row(inner.x, divider_y, inner.width, chars.horizontal)?;
                renderer.reset_style()?;
            }
            let footer_y = inner.bottom().saturating_sub(1);
            let mut x = inner
                .right()
                .saturating_sub(self.footer.iter().map(|s| s.widget.min_size().0 + 2).sum());
            let focused = self.state.borrow().focus.focused().map(str::to_string);
            for slot in &mut self.footer {
                let (w, _) = slot.widget.min_size();
                let slot_bounds = Rect::new(x, footer_y, w, 1);
                if focused.as_deref() == Some(slot.id.as_str()) {
                    renderer.write_styled(x.saturating_sub(1), footer_y, &theme.focus_style(), ">")?;
                }
                slot.widget.render(renderer, slot_bounds, theme)?;
                x += w + 2;
            }
        }

        Ok(())
    }
}

impl Default for Dialog {
    fn default() -> Self {
        Dialog::new()
    }
}

impl EventHandler for Dialog {
    fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Resize(cols, rows) = event {
            let matches = self.binder.on_resize(*cols, *rows);
            let changed = {
                let mut st = self.state.borrow_mut();
                let changed = st.showing_fullscreen != matches;
                st.showing_fullscreen = matches;
                changed
            };
            if changed {
                self.dirty = true;
            }
            return false;
        }

        if !self.state.borrow().open {
            return false;
        }

        match event {
            Event::Key(Key::Esc) => self.cancel_gesture(),
            Event::Key(Key::Tab) => {
                self.state.borrow_mut().focus.focus_next();
                self.dirty = true;
                true
            }
            Event::Key(Key::BackTab) => {
                self.state.borrow_mut().focus.focus_prev();
                self.dirty = true;
                true
            }
            Event::Key(Key::Enter) => {
                if let Some(action) = self.focused_action() {
                    self.close(&action);
                } else {
                    self.forward_to_focused(event);
                }
                true
            }
            Event::Key(Key::Up) => {
                if !self.forward_to_focused(event) {
                    self.scroll_by(-1);
                }
                true
            }
            Event::Key(Key::Down) => {
                if !self.forward_to_focused(event) {
                    self.scroll_by(1);
                }
                true
            }
            Event::Key(Key::PageUp) => {
                let page = self.state.borrow().scroll.client_height.max(1);
                self.scroll_by(-(page as i16));
                true
            }
            Event::Key(Key::PageDown) => {
                let page = self.state.borrow().scroll.client_height.max(1);
                self.scroll_by(page as i16);
                true
            }
            Event::Mouse(MouseEvent::ScrollUp(..)) => {
                self.scroll_by(-1);
                true
            }
            Event::Mouse(MouseEvent::ScrollDown(..)) => {
                self.scroll_by(1);
                true
            }
            Event::Mouse(MouseEvent::Press(_, col, row)) => {
                match self.surface_bounds {
                    Some(surface) if surface.contains(*col, *row) => {}
                    _ => self.scrim_clicked(),
                }
                true
            }
            _ => {
                self.forward_to_focused(event);
                // modal: swallow input while open
                true
            }
        }
    }
}

impl Component for Dialog {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        // refresh motion tokens every pass so transitions use live values
        self.state.borrow_mut().motion = theme.motion;

        let visible = {
            let st = self.state.borrow();
            st.open || st.showing_open || st.closing
        };
        if !visible {
            self.surface_bounds = None;
            self.dirty = false;
            return Ok(());
        }

        let surface = if self.state.borrow().showing_fullscreen {
            bounds
        } else {
            let (w, h) = self.size.unwrap_or_else(|| self.natural_size());
            bounds.centered(w, h)
        };

        // scrim behind the surface
        renderer.set_style(&theme.scrim_style())?;
        for row in bounds.y..bounds.bottom() {
            renderer.fill_row(bounds.x, row, bounds.width, ' ')?;
        }
        renderer.reset_style()?;

        self.draw_surface(renderer, surface, theme)?;

        self.surface_bounds = Some(surface);
        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        self.size.unwrap_or_else(|| self.natural_size())
    }

    fn on_mount(&mut self) {
        self.mount();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty || matches!(self.waiting(), Some(Suspend::Render))
    }

    fn name(&self) -> &str {
        "Dialog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    struct Stub;

    impl EventHandler for Stub {}

    impl Component for Stub {
        fn render(&mut self, _renderer: &mut Renderer, _bounds: Rect, _theme: &Theme) -> Result<()> {
            Ok(())
        }

        fn min_size(&self) -> (u16, u16) {
            (6, 1)
        }
    }

    fn recording_dialog() -> (Dialog, Rc<RefCell<Vec<LifecycleEvent>>>) {
        let mut dialog = Dialog::new().with_headline("Test");
        dialog.set_motion(MotionTokens::instant());
        let events: Rc<RefCell<Vec<LifecycleEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        dialog.on_lifecycle(move |e| sink.borrow_mut().push(e.clone()));
        dialog.mount();
        (dialog, events)
    }

    /// Drive render commits, timers and native dismissal until quiescent
    fn settle(dialog: &mut Dialog) {
        for _ in 0..8 {
            dialog.render_committed();
            if dialog.pending_wait().is_some() {
                dialog.transition_elapsed();
            }
            dialog.pump_native();
        }
    }

    fn stages(events: &Rc<RefCell<Vec<LifecycleEvent>>>) -> Vec<LifecycleStage> {
        events.borrow().iter().map(|e| e.stage).collect()
    }

    #[test]
    fn test_show_dispatches_opening_then_opened() {
        let (mut dialog, events) = recording_dialog();
        dialog.show();
        assert!(dialog.is_opening());
        settle(&mut dialog);

        assert_eq!(
            stages(&events),
            vec![LifecycleStage::Opening, LifecycleStage::Opened]
        );
        assert_eq!(events.borrow()[0].action, ACTION_NONE);
        assert!(dialog.is_open());
        assert!(dialog.is_showing_open());
        assert!(!dialog.is_opening());
    }

    #[test]
    fn test_open_waits_out_enter_transition() {
        let (mut dialog, events) = recording_dialog();
        dialog.set_motion(MotionTokens::default());
        dialog.show();
        dialog.render_committed();
        dialog.render_committed();

        // suspended on the enter duration, Opening already out
        assert_eq!(dialog.pending_wait(), Some(Duration::from_millis(500)));
        assert_eq!(stages(&events), vec![LifecycleStage::Opening]);

        dialog.transition_elapsed();
        assert_eq!(
            stages(&events),
            vec![LifecycleStage::Opening, LifecycleStage::Opened]
        );
    }

    #[test]
    fn test_close_carries_action_through_dismissal() {
        let (mut dialog, events) = recording_dialog();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        dialog.close("buy");
        assert!(dialog.is_closing());
        dialog.render_committed();
        dialog.render_committed();

        // Closing is out, Closed waits for the native dismissal to land
        assert_eq!(stages(&events), vec![LifecycleStage::Closing]);
        assert_eq!(events.borrow()[0].action, "buy");

        dialog.pump_native();
        assert_eq!(
            stages(&events),
            vec![LifecycleStage::Closing, LifecycleStage::Closed]
        );
        assert_eq!(events.borrow()[1].action, "buy");
        assert!(!dialog.is_open());
        assert!(!dialog.is_showing_open());
        assert_eq!(dialog.current_action(), None);
    }

    #[test]
    fn test_same_value_assignment_is_silent() {
        let (mut dialog, events) = recording_dialog();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        dialog.set_open(true);
        settle(&mut dialog);
        assert!(events.borrow().is_empty());
        assert!(dialog.is_open());
    }

    #[test]
    fn test_empty_close_action_uses_default() {
        let (mut dialog, events) = recording_dialog();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        dialog.close("");
        settle(&mut dialog);
        assert_eq!(events.borrow().last().unwrap().action, ACTION_CLOSE);
    }

    #[test]
    fn test_close_while_closed_is_ignored() {
        let (mut dialog, events) = recording_dialog();
        dialog.close("nothing");
        settle(&mut dialog);
        assert!(events.borrow().is_empty());
        assert_eq!(dialog.current_action(), None);
    }

    #[test]
    fn test_mount_open_is_silent() {
        let mut dialog = Dialog::new().with_open(true);
        dialog.set_motion(MotionTokens::instant());
        let events: Rc<RefCell<Vec<LifecycleEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        dialog.on_lifecycle(move |e| sink.borrow_mut().push(e.clone()));
        dialog.mount();

        assert!(events.borrow().is_empty());
        assert!(dialog.is_open());
        assert!(dialog.is_showing_open());
    }

    #[test]
    fn test_escape_cancels_then_closes() {
        let (mut dialog, events) = recording_dialog();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        assert!(dialog.handle_event(&Event::Key(Key::Esc)));
        settle(&mut dialog);

        assert_eq!(
            stages(&events),
            vec![
                LifecycleStage::Cancel,
                LifecycleStage::Closing,
                LifecycleStage::Closed
            ]
        );
        assert_eq!(events.borrow()[0].action, ACTION_CLOSE);
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_empty_escape_action_suppresses_cancellation() {
        let mut dialog = Dialog::new().with_escape_key_action("");
        dialog.set_motion(MotionTokens::instant());
        let events: Rc<RefCell<Vec<LifecycleEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        dialog.on_lifecycle(move |e| sink.borrow_mut().push(e.clone()));
        dialog.mount();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        // swallowed, but nothing happens
        assert!(dialog.handle_event(&Event::Key(Key::Esc)));
        settle(&mut dialog);
        assert!(events.borrow().is_empty());
        assert!(dialog.is_open());
    }

    #[test]
    fn test_interrupted_open_superseded_by_close() {
        let (mut dialog, events) = recording_dialog();
        dialog.set_motion(MotionTokens::default());
        dialog.show();
        dialog.render_committed();
        dialog.render_committed();
        assert_eq!(stages(&events), vec![LifecycleStage::Opening]);

        // close mid-transition; the open sequence is dropped, never Opened
        dialog.close("abort");
        settle(&mut dialog);

        assert_eq!(
            stages(&events),
            vec![
                LifecycleStage::Opening,
                LifecycleStage::Closing,
                LifecycleStage::Closed
            ]
        );
        assert!(!dialog.is_open());
        assert_eq!(dialog.is_showing_open(), dialog.is_open());
    }

    #[test]
    fn test_enter_closes_with_slot_action() {
        let (dialog, events) = recording_dialog();
        let mut dialog = dialog.with_footer_slot(
            DialogSlot::new("save-btn", Box::new(Stub))
                .with_autofocus(true)
                .with_attribute(ACTION_ATTRIBUTE, "save"),
        );
        dialog.show();
        settle(&mut dialog);
        assert_eq!(dialog.focused_slot().as_deref(), Some("save-btn"));
        events.borrow_mut().clear();

        assert!(dialog.handle_event(&Event::Key(Key::Enter)));
        settle(&mut dialog);
        assert_eq!(events.borrow().last().unwrap().action, "save");
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_footer_autofocus_wins_over_content() {
        let dialog = Dialog::new()
            .with_content_slot(DialogSlot::new("body", Box::new(Stub)).with_autofocus(true))
            .with_footer_slot(DialogSlot::new("ok", Box::new(Stub)).with_autofocus(true));
        assert_eq!(
            dialog.state.borrow().autofocus_target.as_deref(),
            Some("ok")
        );
    }

    #[test]
    fn test_scrim_click_closes_with_configured_action() {
        let mut dialog = Dialog::new().with_scrim_click_action("dismiss");
        dialog.set_motion(MotionTokens::instant());
        let events: Rc<RefCell<Vec<LifecycleEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        dialog.on_lifecycle(move |e| sink.borrow_mut().push(e.clone()));
        dialog.mount();
        dialog.show();
        settle(&mut dialog);
        events.borrow_mut().clear();

        // presses land outside any rendered surface
        assert!(dialog.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 0, 0))));
        settle(&mut dialog);
        assert_eq!(events.borrow().last().unwrap().action, "dismiss");
    }

    #[test]
    fn test_resize_drives_fullscreen_binding() {
        let mut dialog = Dialog::new().with_fullscreen(true);
        dialog.mount();
        assert!(dialog.is_showing_fullscreen());

        // never consumed, layout observers come first
        assert!(!dialog.handle_event(&Event::Resize(120, 40)));
        assert!(!dialog.is_showing_fullscreen());

        assert!(!dialog.handle_event(&Event::Resize(120, 20)));
        assert!(dialog.is_showing_fullscreen());
    }

    #[test]
    fn test_scroll_clamps_and_tracks_dividers() {
        let mut dialog = Dialog::new();
        dialog.mount();
        dialog.show();
        settle(&mut dialog);
        dialog.set_content_metrics(ScrollMetrics {
            scroll_top: 0,
            scroll_height: 50,
            client_height: 10,
        });

        assert!(dialog.dividers().is_at_top);
        dialog.scroll_by(100);
        assert_eq!(dialog.scroll_metrics().scroll_top, 40);
        dialog.scroll_by(-100);
        assert_eq!(dialog.scroll_metrics().scroll_top, 0);
    }

    #[test]
    fn test_render_paints_headline_and_marks_clean() {
        let mut dialog = Dialog::new().with_headline("Confirm");
        dialog.set_motion(MotionTokens::instant());
        dialog.mount();
        dialog.show();
        settle(&mut dialog);

        let mut renderer = Renderer::headless();
        let theme = Theme::default();
        dialog
            .render(&mut renderer, Rect::new(0, 0, 80, 24), &theme)
            .unwrap();
        dialog.render_committed();

        let output = renderer.buffer_contents().unwrap();
        assert!(output.contains("Confirm"));
        assert!(!dialog.is_dirty());
    }

    #[test]
    fn test_hidden_dialog_renders_nothing() {
        let mut dialog = Dialog::new().with_headline("Hidden");
        dialog.mount();

        let mut renderer = Renderer::headless();
        let theme = Theme::default();
        dialog
            .render(&mut renderer, Rect::new(0, 0, 80, 24), &theme)
            .unwrap();
        assert_eq!(renderer.buffer_contents(), Some(""));
    }
}
