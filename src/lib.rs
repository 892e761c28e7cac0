//! tokui - A token-themed terminal widget library with a modal dialog system
//!
//! A small UI framework built around design tokens:
//! - Theme tokens for color, shape, motion, state layers and elevation
//! - Retained components with immediate mode rendering
//! - A modal dialog with a full open/close transition lifecycle
//! - Fullscreen breakpoints evaluated over terminal cells
//! - Graceful color degradation down to 16-color terminals

pub mod component;
pub mod components;
pub mod dialog;
pub mod event;
pub mod focus;
pub mod layout;
pub mod render;
pub mod theme;

// Re-export commonly used types
pub use component::Component;
pub use components::{Checkbox, Icon, Slider, TextField};
pub use dialog::{
    Breakpoint, Dialog, DialogSlot, DividerState, FullscreenBinder, LifecycleEvent,
    LifecycleStage, ModalLayer, NativeModal, ScrollMetrics, ScrollThrottle,
};
pub use event::{Event, EventHandler, EventPoller, Key, MouseButton, MouseEvent};
pub use focus::{FocusId, FocusManager, Focusable};
pub use layout::Rect;
pub use render::Renderer;
pub use theme::{
    BorderChars, Color, ColorDepth, ColorTokens, CornerStyle, ElevationTokens, MotionTokens,
    ShapeTokens, StateLayerTokens, Theme,
};
