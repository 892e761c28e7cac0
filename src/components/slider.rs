//! Horizontal slider over an integer range

use crate::component::Component;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;

/// Change callback, invoked with the new value
pub type OnChange = Box<dyn FnMut(i32)>;

/// Slider component
pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
    /// Increment applied per key press
    step: i32,
    /// Show the numeric value after the track
    labeled: bool,
    disabled: bool,
    focused: bool,
    dirty: bool,
    on_change: Option<OnChange>,
}

impl Slider {
    pub fn new(min: i32, max: i32) -> Self {
        let max = max.max(min);
        Slider {
            min,
            max,
            value: min,
            step: 1,
            labeled: false,
            disabled: false,
            focused: false,
            dirty: true,
            on_change: None,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn with_labeled(mut self, labeled: bool) -> Self {
        self.labeled = labeled;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(i32) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        let value = value.clamp(self.min, self.max);
        if value != self.value {
            self.value = value;
            self.dirty = true;
            if let Some(callback) = &mut self.on_change {
                callback(value);
            }
        }
    }

    fn nudge(&mut self, direction: i32) {
        self.set_value(self.value.saturating_add(self.step * direction));
    }

    /// Filled fraction in 0..=width cells
    fn filled_cells(&self, width: u16) -> u16 {
        let range = (self.max - self.min) as i64;
        if range == 0 {
            return width;
        }
        let offset = (self.value - self.min) as i64;
        ((offset * width as i64) / range) as u16
    }
}

impl EventHandler for Slider {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::Key(Key::Left) | Event::Key(Key::Down) => {
                self.nudge(-1);
                true
            }
            Event::Key(Key::Right) | Event::Key(Key::Up) => {
                self.nudge(1);
                true
            }
            Event::Key(Key::Home) => {
                self.set_value(self.min);
                true
            }
            Event::Key(Key::End) => {
                self.set_value(self.max);
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

impl Component for Slider {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        if bounds.width == 0 || bounds.height == 0 {
            self.dirty = false;
            return Ok(());
        }

        let label = if self.labeled {
            format!(" {}", self.value)
        } else {
            String::new()
        };
        let track_width = bounds.width.saturating_sub(label.chars().count() as u16);
        let filled = self.filled_cells(track_width);

        let active_style = if self.disabled {
            theme.outline_variant_style()
        } else if self.focused {
            theme.focus_style()
        } else {
            theme.primary_style()
        };
        renderer.set_style(&active_style)?;
        renderer.fill_row(bounds.x, bounds.y, filled, '━')?;
        renderer.set_style(&theme.outline_variant_style())?;
        renderer.fill_row(bounds.x + filled, bounds.y, track_width - filled, '─')?;
        renderer.reset_style()?;

        if !label.is_empty() {
            renderer.write_styled(bounds.x + track_width, bounds.y, &theme.on_surface_style(), &label)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let label_width = if self.labeled {
            self.max.to_string().chars().count() as u16 + 1
        } else {
            0
        };
        (10 + label_width, 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Slider"
    }
}
