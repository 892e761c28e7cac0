//! Static icon glyph

use crate::component::Component;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;

/// Visual role of an icon, mapped to theme color tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconTone {
    Default,
    Primary,
    Error,
}

pub struct Icon {
    glyph: String,
    tone: IconTone,
    dirty: bool,
}

/// Built-in glyphs by name; unknown names fall back to a placeholder
fn lookup_glyph(name: &str) -> &'static str {
    match name {
        "check" => "✓",
        "close" => "✕",
        "warning" => "⚠",
        "error" => "✗",
        "info" => "ℹ",
        "arrow-up" => "↑",
        "arrow-down" => "↓",
        "arrow-left" => "←",
        "arrow-right" => "→",
        "menu" => "☰",
        "search" => "⌕",
        "star" => "★",
        _ => "·",
    }
}

impl Icon {
    pub fn new(glyph: impl Into<String>) -> Self {
        Icon {
            glyph: glyph.into(),
            tone: IconTone::Default,
            dirty: true,
        }
    }

    /// Look up a built-in glyph by name
    pub fn named(name: &str) -> Self {
        Icon::new(lookup_glyph(name))
    }

    pub fn with_tone(mut self, tone: IconTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn set_glyph(&mut self, glyph: impl Into<String>) {
        self.glyph = glyph.into();
        self.dirty = true;
    }
}

impl EventHandler for Icon {}

impl Component for Icon {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        if bounds.width == 0 || bounds.height == 0 {
            self.dirty = false;
            return Ok(());
        }
        let style = match self.tone {
            IconTone::Default => theme.on_surface_variant_style(),
            IconTone::Primary => theme.primary_style(),
            IconTone::Error => theme.error_style(),
        };
        let glyph: String = self.glyph.chars().take(bounds.width as usize).collect();
        renderer.write_styled(bounds.x, bounds.y, &style, &glyph)?;
        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.glyph.chars().count() as u16, 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Icon"
    }
}
