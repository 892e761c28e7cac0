//! Design-token system: color, shape, typography accents, motion, elevation,
//! and state layers, with automatic color degradation for the terminal.

mod color;

pub use color::{Color, ColorDepth};

use std::time::Duration;

/// Corner treatment for component chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStyle {
    None,
    Square,
    Rounded,
    Heavy,
    Ascii,
}

/// Border characters for drawing boxes
#[derive(Debug, Clone)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    fn for_style(style: CornerStyle) -> Self {
        match style {
            CornerStyle::None => BorderChars {
                horizontal: ' ',
                vertical: ' ',
                top_left: ' ',
                top_right: ' ',
                bottom_left: ' ',
                bottom_right: ' ',
            },
            CornerStyle::Square => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
            },
            CornerStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
            },
            CornerStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
            },
            CornerStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
            },
        }
    }
}

/// Color role tokens
#[derive(Debug, Clone, Copy)]
pub struct ColorTokens {
    pub surface: Color,
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub primary: Color,
    pub on_primary: Color,
    pub outline: Color,
    pub outline_variant: Color,
    pub scrim: Color,
    pub error: Color,
}

/// Shape tokens
#[derive(Debug, Clone, Copy)]
pub struct ShapeTokens {
    pub corner: CornerStyle,
}

/// Motion tokens: transition durations read live by animating components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTokens {
    pub dialog_enter: Duration,
    pub dialog_exit: Duration,
}

impl MotionTokens {
    /// Disable timed transitions entirely
    pub fn instant() -> Self {
        MotionTokens {
            dialog_enter: Duration::ZERO,
            dialog_exit: Duration::ZERO,
        }
    }
}

impl Default for MotionTokens {
    fn default() -> Self {
        MotionTokens {
            dialog_enter: Duration::from_millis(500),
            dialog_exit: Duration::from_millis(150),
        }
    }
}

/// State-layer opacities applied over a component's base color
#[derive(Debug, Clone, Copy)]
pub struct StateLayerTokens {
    pub hover: f32,
    pub focus: f32,
    pub pressed: f32,
}

/// Elevation tint opacities per level (0 = resting surface)
#[derive(Debug, Clone, Copy)]
pub struct ElevationTokens {
    tints: [f32; 4],
}

impl ElevationTokens {
    /// Surface color at an elevation level, tinted toward primary
    pub fn surface_at(&self, theme: &Theme, level: u8) -> Color {
        let tint = self.tints[(level as usize).min(self.tints.len() - 1)];
        theme.color.surface.blend(theme.color.primary, tint)
    }
}

/// Theme: the complete token set plus terminal color depth
#[derive(Debug, Clone)]
pub struct Theme {
    pub color: ColorTokens,
    pub shape: ShapeTokens,
    pub motion: MotionTokens,
    pub state_layer: StateLayerTokens,
    pub elevation: ElevationTokens,
    depth: ColorDepth,
}

impl Theme {
    /// Baseline dark theme at the given color depth
    pub fn new(depth: ColorDepth) -> Self {
        Theme {
            color: ColorTokens {
                surface: Color::rgb(28, 27, 31),
                on_surface: Color::rgb(230, 225, 229),
                on_surface_variant: Color::rgb(202, 196, 208),
                primary: Color::rgb(208, 188, 255),
                on_primary: Color::rgb(56, 30, 114),
                outline: Color::rgb(147, 143, 153),
                outline_variant: Color::rgb(73, 69, 79),
                scrim: Color::rgb(0, 0, 0),
                error: Color::rgb(242, 184, 181),
            },
            shape: ShapeTokens {
                corner: CornerStyle::Rounded,
            },
            motion: MotionTokens::default(),
            state_layer: StateLayerTokens {
                hover: 0.08,
                focus: 0.10,
                pressed: 0.10,
            },
            elevation: ElevationTokens {
                tints: [0.0, 0.05, 0.08, 0.11],
            },
            depth,
        }
    }

    /// Detect terminal capabilities and build the baseline theme
    pub fn detect() -> Self {
        Theme::new(ColorDepth::detect())
    }

    pub fn border_chars(&self) -> BorderChars {
        BorderChars::for_style(self.shape.corner)
    }

    pub fn on_surface_style(&self) -> String {
        self.color.on_surface.fg(self.depth)
    }

    pub fn on_surface_variant_style(&self) -> String {
        self.color.on_surface_variant.fg(self.depth)
    }

    pub fn primary_style(&self) -> String {
        self.color.primary.fg(self.depth)
    }

    pub fn outline_style(&self) -> String {
        self.color.outline.fg(self.depth)
    }

    pub fn outline_variant_style(&self) -> String {
        self.color.outline_variant.fg(self.depth)
    }

    pub fn error_style(&self) -> String {
        self.color.error.fg(self.depth)
    }

    pub fn surface_style(&self) -> String {
        self.color.surface.bg(self.depth)
    }

    /// Scrim fill behind modal surfaces
    pub fn scrim_style(&self) -> String {
        self.color.scrim.bg(self.depth)
    }

    /// Foreground washed with the focus state layer
    pub fn focus_style(&self) -> String {
        self.color
            .on_surface
            .blend(self.color.primary, self.state_layer.focus)
            .fg(self.depth)
    }

    /// Background at an elevation level
    pub fn elevated_surface_style(&self, level: u8) -> String {
        self.elevation.surface_at(self, level).bg(self.depth)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(ColorDepth::TrueColor)
    }
}
