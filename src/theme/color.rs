//! Color tokens with automatic terminal degradation

/// Color output capability of the attached terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Palette256,
    Ansi16,
}

impl ColorDepth {
    /// Detect depth from COLORTERM/TERM environment
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM") {
            if ct.contains("truecolor") || ct.contains("24bit") {
                return ColorDepth::TrueColor;
            }
        }
        if let Ok(term) = std::env::var("TERM") {
            if term.contains("256color") {
                return ColorDepth::Palette256;
            }
        }
        ColorDepth::Ansi16
    }
}

/// RGB color value, degraded at emit time to the terminal's depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Foreground escape sequence for the given depth
    pub fn fg(&self, depth: ColorDepth) -> String {
        match depth {
            ColorDepth::TrueColor => format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b),
            ColorDepth::Palette256 => format!("\x1b[38;5;{}m", self.to_256()),
            ColorDepth::Ansi16 => format!("\x1b[{}m", self.to_ansi16_fg()),
        }
    }

    /// Background escape sequence for the given depth
    pub fn bg(&self, depth: ColorDepth) -> String {
        match depth {
            ColorDepth::TrueColor => format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b),
            ColorDepth::Palette256 => format!("\x1b[48;5;{}m", self.to_256()),
            ColorDepth::Ansi16 => format!("\x1b[{}m", self.to_ansi16_fg() + 10),
        }
    }

    /// Blend toward `overlay` by `opacity` (0.0..=1.0)
    ///
    /// State layers are expressed this way: the base color washed with the
    /// layer color at the token's opacity.
    pub fn blend(&self, overlay: Color, opacity: f32) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, overlay.r),
            g: mix(self.g, overlay.g),
            b: mix(self.b, overlay.b),
        }
    }

    /// Map into the 256-color cube (or grayscale ramp for grays)
    fn to_256(&self) -> u8 {
        let (r, g, b) = (self.r as u16, self.g as u16, self.b as u16);
        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            return (232 + (r - 8) / 10) as u8;
        }
        let scale = |v: u16| (v * 5 / 255) as u8;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }

    /// Nearest of the 16 ANSI foreground codes
    fn to_ansi16_fg(&self) -> u16 {
        let bright = self.r as u16 + self.g as u16 + self.b as u16 > 384;
        let code = match (self.r > 127, self.g > 127, self.b > 127) {
            (false, false, false) => 30,
            (true, false, false) => 31,
            (false, true, false) => 32,
            (true, true, false) => 33,
            (false, false, true) => 34,
            (true, false, true) => 35,
            (false, true, true) => 36,
            (true, true, true) => 37,
        };
        if bright {
            code + 60
        } else {
            code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truecolor_escape() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(c.fg(ColorDepth::TrueColor), "\x1b[38;2;10;20;30m");
        assert_eq!(c.bg(ColorDepth::TrueColor), "\x1b[48;2;10;20;30m");
    }

    #[test]
    fn test_grayscale_256_ramp() {
        let c = Color::rgb(128, 128, 128);
        let esc = c.fg(ColorDepth::Palette256);
        assert!(esc.starts_with("\x1b[38;5;"));
        // 232 + (128-8)/10 = 244
        assert!(esc.contains("244"));
    }

    #[test]
    fn test_blend_endpoints() {
        let base = Color::rgb(0, 0, 0);
        let white = Color::rgb(255, 255, 255);
        assert_eq!(base.blend(white, 0.0), base);
        assert_eq!(base.blend(white, 1.0), white);

        let mid = base.blend(white, 0.5);
        assert!(mid.r > 120 && mid.r < 135);
    }

    #[test]
    fn test_ansi16_primaries() {
        assert_eq!(Color::rgb(255, 0, 0).fg(ColorDepth::Ansi16), "\x1b[31m");
        assert_eq!(Color::rgb(0, 0, 0).fg(ColorDepth::Ansi16), "\x1b[30m");
    }
}
