//! Rendering backend - buffered terminal output and cursor management
//!
//! Output is buffered to minimize syscalls; call `flush()` after a batch of
//! drawing operations. A headless mode captures output into an in-memory
//! buffer for tests.

use anyhow::Result;
use std::io::{self, BufWriter, Write};

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

enum Target {
    Terminal(BufWriter<io::Stdout>),
    Buffer(String),
}

/// Terminal renderer handling cursor movement and styled text output
pub struct Renderer {
    target: Target,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a renderer writing to stdout
    pub fn new() -> Self {
        let writer = BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, io::stdout());
        Renderer {
            target: Target::Terminal(writer),
            in_alt_screen: false,
        }
    }

    /// Create a renderer capturing output into an in-memory buffer
    pub fn headless() -> Self {
        Renderer {
            target: Target::Buffer(String::new()),
            in_alt_screen: false,
        }
    }

    fn emit(&mut self, s: &str) -> Result<()> {
        match &mut self.target {
            Target::Terminal(w) => w.write_all(s.as_bytes())?,
            Target::Buffer(b) => b.push_str(s),
        }
        Ok(())
    }

    /// Enter the alternate screen buffer
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            self.emit("\x1b[?1049h")?;
            self.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit the alternate screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            self.emit("\x1b[?1049l")?;
            self.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        self.emit("\x1b[2J")
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        self.emit(&format!("\x1b[{};{}H", row + 1, col + 1))
    }

    /// Hide the cursor
    pub fn hide_cursor(&mut self) -> Result<()> {
        self.emit("\x1b[?25l")
    }

    /// Show the cursor
    pub fn show_cursor(&mut self) -> Result<()> {
        self.emit("\x1b[?25h")
    }

    /// Write text at the current cursor position
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.emit(text)
    }

    /// Apply a style (raw ANSI escape sequence)
    pub fn set_style(&mut self, style: &str) -> Result<()> {
        self.emit(style)
    }

    /// Reset all styling
    pub fn reset_style(&mut self) -> Result<()> {
        self.emit("\x1b[0m")
    }

    /// Write `text` at `(col, row)` with a style, resetting afterwards
    pub fn write_styled(&mut self, col: u16, row: u16, style: &str, text: &str) -> Result<()> {
        self.move_cursor(col, row)?;
        self.set_style(style)?;
        self.emit(text)?;
        self.reset_style()
    }

    /// Fill a single row with a repeated character
    pub fn fill_row(&mut self, col: u16, row: u16, width: u16, ch: char) -> Result<()> {
        self.move_cursor(col, row)?;
        let mut line = String::with_capacity(width as usize * ch.len_utf8());
        for _ in 0..width {
            line.push(ch);
        }
        self.emit(&line)
    }

    /// Flush buffered output to the terminal (no-op in headless mode)
    pub fn flush(&mut self) -> Result<()> {
        if let Target::Terminal(w) = &mut self.target {
            w.flush()?;
        }
        Ok(())
    }

    /// Contents of the headless buffer, if any
    pub fn buffer_contents(&self) -> Option<&str> {
        match &self.target {
            Target::Buffer(b) => Some(b),
            Target::Terminal(_) => None,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if self.in_alt_screen {
            let _ = self.exit_alt_screen();
            let _ = self.show_cursor();
        }
    }
}
