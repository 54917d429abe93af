//! Raw-mode terminal session that presents serialized frames.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Print, ResetColor},
    terminal, QueueableCommand,
};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct Terminal {
    stdout: io::Stdout,
    active: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self { stdout: io::stdout(), active: false }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        self.active = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Drawable area: the terminal size minus one row so the last line
    /// never scrolls the screen.
    pub fn viewport(&self) -> (u16, u16) {
        let (width, height) = terminal::size().unwrap_or(FALLBACK_SIZE);
        (width, height.saturating_sub(1))
    }

    /// Draw a full frame from the top-left corner.
    pub fn present(&mut self, frame: &str) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.queue(Print(to_raw_lines(frame)))?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn show_error(&mut self, message: &str) -> Result<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(Print(to_raw_lines(message)))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Raw mode disables the implicit carriage return on line feed.
fn to_raw_lines(text: &str) -> String {
    text.replace('\n', "\r\n")
}
