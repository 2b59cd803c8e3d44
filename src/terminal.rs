//! Raw-mode terminal on the alternate screen

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
    Command, QueueableCommand,
};

use crate::error::Result;

/// The editor's screen. Output is queued and sent on [`Terminal::flush`].
pub struct Terminal {
    out: Stdout,
    cols: u16,
    rows: u16,
}

impl Terminal {
    /// Enter raw mode and switch to the alternate screen; dropping the
    /// terminal restores both
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen)?;
        Ok(Self { out, cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn queue(&mut self, command: impl Command) -> Result<()> {
        self.out.queue(command)?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        self.queue(terminal::Clear(ClearType::All))
    }

    pub fn clear_to_eol(&mut self) -> Result<()> {
        self.queue(terminal::Clear(ClearType::UntilNewLine))
    }

    /// Move to `row`, `col`, both 0-indexed
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.queue(cursor::MoveTo(col, row))
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.queue(Print(s))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.queue(cursor::Show)
        } else {
            self.queue(cursor::Hide)
        }
    }

    /// Reverse video, used for the mode line
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        self.queue(SetAttribute(attr))
    }

    /// Block until a key arrives. Resizes are recorded on the way.
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(key_event),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                }
                _ => {}
            }
        }
    }

    pub fn beep(&mut self) -> Result<()> {
        self.queue(Print('\x07'))?;
        self.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
