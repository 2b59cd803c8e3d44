//! Display rendering

use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::terminal::Terminal;

/// Display state
#[derive(Debug, Default)]
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
    /// First visible line
    top_line: usize,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
            top_line: 0,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Current message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Scroll so that `line` is inside a window of `height` rows
    fn scroll_to(&mut self, line: usize, height: usize) {
        if line < self.top_line {
            self.top_line = line;
        } else if height > 0 && line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }
    }

    /// Render the buffer, mode line and minibuffer
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        buffer: &Buffer,
        lighter: Option<&str>,
    ) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        // Leave one row for the mode line and one for the minibuffer
        let height = rows.saturating_sub(2) as usize;

        let (cursor_line, cursor_col) = buffer.cursor_position();
        self.scroll_to(cursor_line, height);

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        for row in 0..height {
            terminal.move_cursor(row as u16, 0)?;
            match buffer.line(self.top_line + row) {
                Some(line) => {
                    let text = line.expand_tabs(buffer.tab_width());
                    terminal.write_str(&truncate_to_width(&text, cols))?;
                }
                None => terminal.write_str("~")?,
            }
            terminal.clear_to_eol()?;
        }

        self.render_mode_line(terminal, buffer, lighter, height as u16, cols, cursor_line)?;

        terminal.move_cursor(rows.saturating_sub(1), 0)?;
        if let Some(msg) = self.message() {
            terminal.write_str(&truncate_to_width(msg, cols))?;
        }
        terminal.clear_to_eol()?;

        let screen_row = (cursor_line - self.top_line) as u16;
        let screen_col = cursor_col.min(cols.saturating_sub(1)) as u16;
        terminal.move_cursor(screen_row, screen_col)?;
        terminal.set_cursor_visible(true)?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        buffer: &Buffer,
        lighter: Option<&str>,
        row: u16,
        cols: usize,
        cursor_line: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;

        let mode_line = mode_line_text(buffer, lighter, cursor_line);
        let padded = if mode_line.len() < cols {
            format!("{}{}", mode_line, "-".repeat(cols - mode_line.len()))
        } else {
            truncate_to_width(&mode_line, cols)
        };

        terminal.write_str(&padded)?;
        terminal.set_reverse(false)?;
        Ok(())
    }
}

/// Mode line contents: `-- cleanindent: name (file) L3 (CleanIndent) --`
fn mode_line_text(buffer: &Buffer, lighter: Option<&str>, cursor_line: usize) -> String {
    let modified = if buffer.is_modified() { "**" } else { "--" };
    let filename = buffer
        .filename()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no file".to_string());
    let modes = lighter.map(|l| format!(" ({})", l)).unwrap_or_default();

    format!(
        "{}- cleanindent: {} ({}) L{}{} --",
        modified,
        buffer.name(),
        filename,
        cursor_line + 1,
        modes
    )
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("你好", 3), "你");
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }

    #[test]
    fn test_scroll_to_keeps_cursor_visible() {
        let mut display = Display::new();
        display.scroll_to(30, 10);
        assert_eq!(display.top_line, 21);
        display.scroll_to(25, 10);
        assert_eq!(display.top_line, 21);
        display.scroll_to(3, 10);
        assert_eq!(display.top_line, 3);
    }

    #[test]
    fn test_mode_line_shows_lighter() {
        let buffer = Buffer::new("*scratch*");
        let text = mode_line_text(&buffer, Some("CleanIndent"), 0);
        assert_eq!(text, "--- cleanindent: *scratch* (no file) L1 (CleanIndent) --");
        let text = mode_line_text(&buffer, None, 4);
        assert_eq!(text, "--- cleanindent: *scratch* (no file) L5 --");
    }
}
