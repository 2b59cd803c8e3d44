//! The host editor interface the indentation commands are written against
//!
//! Positions are character offsets into the buffer, with each line break
//! counting as one character. Columns are display columns with tabs expanded
//! to the host's tab width.

use crate::line::is_blank;

/// Primitive text and cursor operations supplied by the host editor
pub trait TextHost {
    /// Current cursor offset
    fn point(&self) -> usize;

    /// Largest valid offset (end of buffer)
    fn point_max(&self) -> usize;

    /// Move the cursor, clamping to the buffer
    fn goto_char(&mut self, pos: usize);

    /// Offset of the start of the current line
    fn line_beginning_position(&self) -> usize;

    /// Offset of the end of the current line
    fn line_end_position(&self) -> usize;

    /// Move to the beginning of the line `n` lines away (negative moves up).
    /// Returns the number of lines that could not be moved; 0 on success.
    fn forward_line(&mut self, n: isize) -> isize;

    /// Display width of the current line's leading whitespace
    fn current_indentation(&self) -> usize;

    /// Display column of the cursor
    fn current_column(&self) -> usize;

    /// Move to `column` on the current line, or as close as the line allows.
    /// Returns the column reached.
    fn move_to_column(&mut self, column: usize) -> usize;

    /// Character at `pos`, `'\n'` at line ends, `None` at or past the end
    fn char_at(&self, pos: usize) -> Option<char>;

    /// Character length of the line containing `pos`, `None` when `pos` is
    /// out of range
    fn line_length_at(&self, pos: usize) -> Option<usize>;

    /// Insert text at the cursor, leaving the cursor after it
    fn insert(&mut self, text: &str);

    /// Delete `[start, end)` and return the number of characters removed
    fn delete_region(&mut self, start: usize, end: usize) -> usize;

    /// Kill `n` words, forward when positive and backward when negative
    fn kill_word(&mut self, n: i32);

    /// Delete `n` characters backward, turning tabs into spaces first so a
    /// run of indentation shrinks one column at a time
    fn backward_delete_char_untabify(&mut self, n: usize);

    /// Replace the current line's indentation with `column` columns of
    /// whitespace and leave the cursor after it
    fn indent_line_to(&mut self, column: usize);

    /// The host's own "newline and indent" with its language rules
    fn newline_and_indent(&mut self);

    /// Show a message to the user
    fn message(&mut self, msg: &str);

    /// Remember the cursor; it follows later edits like a marker
    fn push_excursion(&mut self);

    /// Restore the cursor remembered by the matching `push_excursion`
    fn pop_excursion(&mut self);

    /// Insert a plain line break
    fn newline(&mut self) {
        self.insert("\n");
    }

    fn beginning_of_line(&mut self) {
        let pos = self.line_beginning_position();
        self.goto_char(pos);
    }

    fn end_of_line(&mut self) {
        let pos = self.line_end_position();
        self.goto_char(pos);
    }

    /// Offset of the first non-blank character on the current line, or the
    /// line end when the line is all blank
    fn indentation_position(&self) -> usize {
        let end = self.line_end_position();
        let mut pos = self.line_beginning_position();
        while pos < end && self.char_at(pos).is_some_and(is_blank) {
            pos += 1;
        }
        pos
    }

    fn back_to_indentation(&mut self) {
        let pos = self.indentation_position();
        self.goto_char(pos);
    }

    /// Delete blanks immediately before the cursor. Returns the count.
    fn delete_horizontal_space_backward(&mut self) -> usize {
        let end = self.point();
        let bol = self.line_beginning_position();
        let mut start = end;
        while start > bol && self.char_at(start - 1).is_some_and(is_blank) {
            start -= 1;
        }
        if start < end {
            self.delete_region(start, end)
        } else {
            0
        }
    }

    /// Delete trailing blanks on the current line. Returns the count.
    fn delete_trailing_whitespace(&mut self) -> usize {
        let bol = self.line_beginning_position();
        let end = self.line_end_position();
        let mut start = end;
        while start > bol && self.char_at(start - 1).is_some_and(is_blank) {
            start -= 1;
        }
        if start < end {
            self.delete_region(start, end)
        } else {
            0
        }
    }
}

/// Run `f` and put the cursor back where it was, adjusted for any text
/// inserted or deleted in front of it
pub fn save_excursion<H, R, F>(host: &mut H, f: F) -> R
where
    H: TextHost + ?Sized,
    F: FnOnce(&mut H) -> R,
{
    host.push_excursion();
    let result = f(host);
    host.pop_excursion();
    result
}
