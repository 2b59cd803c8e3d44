//! Clean auto-indent: remembering and trimming abandoned indentation
//!
//! Every newline-and-indent leaves an [`IndentMark`] behind. When the cursor
//! is later seen somewhere else and the marked line still has the length it
//! had right after the indent, nothing was typed there and the whitespace is
//! removed again.
//!
//! Only the line length is compared. Replacing the indentation with a
//! different run of the same length still counts as untouched.

use crate::host::{save_excursion, TextHost};

use super::unindent::previous_non_blank_line;

/// Where the last auto-indent happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentMark {
    /// Cursor offset right after the indentation was inserted
    pub position: usize,
    /// Length of the marked line at that moment
    pub length: usize,
}

/// Tracks the last auto-indent and cleans it up when abandoned
#[derive(Debug, Default)]
pub struct IndentTracker {
    mark: Option<IndentMark>,
}

impl IndentTracker {
    pub fn new() -> Self {
        Self { mark: None }
    }

    /// The pending mark, if any
    #[cfg(test)]
    pub(crate) fn mark(&self) -> Option<IndentMark> {
        self.mark
    }

    /// Forget the pending mark without trimming
    pub fn clear(&mut self) {
        self.mark = None;
    }

    /// Insert a newline and indent it, then remember the indentation.
    ///
    /// Any pending mark is settled first so marks never pile up across
    /// consecutive returns.
    pub fn newline_and_indent<H: TextHost + ?Sized>(&mut self, host: &mut H, simple: bool) {
        self.trim_abandoned(host);

        if simple {
            simple_newline_and_indent(host);
        } else {
            host.newline_and_indent();
        }

        let position = host.point();
        let length = host.line_length_at(position).unwrap_or(0);
        self.mark = Some(IndentMark { position, length });
    }

    /// Check whether the marked indentation was left behind untouched.
    ///
    /// A mark that no longer fits inside the buffer is never abandoned.
    pub fn check_abandoned<H: TextHost + ?Sized>(&self, host: &H) -> bool {
        match self.mark {
            Some(mark) => {
                host.point() != mark.position
                    && host.line_length_at(mark.position) == Some(mark.length)
            }
            None => false,
        }
    }

    /// Remove abandoned indentation. Returns the number of characters
    /// trimmed; the cursor stays with the text it was on.
    pub fn trim_abandoned<H: TextHost + ?Sized>(&mut self, host: &mut H) -> usize {
        if !self.check_abandoned(host) {
            return 0;
        }
        let Some(mark) = self.mark.take() else {
            return 0;
        };

        let trimmed = save_excursion(host, |host| {
            host.goto_char(mark.position);
            let trimmed = host.delete_trailing_whitespace();
            host.end_of_line();
            trimmed
        });

        if trimmed > 0 {
            let msg = format!("auto trimmed {} chars", trimmed);
            log::debug!("{} at offset {}", msg, mark.position);
            host.message(&msg);
        }
        trimmed
    }

    /// Post-command hook: settle the mark once the cursor has left it
    pub fn post_command<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(mark) = self.mark {
            if host.point() != mark.position {
                self.trim_abandoned(host);
                self.mark = None;
            }
        }
    }
}

/// Newline that copies the indentation of the nearest non-blank line above,
/// ignoring any language rules
pub fn simple_newline_and_indent<H: TextHost + ?Sized>(host: &mut H) {
    host.delete_horizontal_space_backward();
    host.newline();
    let column = save_excursion(host, |host| {
        if previous_non_blank_line(host) {
            host.current_indentation()
        } else {
            0
        }
    });
    host.indent_line_to(column);
}
