//! Backspace-unindent: deleting back to the enclosing indentation level

use crate::host::{save_excursion, TextHost};

/// Check whether the cursor is inside the current line's indentation: at or
/// before the first non-blank character, or anywhere on an all-blank line
pub fn is_inside_indent_region<H: TextHost + ?Sized>(host: &H) -> bool {
    host.point() <= host.indentation_position()
}

/// Move up to the nearest previous line that is not empty.
///
/// Only zero-length lines are skipped; a line holding nothing but
/// whitespace stops the scan. Returns whether the cursor moved.
pub fn previous_non_blank_line<H: TextHost + ?Sized>(host: &mut H) -> bool {
    let mut moved = false;
    while host.forward_line(-1) == 0 {
        moved = true;
        if host.line_end_position() != host.line_beginning_position() {
            break;
        }
    }
    moved
}

/// Find the indentation of the nearest previous non-blank line indented
/// less than `start`.
///
/// Lines indented exactly `start` are walked past. The scan ends at the
/// first line indented less than `start`, at a line with no indentation, or
/// at the top of the buffer, and returns the indentation last read there.
pub fn find_smaller_indent<H: TextHost + ?Sized>(host: &mut H, start: usize) -> usize {
    save_excursion(host, |host| {
        let mut column = start;
        while column > 0 && column >= start && previous_non_blank_line(host) {
            column = host.current_indentation();
        }
        column
    })
}

/// Delete backward from inside the indentation to the enclosing level, or
/// fall back to killing `count` words backward elsewhere on the line
pub fn backward_unindent<H: TextHost + ?Sized>(host: &mut H, count: i32) {
    if !is_inside_indent_region(host) {
        host.kill_word(-count);
        return;
    }

    let current = host.current_indentation();
    let target = find_smaller_indent(host, current);
    // The scan can stop on a deeper line at the top of the buffer
    if target < current {
        host.move_to_column(current);
        host.backward_delete_char_untabify(current - target);
        log::debug!("unindented from column {} to {}", current, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;

    /// Build a buffer with the cursor at `line`, `col` (in characters)
    fn buffer_at(text: &str, line: usize, col: usize) -> Buffer {
        let mut buffer = Buffer::from_text("test", text);
        let pos = buffer.line_start(line) + col;
        buffer.goto_char(pos);
        buffer
    }

    #[test]
    fn test_inside_indent_region() {
        assert!(is_inside_indent_region(&buffer_at("    foo", 0, 0)));
        assert!(is_inside_indent_region(&buffer_at("    foo", 0, 2)));
        assert!(is_inside_indent_region(&buffer_at("    foo", 0, 4)));
        assert!(!is_inside_indent_region(&buffer_at("    foo", 0, 5)));
        assert!(is_inside_indent_region(&buffer_at("      ", 0, 6)));
        assert!(is_inside_indent_region(&buffer_at("", 0, 0)));
    }

    #[test]
    fn test_previous_non_blank_line_skips_empty_lines() {
        let mut buffer = buffer_at("a\n  b\n\n\nc", 4, 0);
        assert!(previous_non_blank_line(&mut buffer));
        assert_eq!(buffer.cursor_line(), 1);
    }

    #[test]
    fn test_previous_non_blank_line_stops_on_whitespace_only_line() {
        let mut buffer = buffer_at("a\n   \nc", 2, 0);
        assert!(previous_non_blank_line(&mut buffer));
        assert_eq!(buffer.cursor_line(), 1);
    }

    #[test]
    fn test_previous_non_blank_line_at_top() {
        let mut buffer = buffer_at("abc\ndef", 0, 2);
        assert!(!previous_non_blank_line(&mut buffer));

        // Only empty lines above: we still moved, ending on the top line
        let mut buffer = buffer_at("\n\nx", 2, 0);
        assert!(previous_non_blank_line(&mut buffer));
        assert_eq!(buffer.cursor_line(), 0);
    }

    #[test]
    fn test_find_smaller_indent_stops_at_first_smaller() {
        // Indentation widths 0, 4, 4, 8 with the cursor on the last line
        let mut buffer = buffer_at("a\n    b\n    c\n        d", 3, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 8), 4);
        // The search does not move the cursor
        assert_eq!(buffer.cursor_line(), 3);
    }

    #[test]
    fn test_find_smaller_indent_walks_past_equal_lines() {
        let mut buffer = buffer_at("a\n    b\n        c\n        d", 3, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 8), 4);
    }

    #[test]
    fn test_find_smaller_indent_skips_empty_lines() {
        let mut buffer = buffer_at("a\n  b\n\n\n      c", 4, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 6), 2);
    }

    #[test]
    fn test_find_smaller_indent_top_of_buffer() {
        let mut buffer = buffer_at("    a\n    b", 1, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 4), 4);

        let mut buffer = buffer_at("        a\n    b", 1, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 4), 8);

        let mut buffer = buffer_at("a\n    b", 1, 0);
        assert_eq!(find_smaller_indent(&mut buffer, 4), 0);
    }

    #[test]
    fn test_unindent_to_enclosing_level() {
        let mut buffer = buffer_at("a\n    b\n    c\n        d", 3, 3);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "a\n    b\n    c\n    d");
        assert_eq!(buffer.current_column(), 4);
    }

    #[test]
    fn test_unindent_from_first_non_blank() {
        let mut buffer = buffer_at("if x:\n    y\n        z", 2, 8);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "if x:\n    y\n    z");
        assert_eq!(buffer.current_column(), 4);
    }

    #[test]
    fn test_unindent_with_tabs() {
        let mut buffer = buffer_at("a\n  b\n\tc", 2, 0);
        buffer.set_tab_width(8);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "a\n  b\n  c");
        assert_eq!(buffer.current_column(), 2);
    }

    #[test]
    fn test_unindent_blank_line() {
        let mut buffer = buffer_at("x\n    y\n      ", 2, 6);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "x\n    y\n    ");
    }

    #[test]
    fn test_unindent_nothing_smaller_leaves_line() {
        let mut buffer = buffer_at("    a\n    b", 1, 2);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "    a\n    b");
        assert_eq!(buffer.point(), 8);
    }

    #[test]
    fn test_outside_indent_kills_word() {
        // Cursor one past the first non-blank character
        let mut buffer = buffer_at("  foo", 0, 4);
        backward_unindent(&mut buffer, 1);
        assert_eq!(buffer.text(), "  o");
    }

    #[test]
    fn test_outside_indent_repeat_count() {
        let mut buffer = buffer_at("    foo bar", 0, 11);
        backward_unindent(&mut buffer, 2);
        assert_eq!(buffer.text(), "    ");
    }
}
