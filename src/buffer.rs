//! Buffer representation - a collection of lines with a cursor
//!
//! `Buffer` is the in-memory host for the indentation commands: every edit
//! goes through `insert_at` and `delete_span`, which keep the cursor and any
//! saved excursions pointing at the same text.

use std::path::PathBuf;

use crate::host::TextHost;
use crate::indent_rules::IndentRules;
use crate::line::{indent_string, Line};

/// Check if character is a word character
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A buffer containing text, cursor and metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Buffer name (e.g., "main.rs", "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
    /// Cursor offset in characters
    point: usize,
    /// Columns per tab stop
    tab_width: usize,
    /// Indent with tabs where possible
    indent_tabs: bool,
    /// Language rules for newline-and-indent
    rules: Option<IndentRules>,
    /// Saved cursor offsets, innermost last
    excursions: Vec<usize>,
    /// Message waiting to be shown
    message: Option<String>,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::new()], // Always have at least one line
            name: name.into(),
            filename: None,
            modified: false,
            point: 0,
            tab_width: 8,
            indent_tabs: false,
            rules: None,
            excursions: Vec::new(),
            message: None,
        }
    }

    /// Create a buffer holding `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut buffer = Self::new(name);
        buffer.lines = text.split('\n').map(Line::from).collect();
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &PathBuf) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        // Split the same way `text()` joins, so a save writes back the
        // bytes that were read
        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.clone());
        Ok(buffer)
    }

    /// Open `path` for editing. A file that does not exist yet gives an
    /// empty buffer bound to that path; any other read error is returned so
    /// the file is never replaced by an empty buffer.
    pub fn open(path: &PathBuf) -> std::io::Result<Self> {
        match Self::from_file(path) {
            Ok(buffer) => Ok(buffer),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let name = path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let mut buffer = Self::new(name);
                buffer.filename = Some(path.clone());
                Ok(buffer)
            }
            Err(e) => Err(e),
        }
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width.max(1);
    }

    pub fn set_indent_tabs(&mut self, indent_tabs: bool) {
        self.indent_tabs = indent_tabs;
    }

    pub fn set_indent_rules(&mut self, rules: Option<IndentRules>) {
        self.rules = rules;
    }

    /// Take the pending message, if any
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Whole buffer text joined with newlines
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Cursor line and display column
    pub fn cursor_position(&self) -> (usize, usize) {
        let (line_idx, char_idx) = self.locate(self.point);
        (line_idx, self.lines[line_idx].column_at(char_idx, self.tab_width))
    }

    /// Cursor line index
    pub fn cursor_line(&self) -> usize {
        self.locate(self.point).0
    }

    /// Offset of the start of line `idx`
    pub fn line_start(&self, idx: usize) -> usize {
        self.lines
            .iter()
            .take(idx)
            .map(|l| l.char_len() + 1)
            .sum()
    }

    /// Line index and character index for an offset, clamped to the buffer
    fn locate(&self, pos: usize) -> (usize, usize) {
        let mut remaining = pos;
        for (idx, line) in self.lines.iter().enumerate() {
            let len = line.char_len();
            if remaining <= len {
                return (idx, remaining);
            }
            remaining -= len + 1;
        }
        let last = self.lines.len() - 1;
        (last, self.lines[last].char_len())
    }

    /// Insert text at an offset. The cursor moves with text at or after `pos`,
    /// saved excursions only with text strictly after it.
    fn insert_at(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.point_max());
        let (line_idx, char_idx) = self.locate(pos);

        let tail = self.lines[line_idx].split_off(char_idx);
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            let end = self.lines[line_idx].char_len();
            self.lines[line_idx].insert_str(end, first);
        }
        let mut idx = line_idx;
        for piece in pieces {
            idx += 1;
            self.lines.insert(idx, Line::from(piece));
        }
        self.lines[idx].append(tail);

        let len = text.chars().count();
        if self.point >= pos {
            self.point += len;
        }
        for saved in &mut self.excursions {
            if *saved > pos {
                *saved += len;
            }
        }
        self.modified = true;
    }

    /// Delete `[start, end)`, returning the number of characters removed
    fn delete_span(&mut self, start: usize, end: usize) -> usize {
        let end = end.min(self.point_max());
        if start >= end {
            return 0;
        }
        let (start_line, start_idx) = self.locate(start);
        let (end_line, end_idx) = self.locate(end);

        if start_line == end_line {
            self.lines[start_line].delete_range(start_idx, end_idx);
        } else {
            let tail = self.lines[end_line].split_off(end_idx);
            let len = self.lines[start_line].char_len();
            self.lines[start_line].delete_range(start_idx, len);
            self.lines.drain(start_line + 1..=end_line);
            self.lines[start_line].append(tail);
        }

        let len = end - start;
        let adjust = |pos: usize| {
            if pos >= end {
                pos - len
            } else if pos > start {
                start
            } else {
                pos
            }
        };
        self.point = adjust(self.point);
        for saved in &mut self.excursions {
            *saved = adjust(*saved);
        }
        self.modified = true;
        len
    }

    /// Offset after `n` words forward from `pos`
    fn forward_word_end(chars: &[char], mut pos: usize, n: usize) -> usize {
        for _ in 0..n {
            while pos < chars.len() && !is_word_char(chars[pos]) {
                pos += 1;
            }
            while pos < chars.len() && is_word_char(chars[pos]) {
                pos += 1;
            }
        }
        pos
    }

    /// Offset of the start of the `n`th word backward from `pos`
    fn backward_word_start(chars: &[char], mut pos: usize, n: usize) -> usize {
        for _ in 0..n {
            while pos > 0 && !is_word_char(chars[pos - 1]) {
                pos -= 1;
            }
            while pos > 0 && is_word_char(chars[pos - 1]) {
                pos -= 1;
            }
        }
        pos
    }

    /// Write buffer to file
    pub fn save(&mut self) -> std::io::Result<()> {
        match self.filename.clone() {
            Some(path) => {
                self.write_to(&path)?;
                self.modified = false;
                Ok(())
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No filename set",
            )),
        }
    }

    /// Write buffer to specific path
    pub fn write_to(&self, path: &PathBuf) -> std::io::Result<()> {
        use std::io::Write;
        let mut file = std::fs::File::create(path)?;
        for (i, line) in self.lines.iter().enumerate() {
            write!(file, "{}", line.text())?;
            if i < self.lines.len() - 1 {
                writeln!(file)?;
            }
        }
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

impl TextHost for Buffer {
    fn point(&self) -> usize {
        self.point
    }

    fn point_max(&self) -> usize {
        self.lines.iter().map(Line::char_len).sum::<usize>() + self.lines.len() - 1
    }

    fn goto_char(&mut self, pos: usize) {
        self.point = pos.min(self.point_max());
    }

    fn line_beginning_position(&self) -> usize {
        let (_, char_idx) = self.locate(self.point);
        self.point - char_idx
    }

    fn line_end_position(&self) -> usize {
        let (line_idx, _) = self.locate(self.point);
        self.line_beginning_position() + self.lines[line_idx].char_len()
    }

    fn forward_line(&mut self, n: isize) -> isize {
        let (line_idx, _) = self.locate(self.point);
        let target = line_idx as isize + n;
        let reached = target.clamp(0, self.lines.len() as isize - 1);
        self.point = self.line_start(reached as usize);
        target - reached
    }

    fn current_indentation(&self) -> usize {
        let (line_idx, _) = self.locate(self.point);
        self.lines[line_idx].indentation(self.tab_width)
    }

    fn current_column(&self) -> usize {
        self.cursor_position().1
    }

    fn move_to_column(&mut self, column: usize) -> usize {
        let (line_idx, _) = self.locate(self.point);
        let (char_idx, reached) = self.lines[line_idx].index_for_column(column, self.tab_width);
        self.point = self.line_beginning_position() + char_idx;
        reached
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.point_max() {
            return None;
        }
        let (line_idx, char_idx) = self.locate(pos);
        Some(self.lines[line_idx].char_at(char_idx).unwrap_or('\n'))
    }

    fn line_length_at(&self, pos: usize) -> Option<usize> {
        if pos > self.point_max() {
            return None;
        }
        let (line_idx, _) = self.locate(pos);
        Some(self.lines[line_idx].char_len())
    }

    fn insert(&mut self, text: &str) {
        self.insert_at(self.point, text);
    }

    fn delete_region(&mut self, start: usize, end: usize) -> usize {
        self.delete_span(start.min(end), start.max(end))
    }

    fn kill_word(&mut self, n: i32) {
        let chars: Vec<char> = self.text().chars().collect();
        let pos = self.point;
        let other = if n >= 0 {
            Self::forward_word_end(&chars, pos, n as usize)
        } else {
            Self::backward_word_start(&chars, pos, n.unsigned_abs() as usize)
        };
        self.delete_region(pos, other);
    }

    fn backward_delete_char_untabify(&mut self, n: usize) {
        for _ in 0..n {
            let pos = self.point;
            if pos == 0 {
                break;
            }
            if self.char_at(pos - 1) == Some('\t') {
                let after = self.current_column();
                self.delete_span(pos - 1, pos);
                let before = self.current_column();
                let spaces = after.saturating_sub(before).saturating_sub(1);
                self.insert(&" ".repeat(spaces));
            } else {
                self.delete_span(pos - 1, pos);
            }
        }
    }

    fn indent_line_to(&mut self, column: usize) {
        let bol = self.line_beginning_position();
        let ws_end = self.indentation_position();
        let indent = indent_string(column, self.tab_width, self.indent_tabs);

        let (line_idx, _) = self.locate(bol);
        let current: String = self.lines[line_idx]
            .text()
            .chars()
            .take(ws_end - bol)
            .collect();
        if current != indent {
            self.delete_span(bol, ws_end);
            self.insert_at(bol, &indent);
        }
        self.point = bol + indent.chars().count();
    }

    fn newline_and_indent(&mut self) {
        self.delete_horizontal_space_backward();
        let line_idx = self.cursor_line();
        self.newline();

        let previous = &self.lines[line_idx];
        let base = previous.indentation(self.tab_width);
        let column = match &self.rules {
            Some(rules) => rules.indent_for(base, previous.text(), self.lines[line_idx + 1].text()),
            None => base,
        };
        self.indent_line_to(column);
    }

    fn message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
    }

    fn push_excursion(&mut self) {
        self.excursions.push(self.point);
    }

    fn pop_excursion(&mut self) {
        if let Some(saved) = self.excursions.pop() {
            self.goto_char(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::save_excursion;

    fn buffer_at(text: &str, point: usize) -> Buffer {
        let mut buffer = Buffer::from_text("test", text);
        buffer.goto_char(point);
        buffer
    }

    #[test]
    fn test_offsets_span_lines() {
        let buffer = buffer_at("ab\ncd", 4);
        assert_eq!(buffer.point_max(), 5);
        assert_eq!(buffer.line_beginning_position(), 3);
        assert_eq!(buffer.line_end_position(), 5);
        assert_eq!(buffer.char_at(2), Some('\n'));
        assert_eq!(buffer.char_at(5), None);
        assert_eq!(buffer.cursor_position(), (1, 1));
    }

    #[test]
    fn test_insert_multiline() {
        let mut buffer = buffer_at("abc", 1);
        buffer.insert("x\ny");
        assert_eq!(buffer.text(), "ax\nybc");
        assert_eq!(buffer.point(), 4);
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_delete_region_across_lines() {
        let mut buffer = buffer_at("one\ntwo\nthree", 12);
        assert_eq!(buffer.delete_region(2, 9), 7);
        assert_eq!(buffer.text(), "onhree");
        assert_eq!(buffer.point(), 5);
    }

    #[test]
    fn test_forward_line_reports_shortfall() {
        let mut buffer = buffer_at("a\nb\nc", 4);
        assert_eq!(buffer.forward_line(-1), 0);
        assert_eq!(buffer.point(), 2);
        assert_eq!(buffer.forward_line(-3), -2);
        assert_eq!(buffer.point(), 0);
        assert_eq!(buffer.forward_line(5), 3);
        assert_eq!(buffer.point(), 4);
    }

    #[test]
    fn test_line_length_at_rejects_stale_offsets() {
        let buffer = buffer_at("  foo\n  ", 0);
        assert_eq!(buffer.line_length_at(7), Some(2));
        assert_eq!(buffer.line_length_at(8), Some(2));
        assert_eq!(buffer.line_length_at(9), None);
    }

    #[test]
    fn test_excursion_follows_deletion() {
        let mut buffer = buffer_at("    x\nabc", 8);
        save_excursion(&mut buffer, |b| {
            b.goto_char(0);
            b.delete_region(0, 4);
        });
        assert_eq!(buffer.text(), "x\nabc");
        assert_eq!(buffer.point(), 4);
    }

    #[test]
    fn test_excursion_inside_deleted_text_collapses() {
        let mut buffer = buffer_at("a    b", 3);
        save_excursion(&mut buffer, |b| {
            b.delete_region(1, 5);
        });
        assert_eq!(buffer.point(), 1);
    }

    #[test]
    fn test_kill_word_both_directions() {
        let mut buffer = buffer_at("foo bar baz", 7);
        buffer.kill_word(-1);
        assert_eq!(buffer.text(), "foo  baz");
        assert_eq!(buffer.point(), 4);

        buffer.kill_word(1);
        assert_eq!(buffer.text(), "foo ");
    }

    #[test]
    fn test_kill_word_backward_crosses_lines() {
        let mut buffer = buffer_at("bar\n    foo", 6);
        buffer.kill_word(-1);
        assert_eq!(buffer.text(), "  foo");
    }

    #[test]
    fn test_untabify_deletes_one_column() {
        let mut buffer = buffer_at("\tx", 1);
        buffer.set_tab_width(4);
        buffer.backward_delete_char_untabify(1);
        assert_eq!(buffer.text(), "   x");
        assert_eq!(buffer.point(), 3);

        buffer.backward_delete_char_untabify(2);
        assert_eq!(buffer.text(), " x");
    }

    #[test]
    fn test_indent_line_to() {
        let mut buffer = buffer_at("\t  foo", 0);
        buffer.indent_line_to(2);
        assert_eq!(buffer.text(), "  foo");
        assert_eq!(buffer.point(), 2);

        buffer.set_indent_tabs(true);
        buffer.set_tab_width(4);
        buffer.indent_line_to(6);
        assert_eq!(buffer.text(), "\t  foo");
        assert_eq!(buffer.point(), 3);
    }

    #[test]
    fn test_move_to_column() {
        let mut buffer = buffer_at("x\n    foo", 2);
        assert_eq!(buffer.move_to_column(4), 4);
        assert_eq!(buffer.point(), 6);
        assert_eq!(buffer.move_to_column(40), 7);
        assert_eq!(buffer.point(), 9);
    }

    #[test]
    fn test_newline_and_indent_copies_indentation() {
        let mut buffer = buffer_at("    foo  ", 9);
        buffer.newline_and_indent();
        assert_eq!(buffer.text(), "    foo\n    ");
        assert_eq!(buffer.point(), 12);
    }

    #[test]
    fn test_newline_and_indent_with_rules() {
        let mut buffer = buffer_at("fn main() {", 11);
        buffer.set_indent_rules(Some(IndentRules::braces(4)));
        buffer.newline_and_indent();
        assert_eq!(buffer.text(), "fn main() {\n    ");

        let mut buffer = buffer_at("    x;}", 6);
        buffer.set_indent_rules(Some(IndentRules::braces(4)));
        buffer.newline_and_indent();
        assert_eq!(buffer.text(), "    x;\n}");
        assert_eq!(buffer.point(), 7);
    }

    #[test]
    fn test_indentation_position() {
        let buffer = buffer_at("a\n  \tb", 3);
        assert_eq!(buffer.indentation_position(), 5);
        let blank = buffer_at("   ", 1);
        assert_eq!(blank.indentation_position(), 3);
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cleanindent-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_file_round_trip_keeps_trailing_newlines() {
        let path = temp_path("round-trip.txt");
        std::fs::write(&path, "  foo\n\n").unwrap();

        let mut buffer = Buffer::from_file(&path).unwrap();
        assert_eq!(buffer.text(), "  foo\n\n");
        assert_eq!(buffer.name(), path.file_name().unwrap().to_str().unwrap());
        assert!(!buffer.is_modified());

        buffer.goto_char(0);
        buffer.insert("#");
        assert!(buffer.is_modified());
        buffer.save().unwrap();
        assert!(!buffer.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#  foo\n\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_missing_file_gives_empty_buffer() {
        let path = temp_path("missing.txt");
        let buffer = Buffer::open(&path).unwrap();
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.filename(), Some(&path));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_unreadable_file_is_an_error() {
        let path = temp_path("binary.txt");
        std::fs::write(&path, [0xff, b'x']).unwrap();

        let err = Buffer::open(&path).err().unwrap();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, b'x']);

        std::fs::remove_file(&path).unwrap();
    }
}
